use kanban_core::settings::{Catalog, FontSize, Settings, Theme};
use tracing::{info, warn};

use crate::error::ServiceError;
use crate::BoardService;

impl BoardService {
    pub fn settings(&self) -> Result<Settings, ServiceError> {
        Ok(self.db().get_settings()?)
    }

    /// Load settings, apply `f`, and save only when `f` succeeds.
    fn update_settings<F>(&self, f: F) -> Result<Settings, ServiceError>
    where
        F: FnOnce(&mut Settings) -> Result<(), ServiceError>,
    {
        let mut settings = self.db().get_settings()?;
        f(&mut settings)?;
        self.db().save_settings(&settings)?;
        Ok(settings)
    }

    pub fn add_label(&self, which: Catalog, name: &str, color: &str) -> Result<Settings, ServiceError> {
        let settings = self.update_settings(|s| Ok(s.add_label(which, name, color)?))?;
        info!(catalog = which.noun(), name = name.trim(), "added catalog entry");
        Ok(settings)
    }

    /// Remove a task type or priority. Tasks already carrying the name keep
    /// it and render in the neutral color.
    pub fn remove_label(&self, which: Catalog, name: &str) -> Result<Settings, ServiceError> {
        let result = self.update_settings(|s| Ok(s.remove_label(which, name)?));
        if let Err(ref e) = result {
            warn!(catalog = which.noun(), name, error = %e, "catalog removal refused");
        }
        result
    }

    pub fn recolor_label(&self, which: Catalog, name: &str, color: &str) -> Result<Settings, ServiceError> {
        self.update_settings(|s| Ok(s.recolor_label(which, name, color)?))
    }

    pub fn set_default_label(&self, which: Catalog, name: &str) -> Result<Settings, ServiceError> {
        self.update_settings(|s| Ok(s.set_default(which, name)?))
    }

    pub fn set_theme(&self, theme: Theme) -> Result<Settings, ServiceError> {
        self.update_settings(|s| {
            s.theme = theme;
            Ok(())
        })
    }

    pub fn set_font_size(&self, font_size: FontSize) -> Result<Settings, ServiceError> {
        self.update_settings(|s| {
            s.font_size = font_size;
            Ok(())
        })
    }

    pub fn set_compact_mode(&self, on: bool) -> Result<Settings, ServiceError> {
        self.update_settings(|s| {
            s.compact_mode = on;
            Ok(())
        })
    }

    pub fn set_animations(&self, on: bool) -> Result<Settings, ServiceError> {
        self.update_settings(|s| {
            s.animations_enabled = on;
            Ok(())
        })
    }

    pub fn set_auto_save(&self, on: bool) -> Result<Settings, ServiceError> {
        self.update_settings(|s| {
            s.auto_save = on;
            Ok(())
        })
    }

    pub fn priority_color(&self, name: &str) -> Result<String, ServiceError> {
        Ok(self.settings()?.priority_color(name).to_string())
    }

    pub fn type_color(&self, name: &str) -> Result<String, ServiceError> {
        Ok(self.settings()?.type_color(name).to_string())
    }
}

use kanban_core::settings::Settings;
use serde_json::Value;
use tracing::info;

use crate::{keys, migrate_settings, Db, DbError};

impl Db {
    /// Load settings, seeding defaults on first access and upgrading
    /// legacy documents in place.
    pub fn get_settings(&self) -> Result<Settings, DbError> {
        let Some(raw) = self.read_json::<Value>(keys::SETTINGS)? else {
            let settings = Settings::default();
            self.write_json(keys::SETTINGS, &settings)?;
            info!("seeded default settings");
            return Ok(settings);
        };

        let settings = migrate_settings(&raw);
        let migrated = serde_json::to_value(&settings).map_err(|source| DbError::Corrupt {
            key: keys::SETTINGS.to_string(),
            source,
        })?;
        if migrated != raw {
            self.write_json(keys::SETTINGS, &migrated)?;
            info!("upgraded stored settings document");
        }
        Ok(settings)
    }

    /// Overwrite the settings document wholesale.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), DbError> {
        self.write_json(keys::SETTINGS, settings)
    }
}

#[cfg(test)]
mod tests {
    use kanban_core::label::Label;
    use kanban_core::settings::Theme;
    use serde_json::json;

    use crate::{keys, Db};

    #[test]
    fn first_access_seeds_defaults() {
        let db = Db::open_in_memory();
        assert!(!db.kv().exists(keys::SETTINGS).unwrap());
        let settings = db.get_settings().unwrap();
        assert_eq!(settings.default_type, "Front-End");
        assert!(db.kv().exists(keys::SETTINGS).unwrap());
    }

    #[test]
    fn legacy_document_is_rewritten() {
        let db = Db::open_in_memory();
        db.kv()
            .set(keys::SETTINGS, &json!({ "priorities": ["High", "Low"] }).to_string())
            .unwrap();

        let settings = db.get_settings().unwrap();
        assert_eq!(
            settings.priorities,
            vec![Label::new("High", "#EF4444"), Label::new("Low", "#10B981")]
        );

        let stored: serde_json::Value =
            serde_json::from_str(&db.kv().get(keys::SETTINGS).unwrap()).unwrap();
        assert_eq!(stored["priorities"][1]["color"], "#10B981");
        assert_eq!(stored["theme"], "light");
    }

    #[test]
    fn save_then_get() {
        let db = Db::open_in_memory();
        let mut settings = db.get_settings().unwrap();
        settings.theme = Theme::Dark;
        settings.compact_mode = true;
        db.save_settings(&settings).unwrap();
        assert_eq!(db.get_settings().unwrap(), settings);
    }
}

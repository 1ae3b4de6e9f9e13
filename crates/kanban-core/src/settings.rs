use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color;
use crate::column::{default_column_templates, ColumnTemplate};
use crate::error::KanbanError;
use crate::label::{
    default_priorities, default_task_types, Label, Priority, TaskType, PRIORITY_SWATCHES,
    TASK_TYPE_SWATCHES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Blue,
    Purple,
    Forest,
}

impl Theme {
    pub const ALL: &[Theme] = &[
        Theme::Light,
        Theme::Dark,
        Theme::Blue,
        Theme::Purple,
        Theme::Forest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Blue => "blue",
            Theme::Purple => "purple",
            Theme::Forest => "forest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Blue => "Ocean Blue",
            Theme::Purple => "Purple Dream",
            Theme::Forest => "Forest Green",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "blue" => Some(Theme::Blue),
            "purple" => Some(Theme::Purple),
            "forest" => Some(Theme::Forest),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "small" => Some(FontSize::Small),
            "medium" => Some(FontSize::Medium),
            "large" => Some(FontSize::Large),
            _ => None,
        }
    }
}

impl Default for FontSize {
    fn default() -> Self {
        FontSize::Medium
    }
}

/// User preferences, one document per installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub default_priority: String,
    pub default_type: String,
    pub auto_save: bool,
    pub task_types: Vec<TaskType>,
    pub priorities: Vec<Priority>,
    pub default_columns: Vec<ColumnTemplate>,
    pub compact_mode: bool,
    pub animations_enabled: bool,
    pub font_size: FontSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            default_priority: "Medium".to_string(),
            default_type: "Front-End".to_string(),
            auto_save: true,
            task_types: default_task_types(),
            priorities: default_priorities(),
            default_columns: default_column_templates(),
            compact_mode: false,
            animations_enabled: true,
            font_size: FontSize::Medium,
        }
    }
}

/// Which catalog an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    TaskTypes,
    Priorities,
}

impl Catalog {
    /// Colors offered when adding an entry to this catalog.
    pub fn swatches(&self) -> &'static [&'static str] {
        match self {
            Catalog::TaskTypes => TASK_TYPE_SWATCHES,
            Catalog::Priorities => PRIORITY_SWATCHES,
        }
    }

    pub fn noun(&self) -> &'static str {
        match self {
            Catalog::TaskTypes => "task type",
            Catalog::Priorities => "priority",
        }
    }
}

impl Settings {
    pub fn catalog(&self, which: Catalog) -> &[Label] {
        match which {
            Catalog::TaskTypes => &self.task_types,
            Catalog::Priorities => &self.priorities,
        }
    }

    /// First swatch not yet used by an entry of the catalog, or the first
    /// swatch when all are taken.
    pub fn next_swatch(&self, which: Catalog) -> &'static str {
        let used = self.catalog(which);
        let swatches = which.swatches();
        swatches
            .iter()
            .find(|hex| !used.iter().any(|l| l.color.eq_ignore_ascii_case(hex)))
            .or_else(|| swatches.first())
            .copied()
            .unwrap_or(color::NEUTRAL_GRAY)
    }

    fn catalog_mut(&mut self, which: Catalog) -> &mut Vec<Label> {
        match which {
            Catalog::TaskTypes => &mut self.task_types,
            Catalog::Priorities => &mut self.priorities,
        }
    }

    fn default_name_mut(&mut self, which: Catalog) -> &mut String {
        match which {
            Catalog::TaskTypes => &mut self.default_type,
            Catalog::Priorities => &mut self.default_priority,
        }
    }

    pub fn priority_color(&self, name: &str) -> &str {
        color::resolve_color(name, &self.priorities)
    }

    pub fn type_color(&self, name: &str) -> &str {
        color::resolve_color(name, &self.task_types)
    }

    /// Append a new entry. Names are trimmed and must be unique within the catalog.
    pub fn add_label(&mut self, which: Catalog, name: &str, color: &str) -> Result<(), KanbanError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KanbanError::InvalidInput(format!(
                "{} name is empty",
                which.noun()
            )));
        }
        if !color::is_valid_hex(color) {
            return Err(KanbanError::InvalidInput(format!("invalid color '{color}'")));
        }
        let entries = self.catalog_mut(which);
        if entries.iter().any(|l| l.name == name) {
            return Err(KanbanError::AlreadyExists(format!(
                "{} '{name}'",
                which.noun()
            )));
        }
        entries.push(Label::new(name, color));
        Ok(())
    }

    /// Remove an entry. The last entry cannot be removed; removing the
    /// current default moves the default to the first remaining entry.
    pub fn remove_label(&mut self, which: Catalog, name: &str) -> Result<(), KanbanError> {
        let entries = self.catalog_mut(which);
        if !entries.iter().any(|l| l.name == name) {
            return Err(KanbanError::NotFound(format!("{} '{name}'", which.noun())));
        }
        if entries.len() <= 1 {
            return Err(KanbanError::LastRemaining(which.noun()));
        }
        entries.retain(|l| l.name != name);
        let first = entries[0].name.clone();
        let default = self.default_name_mut(which);
        if *default == name {
            *default = first;
        }
        Ok(())
    }

    pub fn recolor_label(&mut self, which: Catalog, name: &str, color: &str) -> Result<(), KanbanError> {
        if !color::is_valid_hex(color) {
            return Err(KanbanError::InvalidInput(format!("invalid color '{color}'")));
        }
        let entry = self
            .catalog_mut(which)
            .iter_mut()
            .find(|l| l.name == name)
            .ok_or_else(|| KanbanError::NotFound(format!("{} '{name}'", which.noun())))?;
        entry.color = color.to_string();
        Ok(())
    }

    pub fn set_default(&mut self, which: Catalog, name: &str) -> Result<(), KanbanError> {
        if !self.catalog(which).iter().any(|l| l.name == name) {
            return Err(KanbanError::NotFound(format!("{} '{name}'", which.noun())));
        }
        *self.default_name_mut(which) = name.to_string();
        Ok(())
    }
}

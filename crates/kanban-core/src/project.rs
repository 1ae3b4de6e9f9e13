use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECT_ID: &str = "project-default";
pub const DEFAULT_PROJECT_NAME: &str = "Default Project";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn default_project() -> Self {
        Self {
            id: DEFAULT_PROJECT_ID.to_string(),
            name: DEFAULT_PROJECT_NAME.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, update: &UpdateProject) {
        if let Some(ref name) = update.name {
            self.name = name.clone();
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
}

//! Key layout inside the key/value store. Every value is a JSON document.

pub const CURRENT_PROJECT: &str = "kanban_current_project";
pub const PROJECTS: &str = "kanban_projects";
pub const SETTINGS: &str = "kanban_settings";
pub const TASKS: &str = "kanban_tasks";
pub const COLUMNS_PREFIX: &str = "kanban_columns_";

pub fn columns_key(project_id: &str) -> String {
    format!("{COLUMNS_PREFIX}{project_id}")
}

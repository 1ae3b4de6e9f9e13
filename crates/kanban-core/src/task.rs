use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::FileAttachment;

/// Filter value that disables a priority or type filter.
pub const ALL: &str = "All";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub column_id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-text name resolved against `Settings::priorities` for display.
    pub priority: String,
    /// Free-text name resolved against `Settings::task_types` for display.
    #[serde(rename = "type")]
    pub task_type: String,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub attachments: Vec<FileAttachment>,
    /// Rank within the column at creation time. Never recomputed on move.
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn apply(&mut self, update: &UpdateTask) {
        if let Some(ref column_id) = update.column_id {
            self.column_id = column_id.clone();
        }
        if let Some(ref title) = update.title {
            self.title = title.clone();
        }
        if let Some(ref description) = update.description {
            self.description = description.clone();
        }
        if let Some(ref priority) = update.priority {
            self.priority = priority.clone();
        }
        if let Some(ref task_type) = update.task_type {
            self.task_type = task_type.clone();
        }
        if let Some(comments_count) = update.comments_count {
            self.comments_count = comments_count;
        }
        if let Some(ref attachments) = update.attachments {
            self.attachments = attachments.clone();
        }
        if let Some(position) = update.position {
            self.position = position;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub project_id: String,
    pub column_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: String,
    #[serde(rename = "type")]
    pub task_type: String,
    #[serde(default)]
    pub attachments: Vec<FileAttachment>,
    /// `max(position in column) + 1` when absent.
    #[serde(default)]
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub column_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "type")]
    pub task_type: Option<String>,
    pub comments_count: Option<u32>,
    pub attachments: Option<Vec<FileAttachment>>,
    pub position: Option<i64>,
}

impl UpdateTask {
    pub fn move_to(column_id: impl Into<String>) -> Self {
        Self {
            column_id: Some(column_id.into()),
            ..Default::default()
        }
    }
}

/// Display filters applied to the tasks of one column.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
    /// Exact priority name.
    pub priority: Option<String>,
    /// Exact type name.
    pub task_type: Option<String>,
}

impl TaskQuery {
    /// Build a query from raw UI values, treating empty strings and `All` as unset.
    pub fn from_inputs(search: &str, priority: &str, task_type: &str) -> Self {
        let active = |v: &str| {
            let v = v.trim();
            (!v.is_empty() && v != ALL).then(|| v.to_string())
        };
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            priority: active(priority),
            task_type: active(task_type),
        }
    }

    pub fn matches_search(&self, task: &Task) -> bool {
        match self.search.as_deref() {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                task.title.to_lowercase().contains(&needle)
                    || task.description.to_lowercase().contains(&needle)
            }
        }
    }

    pub fn matches_priority(&self, task: &Task) -> bool {
        self.priority
            .as_deref()
            .map_or(true, |p| task.priority == p)
    }

    pub fn matches_type(&self, task: &Task) -> bool {
        self.task_type
            .as_deref()
            .map_or(true, |t| task.task_type == t)
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task) && self.matches_priority(task) && self.matches_type(task)
    }
}

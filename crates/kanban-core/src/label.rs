use serde::{Deserialize, Serialize};

/// A named, colored catalog entry. Task types and priorities share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub color: String,
}

impl Label {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

pub type TaskType = Label;
pub type Priority = Label;

pub fn default_task_types() -> Vec<TaskType> {
    vec![
        Label::new("Front-End", "#3B82F6"),
        Label::new("Back-end", "#F59E0B"),
        Label::new("Design", "#EC4899"),
        Label::new("Testing", "#10B981"),
    ]
}

pub fn default_priorities() -> Vec<Priority> {
    vec![
        Label::new("High", "#EF4444"),
        Label::new("Medium", "#F59E0B"),
        Label::new("Low", "#10B981"),
    ]
}

/// Swatches offered when adding a task type.
pub const TASK_TYPE_SWATCHES: &[&str] = &[
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
    "#6366F1", "#84CC16",
];

/// Swatches offered when adding a priority.
pub const PRIORITY_SWATCHES: &[&str] = &[
    "#EF4444", "#F59E0B", "#10B981", "#3B82F6", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
    "#6366F1", "#84CC16",
];

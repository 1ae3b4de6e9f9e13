use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLUMN_COLOR: &str = "#bfdbfe";

/// Swatches offered when creating or recoloring a column.
pub const COLUMN_COLORS: &[(&str, &str)] = &[
    ("Purple", "#e9d5ff"),
    ("Blue", "#bfdbfe"),
    ("Yellow", "#fef3c7"),
    ("Red", "#fecaca"),
    ("Green", "#bbf7d0"),
    ("Pink", "#fbcfe8"),
    ("Orange", "#fed7aa"),
    ("Gray", "#e5e7eb"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub color: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl Column {
    pub fn apply(&mut self, update: &UpdateColumn) {
        if let Some(ref title) = update.title {
            self.title = title.clone();
        }
        if let Some(ref color) = update.color {
            self.color = color.clone();
        }
        if let Some(position) = update.position {
            self.position = position;
        }
    }
}

/// A column without identity, as stored in `Settings::default_columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTemplate {
    pub title: String,
    pub color: String,
    pub position: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateColumn {
    pub title: String,
    #[serde(default = "default_color")]
    pub color: String,
    /// Appended after the current last column when absent.
    #[serde(default)]
    pub position: Option<i64>,
}

fn default_color() -> String {
    DEFAULT_COLUMN_COLOR.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateColumn {
    pub title: Option<String>,
    pub color: Option<String>,
    pub position: Option<i64>,
}

pub fn default_column_templates() -> Vec<ColumnTemplate> {
    [
        ("TODO", "#e9d5ff"),
        ("In Progress", "#bfdbfe"),
        ("In Review", "#fef3c7"),
        ("Completed", "#bbf7d0"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (title, color))| ColumnTemplate {
        title: title.to_string(),
        color: color.to_string(),
        position: i as i64,
    })
    .collect()
}

/// The four columns every project board starts with.
pub fn default_columns() -> Vec<Column> {
    let now = Utc::now();
    let ids = ["col-todo", "col-in-progress", "col-in-review", "col-completed"];
    default_column_templates()
        .into_iter()
        .zip(ids)
        .map(|(tpl, id)| Column {
            id: id.to_string(),
            title: tpl.title,
            color: tpl.color,
            position: tpl.position,
            created_at: now,
        })
        .collect()
}

/// Resolve a swatch name from [`COLUMN_COLORS`] (case-insensitive) or a
/// hex color to the hex value stored on the column.
pub fn column_color(input: &str) -> Option<String> {
    let input = input.trim();
    COLUMN_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(input))
        .map(|(_, hex)| hex.to_string())
        .or_else(|| crate::color::is_valid_hex(input).then(|| input.to_string()))
}

/// Renumber columns 0..n-1 in the order given.
pub fn renumber(columns: &mut [Column]) {
    for (i, col) in columns.iter_mut().enumerate() {
        col.position = i as i64;
    }
}

use kanban_core::color::NEUTRAL_GRAY;
use kanban_core::column::ColumnTemplate;
use kanban_core::label::Label;
use kanban_core::settings::{FontSize, Settings, Theme};
use serde_json::Value;

/// Upgrade a stored settings document of any vintage to the current shape.
///
/// Missing or mistyped fields take their default. Task types and priorities
/// stored as bare names become `{name, color}` records, colored from the
/// default catalog or the neutral gray. Running this on its own output is a
/// no-op.
pub fn migrate_settings(raw: &Value) -> Settings {
    let defaults = Settings::default();
    let field = |name: &str| raw.get(name);
    let text = |name: &str, fallback: &str| {
        field(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback)
            .to_string()
    };
    let flag = |name: &str, fallback: bool| field(name).and_then(Value::as_bool).unwrap_or(fallback);

    Settings {
        theme: field("theme")
            .and_then(Value::as_str)
            .and_then(Theme::parse_str)
            .unwrap_or(defaults.theme),
        default_priority: text("defaultPriority", &defaults.default_priority),
        default_type: text("defaultType", &defaults.default_type),
        auto_save: flag("autoSave", defaults.auto_save),
        task_types: upgrade_catalog(field("taskTypes"), &defaults.task_types),
        priorities: upgrade_catalog(field("priorities"), &defaults.priorities),
        default_columns: field("defaultColumns")
            .and_then(|v| serde_json::from_value::<Vec<ColumnTemplate>>(v.clone()).ok())
            .unwrap_or_else(|| defaults.default_columns.clone()),
        compact_mode: flag("compactMode", defaults.compact_mode),
        animations_enabled: flag("animationsEnabled", defaults.animations_enabled),
        font_size: field("fontSize")
            .and_then(Value::as_str)
            .and_then(FontSize::parse_str)
            .unwrap_or(defaults.font_size),
    }
}

fn upgrade_catalog(value: Option<&Value>, defaults: &[Label]) -> Vec<Label> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return defaults.to_vec();
    };
    let known_color = |name: &str| {
        defaults
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.color.clone())
            .unwrap_or_else(|| NEUTRAL_GRAY.to_string())
    };
    let upgraded: Vec<Label> = entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(name) => Some(Label::new(name.clone(), known_color(name))),
            Value::Object(obj) => {
                let name = obj.get("name")?.as_str()?;
                let color = obj
                    .get("color")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| known_color(name));
                Some(Label::new(name, color))
            }
            _ => None,
        })
        .collect();
    // A catalog must never be empty.
    if upgraded.is_empty() {
        defaults.to_vec()
    } else {
        upgraded
    }
}

//! Button group data model.
//!
//! A `ButtonGroup` is one user-defined status bar button holding an ordered
//! list of shell commands. The stored JSON shape (including the camelCase
//! `terminalName` key) is the persisted schema and must round-trip exactly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which edge of the status bar a button anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

impl Alignment {
    /// Parse a stored alignment value. Anything other than the literal
    /// `"right"` is left.
    pub fn parse(value: &str) -> Self {
        if value == "right" {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }
}

/// One executable action inside a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandEntry {
    /// Shown in the selection prompt when the group has several entries.
    pub label: String,
    /// Shell command template; may contain `${workspaceFolder}`.
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_name: Option<String>,
}

impl CommandEntry {
    /// Terminal session name for this entry. Falls back to a name generated
    /// from the owning group's position when unset or empty.
    pub fn session_name(&self, position: usize) -> String {
        match &self.terminal_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Terminal {}", position + 1),
        }
    }

    fn from_value(value: &Value) -> Self {
        CommandEntry {
            label: string_field(value, "label").unwrap_or_default(),
            command: string_field(value, "command").unwrap_or_default(),
            terminal_name: string_field(value, "terminalName"),
        }
    }
}

/// One status bar button: label, placement, and its list of commands.
///
/// Identity is positional: a group is "group 3" because it sits at index 3
/// of the stored sequence, and only until the next rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonGroup {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub priority: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
}

impl Default for ButtonGroup {
    fn default() -> Self {
        ButtonGroup {
            text: String::new(),
            tooltip: None,
            alignment: Alignment::Left,
            priority: 0,
            color: None,
            commands: Vec::new(),
        }
    }
}

impl ButtonGroup {
    /// Tooltip shown on the button. Falls back to `text` when unset or empty.
    pub fn effective_tooltip(&self) -> &str {
        match &self.tooltip {
            Some(tooltip) if !tooltip.is_empty() => tooltip,
            _ => &self.text,
        }
    }

    /// Decode one group from an arbitrary JSON value.
    ///
    /// Never fails: every missing or wrong-typed field gets its documented
    /// default, unknown fields are ignored. This is the single validation
    /// point for stored configuration; nothing downstream re-checks fields.
    pub fn from_value(value: &Value) -> Self {
        ButtonGroup {
            text: string_field(value, "text").unwrap_or_default(),
            tooltip: string_field(value, "tooltip"),
            alignment: string_field(value, "alignment")
                .map(|s| Alignment::parse(&s))
                .unwrap_or_default(),
            priority: value
                .get("priority")
                .and_then(Value::as_i64)
                .unwrap_or_default(),
            color: string_field(value, "color"),
            commands: value
                .get("commands")
                .and_then(Value::as_array)
                .map(|entries| entries.iter().map(CommandEntry::from_value).collect())
                .unwrap_or_default(),
        }
    }
}

/// Decode a full stored snapshot from a JSON array value.
pub fn groups_from_values(values: &[Value]) -> Vec<ButtonGroup> {
    values.iter().map(ButtonGroup::from_value).collect()
}

fn string_field(value: &Value, name: &str) -> Option<String> {
    value
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_defaults_missing_fields() {
        let group = ButtonGroup::from_value(&json!({}));
        assert_eq!(group.text, "");
        assert_eq!(group.tooltip, None);
        assert_eq!(group.alignment, Alignment::Left);
        assert_eq!(group.priority, 0);
        assert_eq!(group.color, None);
        assert!(group.commands.is_empty());
    }

    #[test]
    fn test_from_value_defaults_wrong_types() {
        let group = ButtonGroup::from_value(&json!({
            "text": 42,
            "alignment": ["right"],
            "priority": "high",
            "commands": "not a list"
        }));
        assert_eq!(group.text, "");
        assert_eq!(group.alignment, Alignment::Left);
        assert_eq!(group.priority, 0);
        assert!(group.commands.is_empty());
    }

    #[test]
    fn test_alignment_only_literal_right_is_right() {
        assert_eq!(Alignment::parse("right"), Alignment::Right);
        assert_eq!(Alignment::parse("left"), Alignment::Left);
        assert_eq!(Alignment::parse("Right"), Alignment::Left);
        assert_eq!(Alignment::parse("center"), Alignment::Left);
        assert_eq!(Alignment::parse(""), Alignment::Left);
    }

    #[test]
    fn test_from_value_reads_full_group() {
        let group = ButtonGroup::from_value(&json!({
            "text": "Build",
            "tooltip": "Run the build",
            "alignment": "right",
            "priority": 5,
            "color": "#ffcc00",
            "commands": [
                {"label": "debug", "command": "make debug"},
                {"label": "release", "command": "make release", "terminalName": "build"}
            ],
            "unknownField": true
        }));
        assert_eq!(group.text, "Build");
        assert_eq!(group.tooltip.as_deref(), Some("Run the build"));
        assert_eq!(group.alignment, Alignment::Right);
        assert_eq!(group.priority, 5);
        assert_eq!(group.color.as_deref(), Some("#ffcc00"));
        assert_eq!(group.commands.len(), 2);
        assert_eq!(group.commands[1].terminal_name.as_deref(), Some("build"));
    }

    #[test]
    fn test_effective_tooltip_falls_back_to_text() {
        let mut group = ButtonGroup {
            text: "Deploy".to_string(),
            ..Default::default()
        };
        assert_eq!(group.effective_tooltip(), "Deploy");

        group.tooltip = Some(String::new());
        assert_eq!(group.effective_tooltip(), "Deploy");

        group.tooltip = Some("Ship it".to_string());
        assert_eq!(group.effective_tooltip(), "Ship it");
    }

    #[test]
    fn test_session_name_defaults_from_position() {
        let entry = CommandEntry {
            label: "run".to_string(),
            command: "cargo run".to_string(),
            terminal_name: None,
        };
        assert_eq!(entry.session_name(0), "Terminal 1");
        assert_eq!(entry.session_name(4), "Terminal 5");

        let named = CommandEntry {
            terminal_name: Some("worker".to_string()),
            ..entry.clone()
        };
        assert_eq!(named.session_name(0), "worker");

        let empty = CommandEntry {
            terminal_name: Some(String::new()),
            ..entry
        };
        assert_eq!(empty.session_name(2), "Terminal 3");
    }

    #[test]
    fn test_serde_uses_camel_case_terminal_name() {
        let entry = CommandEntry {
            label: "run".to_string(),
            command: "ls".to_string(),
            terminal_name: Some("main".to_string()),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["terminalName"], "main");
        assert!(json.get("terminal_name").is_none());
    }

    #[test]
    fn test_typed_roundtrip_is_exact() {
        let groups = vec![ButtonGroup {
            text: "Test".to_string(),
            tooltip: Some("Run tests".to_string()),
            alignment: Alignment::Right,
            priority: -2,
            color: Some("#00ff00".to_string()),
            commands: vec![CommandEntry {
                label: "unit".to_string(),
                command: "cargo test".to_string(),
                terminal_name: None,
            }],
        }];
        let json = serde_json::to_string_pretty(&groups).unwrap();
        let back: Vec<ButtonGroup> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, groups);
    }
}

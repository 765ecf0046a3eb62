//! MCP tool definitions for the wellness server

use serde_json::json;

use super::protocol::ToolDefinition;

/// All tool definitions: (name, description, input JSON schema)
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[
    (
        "validate",
        "Validate the MCP connection",
        r#"{
            "type": "object",
            "properties": {}
        }"#,
    ),
    (
        "set_reminder",
        "Set a personalized health reminder",
        r#"{
            "type": "object",
            "properties": {
                "reminder_type": {"type": "string", "description": "Type of reminder, e.g., 'hydration', 'exercise'"},
                "reminder_time": {"type": "string", "description": "Time/frequency, e.g., 'every 2 hours'"}
            },
            "required": ["reminder_type", "reminder_time"]
        }"#,
    ),
    (
        "get_reminders",
        "Get user's active reminders and progress updates",
        r#"{
            "type": "object",
            "properties": {}
        }"#,
    ),
    (
        "get_wellness_tip",
        "Get personalized wellness advice",
        r#"{
            "type": "object",
            "properties": {
                "category": {"type": "string", "description": "Category, e.g., 'nutrition', 'stress', 'workout'"}
            },
            "required": ["category"]
        }"#,
    ),
    (
        "track_progress",
        "Track and update health progress",
        r#"{
            "type": "object",
            "properties": {
                "category": {"type": "string", "description": "Category to track, e.g., 'steps', 'water'"},
                "value": {"type": "integer", "description": "Value to add, e.g., 8 glasses"}
            },
            "required": ["category", "value"]
        }"#,
    ),
];

/// Get tool definitions as structured objects
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}

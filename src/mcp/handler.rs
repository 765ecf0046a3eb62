//! Wellness tool handler
//!
//! Owns the injected [`Storage`] and the configured identity string, and
//! implements the five tools. Tool methods are synchronous; the HTTP transport
//! runs them on the blocking pool.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, ToolCallResult,
};
use super::tools::get_tool_definitions;
use crate::error::{Result, WellnessError};
use crate::storage::queries::{insert_progress, list_reminders, upsert_reminder};
use crate::storage::Storage;
use crate::tips;
use crate::types::Reminder;

/// Returned by `get_reminders` when the user has none
pub const NO_REMINDERS: &str = "No active reminders. Set one with 'set_reminder'!";

#[derive(Debug, Deserialize)]
struct SetReminderInput {
    reminder_type: String,
    reminder_time: String,
}

#[derive(Debug, Deserialize)]
struct WellnessTipInput {
    category: String,
}

#[derive(Debug, Deserialize)]
struct TrackProgressInput {
    category: String,
    value: i64,
}

/// MCP request handler for the wellness tools
pub struct WellnessHandler {
    storage: Storage,
    identity: String,
}

impl WellnessHandler {
    pub fn new(storage: Storage, identity: impl Into<String>) -> Self {
        Self {
            storage,
            identity: identity.into(),
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Configured identity, used by the caller to confirm the connection
    pub fn validate(&self) -> String {
        self.identity.clone()
    }

    pub fn set_reminder(
        &self,
        caller: Option<&str>,
        reminder_type: &str,
        reminder_time: &str,
    ) -> Result<String> {
        let user_id = require_caller(caller)?;
        self.storage.with_transaction(|conn| {
            upsert_reminder(conn, user_id, reminder_type, reminder_time, Utc::now())
        })?;
        Ok(format!(
            "Reminder set for {} at {}!",
            reminder_type, reminder_time
        ))
    }

    pub fn get_reminders(&self, caller: Option<&str>) -> Result<String> {
        let user_id = require_caller(caller)?;
        let reminders = self
            .storage
            .with_connection(|conn| list_reminders(conn, user_id))?;
        Ok(render_reminders(&reminders, Utc::now()))
    }

    pub fn get_wellness_tip(&self, category: &str) -> String {
        tips::get_tip(category).to_string()
    }

    pub fn track_progress(
        &self,
        caller: Option<&str>,
        category: &str,
        value: i64,
    ) -> Result<String> {
        let user_id = require_caller(caller)?;
        self.storage.with_transaction(|conn| {
            insert_progress(conn, user_id, category, value, Utc::now())
        })?;
        Ok(format!(
            "Progress updated: {} for {}. Great job!",
            value, category
        ))
    }

    /// Dispatch a named tool with raw JSON arguments
    pub fn handle_tool_call(
        &self,
        name: &str,
        params: Value,
        caller: Option<&str>,
    ) -> Result<String> {
        tracing::debug!(tool = name, "tool call");

        match name {
            "validate" => Ok(self.validate()),
            "set_reminder" => {
                let user_id = require_caller(caller)?;
                let input: SetReminderInput = parse_args(name, params)?;
                self.set_reminder(Some(user_id), &input.reminder_type, &input.reminder_time)
            }
            "get_reminders" => self.get_reminders(caller),
            "get_wellness_tip" => {
                let input: WellnessTipInput = parse_args(name, params)?;
                Ok(self.get_wellness_tip(&input.category))
            }
            "track_progress" => {
                let user_id = require_caller(caller)?;
                let input: TrackProgressInput = parse_args(name, params)?;
                self.track_progress(Some(user_id), &input.category, input.value)
            }
            _ => Err(WellnessError::InvalidInput(format!("Unknown tool: {}", name))),
        }
    }
}

impl McpHandler for WellnessHandler {
    fn handle_request(&self, request: McpRequest, caller: Option<&str>) -> Result<McpResponse> {
        match request.method.as_str() {
            methods::INITIALIZE => {
                let result = InitializeResult::default();
                Ok(McpResponse::success(request.id, json!(result)))
            }
            methods::INITIALIZED | methods::PING => {
                Ok(McpResponse::success(request.id, json!({})))
            }
            methods::LIST_TOOLS => {
                let tools = get_tool_definitions();
                Ok(McpResponse::success(request.id, json!({"tools": tools})))
            }
            methods::CALL_TOOL => {
                let name = request
                    .params
                    .get("name")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| WellnessError::InvalidInput("missing tool name".into()))?;
                let arguments = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or(json!({}));

                let text = self.handle_tool_call(name, arguments, caller)?;
                let tool_result = ToolCallResult::text(text);
                Ok(McpResponse::success(request.id, json!(tool_result)))
            }
            _ => Ok(McpResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            )),
        }
    }
}

/// Render the reminder summary. The streak counts whole days since the
/// first (earliest) reminder.
pub fn render_reminders(reminders: &[Reminder], now: DateTime<Utc>) -> String {
    let Some(first) = reminders.first() else {
        return NO_REMINDERS.to_string();
    };

    let mut output = String::from("Your reminders:\n");
    for rem in reminders {
        output.push_str(&format!(
            "- {} at {} (set on {})\n",
            rem.reminder_type,
            rem.reminder_time,
            rem.created_at.format("%Y-%m-%d %H:%M:%S")
        ));
    }

    let days = (now - first.created_at).num_days().max(0);
    output.push_str(&format!(
        "Progress update: You've been on track for {} days!",
        days
    ));
    output
}

fn require_caller(caller: Option<&str>) -> Result<&str> {
    match caller {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(WellnessError::MissingIdentity),
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, params: Value) -> Result<T> {
    serde_json::from_value(params)
        .map_err(|e| WellnessError::InvalidInput(format!("{}: {}", tool, e)))
}

//! MCP tool definitions and dispatch for the leave desk.
//!
//! Each tool maps to a `LeaveDesk` operation and replies with Markdown text.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::desk::{LeaveDesk, Outcome, SearchOutcome};
use crate::display::{
    format_ambiguous, format_application, format_balance, format_employee_card,
    format_not_found, format_search_matches,
};
use crate::errors::{LeaveDeskError, Result};
use crate::types::LeaveRequest;

/// Maximum character length for a tool response before truncation.
const MAX_RESPONSE_CHARS: usize = 15_000;

/// A tool definition exposed by the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema describing the tool's input parameters.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Returns the list of all tool definitions exposed by this MCP server.
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "smart_employee_search".to_string(),
            description: "Find an employee from a free-text phrase such as 'Priya from HR' or 'Smith in Engineering'. Tolerates typos, reversed names and partial names.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "search_query": {
                        "type": "string",
                        "description": "Name, optionally followed by 'from <department>' or 'in <department>'"
                    }
                },
                "required": ["search_query"]
            }),
        },
        ToolDefinition {
            name: "get_leave_balance".to_string(),
            description: "Get the remaining leave balance of an employee. Lists the options when the name matches several people.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Employee name, possibly misspelled or partial"
                    },
                    "additional_context": {
                        "type": "string",
                        "description": "Department, job title, email or last name used to pick between several matches"
                    }
                },
                "required": ["name"]
            }),
        },
        ToolDefinition {
            name: "apply_leave".to_string(),
            description: "Submit a leave application for an employee. Nothing is recorded unless the name resolves to exactly one person.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "employee_query": {
                        "type": "string",
                        "description": "Employee name, possibly misspelled or partial"
                    },
                    "leave_dates": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Dates of leave, e.g. [\"2024-03-01\", \"2024-03-02\"]"
                    },
                    "additional_context": {
                        "type": "string",
                        "description": "Department, job title, email or last name used to pick between several matches"
                    },
                    "leave_type": {
                        "type": "string",
                        "description": "Kind of leave (default: Annual)"
                    },
                    "reason": {
                        "type": "string",
                        "description": "Optional reason for the leave"
                    }
                },
                "required": ["employee_query", "leave_dates"]
            }),
        },
        ToolDefinition {
            name: "get_employee".to_string(),
            description: "Retrieve the full record of one employee by ID.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "employee_id": {
                        "type": "number",
                        "description": "The employee ID shown next to search results"
                    }
                },
                "required": ["employee_id"]
            }),
        },
        ToolDefinition {
            name: "desk_status".to_string(),
            description: "Return directory and ledger counts plus server runtime statistics.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

/// Dispatches a tool call to the appropriate handler.
///
/// `server_stats` is only consulted by `desk_status`.
pub fn handle_tool_call(
    desk: &LeaveDesk,
    tool_name: &str,
    args: Value,
    server_stats: Option<Value>,
) -> Result<Value> {
    debug!(tool = tool_name, "handling tool call");
    match tool_name {
        "smart_employee_search" => handle_search(desk, args),
        "get_leave_balance" => handle_leave_balance(desk, args),
        "apply_leave" => handle_apply_leave(desk, args),
        "get_employee" => handle_get_employee(desk, args),
        "desk_status" => handle_status(desk, server_stats),
        _ => Err(LeaveDeskError::InvalidInput {
            message: format!("unknown tool: {}", tool_name),
        }),
    }
}

/// Truncates a string to the maximum response character limit, appending
/// a truncation notice if necessary.
fn truncate_response(s: &str) -> String {
    match s.char_indices().nth(MAX_RESPONSE_CHARS) {
        None => s.to_string(),
        Some((end, _)) => format!(
            "{}\n\n[... truncated at {} chars]",
            &s[..end],
            MAX_RESPONSE_CHARS
        ),
    }
}

fn text_response(text: &str) -> Value {
    json!({
        "content": [{ "type": "text", "text": truncate_response(text) }]
    })
}

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| LeaveDeskError::InvalidInput {
            message: format!("missing required parameter: {}", key),
        })
}

fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

/// Renders an outcome, falling back to the not-found or ambiguity replies
/// when the name did not resolve to one employee.
fn render_outcome<T>(outcome: Outcome<T>, done: impl FnOnce(T) -> String) -> String {
    match outcome {
        Outcome::Done(value) => done(value),
        Outcome::NotFound { query } => format_not_found(&query),
        Outcome::Ambiguous {
            message,
            candidates,
        } => format_ambiguous(&message, &candidates),
    }
}

/// Handles `smart_employee_search` tool calls.
fn handle_search(desk: &LeaveDesk, args: Value) -> Result<Value> {
    let query = required_str(&args, "search_query")?;

    let text = match desk.search(query)? {
        SearchOutcome::Found(view) => format_employee_card(&view),
        SearchOutcome::Multiple(views) => format_search_matches(query, &views, false),
        SearchOutcome::Potential(views) => format_search_matches(query, &views, true),
        SearchOutcome::NotFound => format!("No employees found matching '{}'", query),
    };
    Ok(text_response(&text))
}

/// Handles `get_leave_balance` tool calls.
fn handle_leave_balance(desk: &LeaveDesk, args: Value) -> Result<Value> {
    let name = required_str(&args, "name")?;
    let hint = optional_str(&args, "additional_context");

    let text = render_outcome(desk.leave_balance(name, hint)?, |report| {
        format_balance(&report.view, report.balance)
    });
    Ok(text_response(&text))
}

/// Handles `apply_leave` tool calls.
fn handle_apply_leave(desk: &LeaveDesk, args: Value) -> Result<Value> {
    let employee_query = required_str(&args, "employee_query")?;
    let leave_dates: Vec<String> = args
        .get("leave_dates")
        .and_then(|v| v.as_array())
        .ok_or_else(|| LeaveDeskError::InvalidInput {
            message: "missing required parameter: leave_dates".to_string(),
        })?
        .iter()
        .filter_map(|d| d.as_str().map(str::to_string))
        .collect();

    let mut request = LeaveRequest::new(employee_query, leave_dates);
    request.hint = optional_str(&args, "additional_context").map(str::to_string);
    if let Some(leave_type) = optional_str(&args, "leave_type").filter(|t| !t.trim().is_empty()) {
        request.leave_type = leave_type.trim().to_string();
    }
    if let Some(reason) = optional_str(&args, "reason") {
        request.reason = reason.trim().to_string();
    }

    let text = render_outcome(desk.apply_leave(&request)?, |receipt| {
        format_application(&receipt.view, &receipt.application)
    });
    Ok(text_response(&text))
}

/// Handles `get_employee` tool calls.
fn handle_get_employee(desk: &LeaveDesk, args: Value) -> Result<Value> {
    let employee_id = args
        .get("employee_id")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| LeaveDeskError::InvalidInput {
            message: "missing required parameter: employee_id".to_string(),
        })?;

    let text = match desk.employee(employee_id)? {
        Some(view) => format_employee_card(&view),
        None => format!("Employee not found: {}", employee_id),
    };
    Ok(text_response(&text))
}

/// Handles `desk_status` tool calls.
fn handle_status(desk: &LeaveDesk, server_stats: Option<Value>) -> Result<Value> {
    let stats = desk.stats()?;
    let mut output = json!({ "desk": stats });
    if let Some(server) = server_stats {
        output["server"] = server;
    }
    let formatted = serde_json::to_string_pretty(&output)?;
    Ok(text_response(&formatted))
}

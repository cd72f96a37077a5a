//! Callable tool catalog for automation hosts.
//!
//! A tool is a name, a description and a JSON schema for its arguments. Hosts
//! list the [`ToolDefinition`]s, then invoke a tool by name with JSON arguments
//! through [`ToolRegistry::call`]. Tool calls never fail with a Rust error: API
//! failures and bad arguments come back as a [`ToolOutput`] flagged `is_error`.
//!
//! Tools that delete remote data are marked destructive. They are hidden from
//! [`ToolRegistry::definitions`] and refused by [`ToolRegistry::call`] unless the
//! registry was created with deletes allowed (`ALLOW_DELETE_TOOLS=true`).
//!
//! # Examples
//!
//! ```no_run
//! use smartsheet_tools::{config::Config, tools::ToolRegistry};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), smartsheet_tools::Error> {
//! let registry = ToolRegistry::from_config(&Config::from_env()?)?;
//!
//! for tool in registry.definitions() {
//!     println!("{}: {}", tool.name, tool.description);
//! }
//!
//! let output = registry.call("get_webhook", json!({ "webhookId": 42 })).await;
//! if output.is_error {
//!     eprintln!("{}", output.text);
//! }
//! # Ok(())
//! # }
//! ```

mod attachments;
mod columns;
mod cross_sheet;
mod events;
mod export;
mod favorites;
mod groups;
mod reports;
mod rows;
mod shares;
mod summary;
mod templates;
mod webhooks;

use crate::{config::Config, Client};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Map, Value};

/// A tool a host can invoke.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique snake_case name, e.g. `get_webhook`
    pub name: &'static str,
    /// One line shown to the host
    pub description: &'static str,
    /// JSON schema of the arguments object
    pub input_schema: Value,
    /// Deletes remote data; only available when deletes are allowed
    #[serde(skip)]
    pub destructive: bool,
}

/// The text result of a tool call.
///
/// Successful calls carry pretty printed JSON or a short confirmation
/// sentence; failed calls carry `Failed to run <tool>: <reason>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    pub text: String,
    /// Set when the call failed; `text` then holds the reason
    pub is_error: bool,
}

impl ToolOutput {
    /// A successful result.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// A failed result.
    ///
    /// ```
    /// use smartsheet_tools::tools::ToolOutput;
    ///
    /// let output = ToolOutput::error("Unknown tool: nope");
    /// assert!(output.is_error);
    /// assert!(!ToolOutput::text("{}").is_error);
    /// ```
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Why a tool call failed.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool {0} is disabled; set ALLOW_DELETE_TOOLS=true to enable it")]
    Disabled(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(serde_json::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to render result: {0}")]
    Render(serde_json::Error),

    #[error(transparent)]
    Api(#[from] crate::Error),
}

pub(crate) type ToolResult = std::result::Result<String, ToolError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Attachments,
    Columns,
    CrossSheet,
    Events,
    Export,
    Favorites,
    Groups,
    Reports,
    Rows,
    Shares,
    Summary,
    Templates,
    Webhooks,
}

/// The catalog of tools bound to one client.
pub struct ToolRegistry {
    client: Client,
    allow_delete: bool,
    tools: Vec<(Family, ToolDefinition)>,
}

impl ToolRegistry {
    /// Registers every tool family against `client`. Destructive tools are
    /// registered either way but only exposed when `allow_delete` is set.
    pub fn new(client: Client, allow_delete: bool) -> Self {
        let families = [
            (Family::Attachments, attachments::definitions()),
            (Family::Columns, columns::definitions()),
            (Family::CrossSheet, cross_sheet::definitions()),
            (Family::Events, events::definitions()),
            (Family::Export, export::definitions()),
            (Family::Favorites, favorites::definitions()),
            (Family::Groups, groups::definitions()),
            (Family::Reports, reports::definitions()),
            (Family::Rows, rows::definitions()),
            (Family::Shares, shares::definitions()),
            (Family::Summary, summary::definitions()),
            (Family::Templates, templates::definitions()),
            (Family::Webhooks, webhooks::definitions()),
        ];

        let tools = families
            .into_iter()
            .flat_map(|(family, definitions)| {
                definitions
                    .into_iter()
                    .map(move |definition| (family, definition))
            })
            .collect();

        Self {
            client,
            allow_delete,
            tools,
        }
    }

    /// Builds the client and the delete gate from a loaded [`Config`].
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        Ok(Self::new(
            Client::from_config(config)?,
            config.allow_delete_tools,
        ))
    }

    /// Whether destructive tools are enabled.
    pub fn allows_delete(&self) -> bool {
        self.allow_delete
    }

    /// Tools available to the host, destructive ones only when deletes are allowed.
    pub fn definitions(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools
            .iter()
            .map(|(_, definition)| definition)
            .filter(move |definition| self.allow_delete || !definition.destructive)
    }

    /// Looks up an available tool by name.
    pub fn definition(&self, name: &str) -> Option<&ToolDefinition> {
        self.definitions().find(|definition| definition.name == name)
    }

    /// Invokes a tool with a JSON arguments object (`null` counts as `{}`).
    pub async fn call(&self, name: &str, args: Value) -> ToolOutput {
        match self.try_call(name, args).await {
            Ok(text) => ToolOutput::text(text),
            Err(e) => {
                tracing::error!(tool = name, error = %e, "Tool call failed");
                ToolOutput::error(format!("Failed to run {}: {}", name, e))
            }
        }
    }

    async fn try_call(&self, name: &str, args: Value) -> ToolResult {
        let (family, definition) = self
            .tools
            .iter()
            .find(|(_, definition)| definition.name == name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        if definition.destructive && !self.allow_delete {
            return Err(ToolError::Disabled(name.to_string()));
        }

        let args = match args {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        tracing::info!(tool = name, "Calling tool");

        let client = &self.client;
        match family {
            Family::Attachments => attachments::call(client, name, args).await,
            Family::Columns => columns::call(client, name, args).await,
            Family::CrossSheet => cross_sheet::call(client, name, args).await,
            Family::Events => events::call(client, name, args).await,
            Family::Export => export::call(client, name, args).await,
            Family::Favorites => favorites::call(client, name, args).await,
            Family::Groups => groups::call(client, name, args).await,
            Family::Reports => reports::call(client, name, args).await,
            Family::Rows => rows::call(client, name, args).await,
            Family::Shares => shares::call(client, name, args).await,
            Family::Summary => summary::call(client, name, args).await,
            Family::Templates => templates::call(client, name, args).await,
            Family::Webhooks => webhooks::call(client, name, args).await,
        }
    }
}

/// Decodes tool arguments.
pub(crate) fn parse<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(ToolError::InvalidArguments)
}

/// Renders a tool result as pretty JSON.
pub(crate) fn render<T: Serialize>(value: &T) -> ToolResult {
    serde_json::to_string_pretty(value).map_err(ToolError::Render)
}

/// Builds an object schema.
pub(crate) fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

pub(crate) fn tool(name: &'static str, description: &'static str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name,
        description,
        input_schema,
        destructive: false,
    }
}

pub(crate) fn destructive_tool(
    name: &'static str,
    description: &'static str,
    input_schema: Value,
) -> ToolDefinition {
    ToolDefinition {
        destructive: true,
        ..tool(name, description, input_schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn registry(allow_delete: bool) -> ToolRegistry {
        let client = Client::new("token", "http://127.0.0.1:9").unwrap();
        ToolRegistry::new(client, allow_delete)
    }

    #[test]
    fn test_tool_names_are_unique() {
        let registry = registry(true);
        let names: Vec<_> = registry.definitions().map(|d| d.name).collect();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_destructive_tools_hidden_without_delete() {
        let safe = registry(false);
        assert!(safe.definition("delete_webhook").is_none());
        assert!(safe.definition("remove_group_member").is_none());
        assert!(safe.definition("bulk_delete_rows").is_none());
        assert!(safe.definition("delete_sheet_share").is_none());
        assert!(safe.definition("delete_summary_fields").is_none());
        assert!(safe.definition("delete_attachment").is_none());
        assert!(safe.definition("share_sheet").is_some());
        assert!(safe.definition("list_webhooks").is_some());
        assert!(safe.definitions().all(|d| !d.destructive));

        let open = registry(true);
        assert!(open.definition("delete_webhook").is_some());
        assert!(open.definitions().count() > safe.definitions().count());
    }

    #[test]
    fn test_schemas_are_objects() {
        for definition in registry(true).definitions() {
            assert_eq!(definition.input_schema["type"], "object", "{}", definition.name);
            assert!(definition.input_schema["properties"].is_object());
            for required in definition.input_schema["required"].as_array().unwrap() {
                let key = required.as_str().unwrap();
                assert!(
                    definition.input_schema["properties"].get(key).is_some(),
                    "{} requires undeclared {}",
                    definition.name,
                    key
                );
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_and_disabled_tools_report_errors() {
        let registry = registry(false);

        let output = registry.call("drop_everything", Value::Null).await;
        assert!(output.is_error);
        assert!(output.text.contains("Unknown tool"));

        let output = registry
            .call("delete_webhook", json!({ "webhookId": 1 }))
            .await;
        assert!(output.is_error);
        assert!(output.text.contains("ALLOW_DELETE_TOOLS"));
    }

    #[tokio::test]
    async fn test_invalid_arguments_are_reported() {
        let output = registry(false)
            .call("get_webhook", json!({ "webhookId": "not a number" }))
            .await;
        assert!(output.is_error);
        assert!(output.text.contains("Invalid arguments"));
    }
}

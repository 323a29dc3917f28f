//! Tool invocation envelope.
//!
//! Events arrive either in the agent-framework function-call shape
//! (`messageVersion` + `parameters` name/value list) or as flat key/value
//! JSON. Responses mirror the request: wrapped when the event carried a
//! `messageVersion`, a bare `{"TEXT": {"body": ...}}` otherwise.

use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolEvent {
    #[serde(default)]
    pub message_version: Option<String>,
    #[serde(default)]
    pub action_group: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ToolParameter>,
    /// Flat-form events carry their parameters as top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub value: Value,
}

impl ToolEvent {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn function_name(&self) -> &str {
        self.function.as_deref().unwrap_or("")
    }

    fn param_value(&self, name: &str) -> Option<&Value> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
            .or_else(|| self.extra.get(name))
    }

    /// String form of a parameter; non-string JSON values are rendered
    /// compactly. Absent parameters return None, present-but-null too.
    pub fn param(&self, name: &str) -> Option<String> {
        match self.param_value(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Non-empty string parameter.
    pub fn required_param(&self, name: &str) -> Option<String> {
        self.param(name).filter(|v| !v.trim().is_empty())
    }

    pub fn param_u32(&self, name: &str) -> Option<u32> {
        match self.param_value(name)? {
            Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// A formatted text response, rendered wrapped or bare to match the event.
#[derive(Debug, Clone)]
pub struct ToolResponse {
    pub body: String,
    wrapped: bool,
    action_group: String,
    function: String,
    message_version: String,
}

impl ToolResponse {
    pub fn text(event: &ToolEvent, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            wrapped: event.message_version.is_some(),
            action_group: event.action_group.clone().unwrap_or_default(),
            function: event.function.clone().unwrap_or_default(),
            message_version: event
                .message_version
                .clone()
                .unwrap_or_else(|| "1.0".to_string()),
        }
    }

    pub fn to_value(&self) -> Value {
        let response_body = json!({ "TEXT": { "body": self.body } });
        if !self.wrapped {
            return response_body;
        }
        json!({
            "response": {
                "actionGroup": self.action_group,
                "function": self.function,
                "functionResponse": { "responseBody": response_body },
            },
            "messageVersion": self.message_version,
        })
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.to_value())
            .unwrap_or_else(|_| "{\"TEXT\":{\"body\":\"\"}}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::ToolEvent;

    #[test]
    fn parameter_list_takes_precedence_over_flat_fields() {
        let event = ToolEvent::parse(
            r#"{"parameters":[{"name":"q","value":"from-list"}],"q":"from-flat"}"#,
        )
        .unwrap();
        assert_eq!(event.param("q").as_deref(), Some("from-list"));
    }

    #[test]
    fn numeric_parameters_parse_from_strings_and_numbers() {
        let event = ToolEvent::parse(
            r#"{"parameters":[{"name":"a","type":"integer","value":"7"},{"name":"b","value":9}]}"#,
        )
        .unwrap();
        assert_eq!(event.param_u32("a"), Some(7));
        assert_eq!(event.param_u32("b"), Some(9));
        assert_eq!(event.param_u32("missing"), None);
    }
}

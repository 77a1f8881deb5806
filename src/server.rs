// SPDX-License-Identifier: MPL-2.0
//! Parsing of validation messages sent by a backend.
//!
//! A server message is a JSON object whose field names are configurable
//! through [`ServerMessageKeys`]. Entries without text are dropped. Entries
//! without a recognized severity become errors.

use crate::config::ServerMessageKeys;
use crate::notification::{Severity, Variables};
use serde_json::Value;

/// A server-sent entry normalized into emit arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerMessage {
    pub text: String,
    pub severity: Severity,
    pub variables: Variables,
}

impl ServerMessage {
    /// Parses one entry. Returns `None` when the text field is absent or falsy.
    #[must_use]
    pub fn from_value(keys: &ServerMessageKeys, entry: &Value) -> Option<Self> {
        let Some(text) = entry.get(keys.text()).and_then(text_of) else {
            log::trace!("dropping server message without {:?}: {entry}", keys.text());
            return None;
        };

        let severity = match entry.get(keys.severity()) {
            Some(Value::String(token)) => Severity::from_server_token(token),
            _ => Severity::Error,
        };

        let variables = match entry.get(keys.variables()) {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            _ => Variables::new(),
        };

        Some(Self {
            text,
            severity,
            variables,
        })
    }
}

/// Parses every entry, keeping the order and dropping entries without text.
#[must_use]
pub fn parse_server_messages(keys: &ServerMessageKeys, entries: &[Value]) -> Vec<ServerMessage> {
    entries
        .iter()
        .filter_map(|entry| ServerMessage::from_value(keys, entry))
        .collect()
}

/// Returns the messages array under the configured key, if it is a
/// non-empty array.
#[must_use]
pub fn messages_in_body<'a>(keys: &ServerMessageKeys, body: &'a Value) -> Option<&'a [Value]> {
    match body.get(keys.messages()) {
        Some(Value::Array(items)) if !items.is_empty() => Some(items.as_slice()),
        _ => None,
    }
}

/// Text of a present, truthy field. `null`, `false`, `""` and `0` count as
/// absent; other scalars are stringified.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GrowlConfig, Options};
    use serde_json::json;

    fn default_keys() -> ServerMessageKeys {
        ServerMessageKeys::default()
    }

    #[test]
    fn entry_with_text_and_severity_is_parsed() {
        let parsed = parse_server_messages(
            &default_keys(),
            &[json!({"text": "ok", "severity": "success"})],
        );
        assert_eq!(
            parsed,
            vec![ServerMessage {
                text: "ok".into(),
                severity: Severity::Success,
                variables: Variables::new(),
            }]
        );
    }

    #[test]
    fn missing_severity_defaults_to_error() {
        let parsed = parse_server_messages(&default_keys(), &[json!({"text": "bad"})]);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].severity, Severity::Error);
    }

    #[test]
    fn unknown_or_non_string_severity_is_error() {
        let parsed = parse_server_messages(
            &default_keys(),
            &[
                json!({"text": "x", "severity": "bogus"}),
                json!({"text": "y", "severity": 3}),
            ],
        );
        assert!(parsed.iter().all(|m| m.severity == Severity::Error));
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn entries_without_text_are_dropped() {
        let parsed = parse_server_messages(
            &default_keys(),
            &[
                json!({}),
                json!({"text": ""}),
                json!({"text": null, "severity": "info"}),
                json!({"text": false}),
                json!({"text": 0}),
                json!("not an object"),
                json!({"text": "kept", "severity": "warn"}),
            ],
        );
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].text, "kept");
        assert_eq!(parsed[0].severity, Severity::Warning);
    }

    #[test]
    fn numeric_text_is_stringified() {
        let parsed = parse_server_messages(&default_keys(), &[json!({"text": 404})]);
        assert_eq!(parsed[0].text, "404");
    }

    #[test]
    fn variables_are_extracted_only_from_objects() {
        let parsed = parse_server_messages(
            &default_keys(),
            &[
                json!({"text": "a", "variables": {"field": "email"}}),
                json!({"text": "b", "variables": ["field"]}),
            ],
        );
        assert_eq!(parsed[0].variables.get("field"), Some(&json!("email")));
        assert!(parsed[1].variables.is_empty());
    }

    #[test]
    fn custom_keys_are_honored() {
        let config = GrowlConfig::from_options(
            Options::new()
                .message_text_key("msg")
                .message_severity_key("level")
                .message_variable_key("params"),
        );
        let parsed = parse_server_messages(
            config.keys(),
            &[json!({"msg": "Stored", "level": "info", "params": {"n": 2}, "text": "ignored"})],
        );
        assert_eq!(parsed[0].text, "Stored");
        assert_eq!(parsed[0].severity, Severity::Info);
        assert_eq!(parsed[0].variables.get("n"), Some(&json!(2)));
    }

    #[test]
    fn messages_in_body_requires_non_empty_array() {
        let keys = default_keys();
        assert!(messages_in_body(&keys, &json!({"messages": []})).is_none());
        assert!(messages_in_body(&keys, &json!({"messages": "nope"})).is_none());
        assert!(messages_in_body(&keys, &json!({"other": [1]})).is_none());
        assert_eq!(
            messages_in_body(&keys, &json!({"messages": [{"text": "a"}]})).map(<[Value]>::len),
            Some(1)
        );
    }
}

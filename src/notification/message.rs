// SPDX-License-Identifier: MPL-2.0
//! The message value handed to subscribers, and per-call overrides.

use super::severity::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Interpolation variables attached to a message, keyed by name.
pub type Variables = BTreeMap<String, serde_json::Value>;

/// A notification to be rendered by a subscriber.
///
/// Messages carry no identity beyond their fields; the optional
/// `reference_id` lets renderers group related messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    text: String,
    severity: Severity,
    /// Seconds before auto-dismiss. `None` keeps the message until closed.
    ttl: Option<u64>,
    enable_html: bool,
    variables: Variables,
    disable_close_button: bool,
    reference_id: u64,
}

impl Message {
    /// Creates a message with no ttl, escaped text, a close button and
    /// reference id 0.
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity,
            ttl: None,
            enable_html: false,
            variables: Variables::new(),
            disable_close_button: false,
            reference_id: 0,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Option<u64>) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_html(mut self, enable_html: bool) -> Self {
        self.enable_html = enable_html;
        self
    }

    #[must_use]
    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    #[must_use]
    pub fn with_close_button_disabled(mut self, disabled: bool) -> Self {
        self.disable_close_button = disabled;
        self
    }

    #[must_use]
    pub fn with_reference_id(mut self, reference_id: u64) -> Self {
        self.reference_id = reference_id;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the time-to-live in seconds.
    #[must_use]
    pub fn ttl(&self) -> Option<u64> {
        self.ttl
    }

    /// Returns the time-to-live as a [`Duration`].
    #[must_use]
    pub fn ttl_duration(&self) -> Option<Duration> {
        self.ttl.map(Duration::from_secs)
    }

    /// Whether the text should be rendered as HTML rather than escaped.
    #[must_use]
    pub fn enable_html(&self) -> bool {
        self.enable_html
    }

    #[must_use]
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    #[must_use]
    pub fn disable_close_button(&self) -> bool {
        self.disable_close_button
    }

    #[must_use]
    pub fn reference_id(&self) -> u64 {
        self.reference_id
    }
}

/// Per-call overrides for a single emitted message.
///
/// Any field left unset falls back to the service's global defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageOptions {
    pub(crate) ttl: Option<u64>,
    pub(crate) enable_html: Option<bool>,
    pub(crate) disable_close_button: Option<bool>,
    pub(crate) variables: Option<Variables>,
    pub(crate) reference_id: Option<u64>,
}

impl MessageOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the time-to-live (seconds) for this message.
    #[must_use]
    pub fn ttl(mut self, seconds: u64) -> Self {
        self.ttl = Some(seconds);
        self
    }

    #[must_use]
    pub fn enable_html(mut self, enable_html: bool) -> Self {
        self.enable_html = Some(enable_html);
        self
    }

    #[must_use]
    pub fn disable_close_button(mut self, disabled: bool) -> Self {
        self.disable_close_button = Some(disabled);
        self
    }

    /// Replaces all interpolation variables.
    #[must_use]
    pub fn variables(mut self, variables: Variables) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Adds a single interpolation variable.
    #[must_use]
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.variables
            .get_or_insert_with(Variables::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn reference_id(mut self, reference_id: u64) -> Self {
        self.reference_id = Some(reference_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_message_uses_neutral_defaults() {
        let message = Message::new(Severity::Info, "hello");
        assert_eq!(message.text(), "hello");
        assert_eq!(message.severity(), Severity::Info);
        assert_eq!(message.ttl(), None);
        assert!(!message.enable_html());
        assert!(!message.disable_close_button());
        assert!(message.variables().is_empty());
        assert_eq!(message.reference_id(), 0);
    }

    #[test]
    fn ttl_duration_converts_seconds() {
        let message = Message::new(Severity::Success, "saved").with_ttl(Some(4));
        assert_eq!(message.ttl_duration(), Some(Duration::from_secs(4)));
    }

    #[test]
    fn options_builder_collects_variables() {
        let options = MessageOptions::new()
            .variable("name", "report.pdf")
            .variable("count", 3);

        let variables = options.variables.expect("variables should be set");
        assert_eq!(variables.get("name"), Some(&json!("report.pdf")));
        assert_eq!(variables.get("count"), Some(&json!(3)));
    }

    #[test]
    fn message_serializes_with_camel_case_fields() {
        let message = Message::new(Severity::Warning, "careful")
            .with_ttl(Some(2))
            .with_close_button_disabled(true)
            .with_reference_id(7);

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "text": "careful",
                "severity": "warning",
                "ttl": 2,
                "enableHtml": false,
                "variables": {},
                "disableCloseButton": true,
                "referenceId": 7
            })
        );
    }
}

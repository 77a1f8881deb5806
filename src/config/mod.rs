// SPDX-License-Identifier: MPL-2.0
//! Global notification configuration and its TOML persistence.
//!
//! [`GrowlConfig`] holds the defaults every emitted message falls back to.
//! It is changed by layering [`Options`] over it: unset options leave the
//! current value alone, so partial overrides can be applied one after another.
//!
//! # Examples
//!
//! ```no_run
//! use growl::config::{self, GrowlConfig, Options};
//!
//! // Load the user's configuration file, if any
//! let mut config = config::load().unwrap_or_default();
//!
//! // Error messages stay for 10 seconds, everything else keeps its value
//! config.apply(Options::new().ttl_for(growl::Severity::Error, 10));
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::error::{Error, Result};
use crate::notification::Severity;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "growl.toml";
const APP_NAME: &str = "growl";

/// Time-to-live in seconds for each severity. `None` disables auto-dismiss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityTtl {
    pub success: Option<u64>,
    pub error: Option<u64>,
    pub warning: Option<u64>,
    pub info: Option<u64>,
}

impl SeverityTtl {
    /// The same ttl for all four severities.
    #[must_use]
    pub fn uniform(ttl: Option<u64>) -> Self {
        Self {
            success: ttl,
            error: ttl,
            warning: ttl,
            info: ttl,
        }
    }

    #[must_use]
    pub fn get(&self, severity: Severity) -> Option<u64> {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    pub fn set(&mut self, severity: Severity, ttl: Option<u64>) {
        match severity {
            Severity::Success => self.success = ttl,
            Severity::Error => self.error = ttl,
            Severity::Warning => self.warning = ttl,
            Severity::Info => self.info = ttl,
        }
    }

    /// Copies every entry present in `table`, including explicit nulls.
    fn merge(&mut self, table: &TtlTable) {
        for severity in Severity::ALL {
            if let Some(ttl) = table.get(severity) {
                self.set(severity, ttl);
            }
        }
    }
}

/// Partial per-severity ttl override.
///
/// The outer `Option` tells whether a severity is present in the table; the
/// inner one is the ttl itself, so `{ error = null }` turns auto-dismiss off
/// for errors only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtlTable {
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub success: Option<Option<u64>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub error: Option<Option<u64>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub warning: Option<Option<u64>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub info: Option<Option<u64>>,
}

impl TtlTable {
    /// Returns `Some` when `severity` is present in the table.
    #[must_use]
    pub fn get(&self, severity: Severity) -> Option<Option<u64>> {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    pub fn set(&mut self, severity: Severity, ttl: Option<u64>) {
        let slot = match severity {
            Severity::Success => &mut self.success,
            Severity::Error => &mut self.error,
            Severity::Warning => &mut self.warning,
            Severity::Info => &mut self.info,
        };
        *slot = Some(ttl);
    }
}

/// A field that is present deserializes to `Some`, even when it is null.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(Some)
}

/// A ttl override: one value for every severity, or a partial table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TtlOption {
    /// Applies to all severities. `None` turns auto-dismiss off everywhere.
    Uniform(Option<u64>),
    /// Applies only to the severities present in the table.
    PerSeverity(TtlTable),
}

/// Field names looked up in server-sent payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerMessageKeys {
    messages: String,
    text: String,
    severity: String,
    variables: String,
}

impl Default for ServerMessageKeys {
    fn default() -> Self {
        Self {
            messages: defaults::DEFAULT_MESSAGES_KEY.to_string(),
            text: defaults::DEFAULT_MESSAGE_TEXT_KEY.to_string(),
            severity: defaults::DEFAULT_MESSAGE_SEVERITY_KEY.to_string(),
            variables: defaults::DEFAULT_MESSAGE_VARIABLE_KEY.to_string(),
        }
    }
}

impl ServerMessageKeys {
    /// Key of the messages array in a response body.
    #[must_use]
    pub fn messages(&self) -> &str {
        &self.messages
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn severity(&self) -> &str {
        &self.severity
    }

    #[must_use]
    pub fn variables(&self) -> &str {
        &self.variables
    }
}

/// Process-wide notification defaults, read on every emit.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowlConfig {
    pub ttl: SeverityTtl,
    pub enable_html: bool,
    pub disable_close_button: bool,
    keys: ServerMessageKeys,
    pub only_unique_messages: bool,
    pub inline_messages: bool,
    pub position: String,
    pub reference_id: u64,
    /// Maximum number of messages a display stack shows at once.
    pub limit_messages: Option<usize>,
    /// Preferred locale for the Fluent translator.
    pub language: Option<String>,
}

impl Default for GrowlConfig {
    fn default() -> Self {
        Self {
            ttl: SeverityTtl::default(),
            enable_html: defaults::DEFAULT_ENABLE_HTML,
            disable_close_button: defaults::DEFAULT_DISABLE_CLOSE_BUTTON,
            keys: ServerMessageKeys::default(),
            only_unique_messages: defaults::DEFAULT_ONLY_UNIQUE_MESSAGES,
            inline_messages: defaults::DEFAULT_INLINE_MESSAGES,
            position: defaults::DEFAULT_POSITION.to_string(),
            reference_id: defaults::DEFAULT_REFERENCE_ID,
            limit_messages: None,
            language: None,
        }
    }
}

impl GrowlConfig {
    /// Builds a config from the defaults with `options` layered on top.
    #[must_use]
    pub fn from_options(options: Options) -> Self {
        let mut config = Self::default();
        config.apply(options);
        config
    }

    #[must_use]
    pub fn keys(&self) -> &ServerMessageKeys {
        &self.keys
    }

    /// Returns the default ttl for `severity`.
    #[must_use]
    pub fn ttl_for(&self, severity: Severity) -> Option<u64> {
        self.ttl.get(severity)
    }

    /// Layers `options` over the current values. Last writer wins.
    ///
    /// Empty key-name overrides are ignored, since no payload field could
    /// ever match them.
    pub fn apply(&mut self, options: Options) {
        match options.ttl {
            Some(TtlOption::Uniform(ttl)) => self.ttl = SeverityTtl::uniform(ttl),
            Some(TtlOption::PerSeverity(partial)) => self.ttl.merge(&partial),
            None => {}
        }

        if let Some(enable_html) = options.enable_html {
            self.enable_html = enable_html;
        }
        if let Some(disable) = options.disable_close_button {
            self.disable_close_button = disable;
        }

        set_key(&mut self.keys.messages, options.messages_key, "messages_key");
        set_key(&mut self.keys.text, options.message_text_key, "message_text_key");
        set_key(
            &mut self.keys.severity,
            options.message_severity_key,
            "message_severity_key",
        );
        set_key(
            &mut self.keys.variables,
            options.message_variable_key,
            "message_variable_key",
        );

        if let Some(only_unique) = options.only_unique_messages {
            self.only_unique_messages = only_unique;
        }
        if let Some(inline) = options.inline_messages {
            self.inline_messages = inline;
        }
        if let Some(position) = options.position {
            self.position = position;
        }
        match options.limit_messages {
            Some(0) => log::warn!("ignoring limit_messages = 0"),
            Some(limit) => self.limit_messages = Some(limit),
            None => {}
        }
        if let Some(language) = options.language {
            self.language = Some(language);
        }
    }

    /// Table holding the severities that have a ttl. Unset ones are left
    /// out, since `None` is already the default.
    fn ttl_table(&self) -> TtlTable {
        let mut table = TtlTable::default();
        for severity in Severity::ALL {
            if let Some(ttl) = self.ttl.get(severity) {
                table.set(severity, Some(ttl));
            }
        }
        table
    }

    /// Returns options that reproduce this config when applied to defaults.
    #[must_use]
    pub fn to_options(&self) -> Options {
        Options {
            ttl: Some(TtlOption::PerSeverity(self.ttl_table())),
            enable_html: Some(self.enable_html),
            disable_close_button: Some(self.disable_close_button),
            message_variable_key: Some(self.keys.variables.clone()),
            messages_key: Some(self.keys.messages.clone()),
            message_text_key: Some(self.keys.text.clone()),
            message_severity_key: Some(self.keys.severity.clone()),
            only_unique_messages: Some(self.only_unique_messages),
            inline_messages: Some(self.inline_messages),
            position: Some(self.position.clone()),
            limit_messages: self.limit_messages,
            language: self.language.clone(),
        }
    }
}

fn set_key(slot: &mut String, value: Option<String>, name: &str) {
    match value {
        Some(key) if key.is_empty() => {
            log::warn!("ignoring empty {name} override, keeping {slot:?}");
        }
        Some(key) => *slot = key,
        None => {}
    }
}

/// Configuration overrides. Every field is optional; unknown keys are
/// ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    #[serde(alias = "enableHtml", skip_serializing_if = "Option::is_none")]
    pub enable_html: Option<bool>,
    #[serde(alias = "disableCloseButton", skip_serializing_if = "Option::is_none")]
    pub disable_close_button: Option<bool>,
    #[serde(alias = "messageVariableKey", skip_serializing_if = "Option::is_none")]
    pub message_variable_key: Option<String>,
    #[serde(alias = "messagesKey", skip_serializing_if = "Option::is_none")]
    pub messages_key: Option<String>,
    #[serde(alias = "messageTextKey", skip_serializing_if = "Option::is_none")]
    pub message_text_key: Option<String>,
    #[serde(alias = "messageSeverityKey", skip_serializing_if = "Option::is_none")]
    pub message_severity_key: Option<String>,
    #[serde(alias = "onlyUniqueMessages", skip_serializing_if = "Option::is_none")]
    pub only_unique_messages: Option<bool>,
    #[serde(alias = "inlineMessages", skip_serializing_if = "Option::is_none")]
    pub inline_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(alias = "limitMessages", skip_serializing_if = "Option::is_none")]
    pub limit_messages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Kept last so a per-severity table serializes after plain values.
    #[serde(alias = "timeToLive", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<TtlOption>,
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the same ttl (seconds) for every severity.
    #[must_use]
    pub fn ttl(mut self, seconds: u64) -> Self {
        self.ttl = Some(TtlOption::Uniform(Some(seconds)));
        self
    }

    /// Sets the ttl (seconds) of a single severity, keeping any other
    /// per-severity values already set on these options.
    #[must_use]
    pub fn ttl_for(mut self, severity: Severity, seconds: u64) -> Self {
        let mut table = match self.ttl {
            Some(TtlOption::PerSeverity(table)) => table,
            _ => TtlTable::default(),
        };
        table.set(severity, Some(seconds));
        self.ttl = Some(TtlOption::PerSeverity(table));
        self
    }

    /// Disables auto-dismiss for a single severity, keeping any other
    /// per-severity values already set on these options.
    #[must_use]
    pub fn no_ttl_for(mut self, severity: Severity) -> Self {
        let mut table = match self.ttl {
            Some(TtlOption::PerSeverity(table)) => table,
            _ => TtlTable::default(),
        };
        table.set(severity, None);
        self.ttl = Some(TtlOption::PerSeverity(table));
        self
    }

    /// Disables auto-dismiss for every severity.
    #[must_use]
    pub fn no_ttl(mut self) -> Self {
        self.ttl = Some(TtlOption::Uniform(None));
        self
    }

    #[must_use]
    pub fn enable_html(mut self, enable_html: bool) -> Self {
        self.enable_html = Some(enable_html);
        self
    }

    #[must_use]
    pub fn disable_close_button(mut self, disable: bool) -> Self {
        self.disable_close_button = Some(disable);
        self
    }

    #[must_use]
    pub fn message_variable_key(mut self, key: impl Into<String>) -> Self {
        self.message_variable_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn messages_key(mut self, key: impl Into<String>) -> Self {
        self.messages_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn message_text_key(mut self, key: impl Into<String>) -> Self {
        self.message_text_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn message_severity_key(mut self, key: impl Into<String>) -> Self {
        self.message_severity_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn only_unique_messages(mut self, only_unique: bool) -> Self {
        self.only_unique_messages = Some(only_unique);
        self
    }

    #[must_use]
    pub fn inline_messages(mut self, inline: bool) -> Self {
        self.inline_messages = Some(inline);
        self
    }

    #[must_use]
    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    #[must_use]
    pub fn limit_messages(mut self, limit: usize) -> Self {
        self.limit_messages = Some(limit);
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Rejects key-name overrides that are empty.
    pub fn validate(&self) -> Result<()> {
        let keys = [
            ("messages_key", &self.messages_key),
            ("message_text_key", &self.message_text_key),
            ("message_severity_key", &self.message_severity_key),
            ("message_variable_key", &self.message_variable_key),
        ];
        for (name, value) in keys {
            if value.as_deref() == Some("") {
                return Err(Error::Config(format!("{name} must not be empty")));
            }
        }
        if self.limit_messages == Some(0) {
            return Err(Error::Config("limit_messages must be at least 1".into()));
        }
        Ok(())
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the user's config directory, or the
/// defaults when no file exists.
pub fn load() -> Result<GrowlConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(GrowlConfig::default())
}

pub fn save(config: &GrowlConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads [`Options`] from a TOML file and layers them over the defaults.
pub fn load_from_path(path: &Path) -> Result<GrowlConfig> {
    let content = fs::read_to_string(path)?;
    let options: Options = toml::from_str(&content)?;
    options.validate()?;
    Ok(GrowlConfig::from_options(options))
}

pub fn save_to_path(config: &GrowlConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(&config.to_options())?;
    fs::write(path, content)?;
    Ok(())
}

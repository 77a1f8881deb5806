// SPDX-License-Identifier: MPL-2.0
//! The notification service.
//!
//! [`NotificationService`] owns the global [`GrowlConfig`], an [`EventBus`]
//! and an optional [`Translator`]. Each emit call builds one [`Message`]
//! from the per-call [`MessageOptions`] and the global defaults, translates
//! its text, and publishes it before returning.
//!
//! # Usage
//!
//! ```
//! use growl::{MessageOptions, NotificationService, Options};
//!
//! let mut growl = NotificationService::default();
//! growl.configure(Options::new().ttl(5).position("bottom-right"));
//! growl.subscribe_fn(|message| println!("{}: {}", message.severity(), message.text()));
//!
//! growl.success("Profile saved", None);
//! growl.error("Upload failed", Some(MessageOptions::new().ttl(10)));
//! ```

use crate::bus::{EventBus, Subscriber, SubscriptionId};
use crate::config::{GrowlConfig, Options};
use crate::i18n::Translator;
use crate::notification::{Message, MessageOptions, Severity};
use crate::server;

/// Turns emit requests and server payloads into published messages.
#[derive(Default)]
pub struct NotificationService {
    config: GrowlConfig,
    bus: EventBus,
    translator: Option<Box<dyn Translator>>,
}

impl NotificationService {
    /// Creates a service with the given configuration and no subscribers.
    #[must_use]
    pub fn new(config: GrowlConfig) -> Self {
        Self {
            config,
            bus: EventBus::new(),
            translator: None,
        }
    }

    /// Installs a translator applied to every message text.
    #[must_use]
    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Some(Box::new(translator));
        self
    }

    /// Replaces the translator, or removes it with `None` so texts are
    /// published as given.
    pub fn set_translator(&mut self, translator: Option<Box<dyn Translator>>) {
        self.translator = translator;
    }

    /// Layers `options` over the current configuration.
    pub fn configure(&mut self, options: Options) {
        self.config.apply(options);
    }

    #[must_use]
    pub fn config(&self) -> &GrowlConfig {
        &self.config
    }

    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        self.bus.subscribe(subscriber)
    }

    pub fn subscribe_fn(&mut self, f: impl Fn(&Message) + 'static) -> SubscriptionId {
        self.bus.subscribe_fn(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn warning(&self, text: &str, options: Option<MessageOptions>) {
        self.notify(Severity::Warning, text, options);
    }

    pub fn error(&self, text: &str, options: Option<MessageOptions>) {
        self.notify(Severity::Error, text, options);
    }

    pub fn info(&self, text: &str, options: Option<MessageOptions>) {
        self.notify(Severity::Info, text, options);
    }

    pub fn success(&self, text: &str, options: Option<MessageOptions>) {
        self.notify(Severity::Success, text, options);
    }

    /// Builds and publishes one message of `severity`.
    ///
    /// Options set on `options` win over the global defaults for this message
    /// only. Empty text is published as-is.
    pub fn notify(&self, severity: Severity, text: &str, options: Option<MessageOptions>) {
        let message = self.build_message(severity, text, options.unwrap_or_default());
        self.bus.publish(&message);
    }

    /// Emits every server message that carries text. Returns how many were
    /// published.
    pub fn add_server_messages(&self, entries: &[serde_json::Value]) -> usize {
        let parsed = server::parse_server_messages(self.config.keys(), entries);
        let published = parsed.len();
        for entry in parsed {
            let options = MessageOptions::new().variables(entry.variables);
            self.notify(entry.severity, &entry.text, Some(options));
        }
        if published < entries.len() {
            log::debug!(
                "dropped {} of {} server message(s) without text",
                entries.len() - published,
                entries.len()
            );
        }
        published
    }

    /// Whether identical messages should be shown only once.
    #[must_use]
    pub fn is_unique_only(&self) -> bool {
        self.config.only_unique_messages
    }

    /// Whether messages render inline rather than as floating toasts.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.config.inline_messages
    }

    #[must_use]
    pub fn position(&self) -> &str {
        &self.config.position
    }

    fn build_message(&self, severity: Severity, text: &str, options: MessageOptions) -> Message {
        let variables = options.variables.unwrap_or_default();
        let text = match &self.translator {
            Some(translator) => translator.translate(text, &variables),
            None => text.to_string(),
        };

        Message::new(severity, text)
            .with_ttl(options.ttl.or(self.config.ttl_for(severity)))
            .with_html(options.enable_html.unwrap_or(self.config.enable_html))
            .with_close_button_disabled(
                options
                    .disable_close_button
                    .unwrap_or(self.config.disable_close_button),
            )
            .with_reference_id(options.reference_id.unwrap_or(self.config.reference_id))
            .with_variables(variables)
    }
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService")
            .field("config", &self.config)
            .field("bus", &self.bus)
            .field("translator", &self.translator.is_some())
            .finish()
    }
}

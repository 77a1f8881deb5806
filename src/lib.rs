// SPDX-License-Identifier: MPL-2.0
//! `growl` raises transient, severity-tagged notifications for a front-end.
//!
//! Application code (or a response interceptor in front of an HTTP client)
//! emits success, error, warning and info messages through a
//! [`NotificationService`]. The service fills in global defaults, optionally
//! translates the text with Fluent, and publishes each message on a bus that
//! renderers subscribe to.

#![doc(html_root_url = "https://docs.rs/growl/0.1.0")]

pub mod bus;
pub mod config;
pub mod display;
pub mod error;
pub mod i18n;
pub mod interceptor;
pub mod notification;
pub mod server;
pub mod service;

pub use bus::{EventBus, Subscriber, SubscriptionId, GROWL_MESSAGE_EVENT};
pub use config::{GrowlConfig, Options};
pub use i18n::{FluentTranslator, Translator};
pub use interceptor::{HttpResponse, ResponseBody, ServerMessagesInterceptor};
pub use notification::{Message, MessageOptions, Severity, Variables};
pub use service::NotificationService;

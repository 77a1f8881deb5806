// SPDX-License-Identifier: MPL-2.0
//! Notification values published on the bus.
//!
//! A [`Message`] is built once per emit call from the caller's
//! [`MessageOptions`] and the global defaults, then handed to every
//! subscriber as-is.
//!
//! # Components
//!
//! - [`Severity`] - The four severity levels and the server token mapping
//! - [`Message`] - The published value, plus per-call [`MessageOptions`]

mod message;
mod severity;

pub use message::{Message, MessageOptions, Variables};
pub use severity::Severity;

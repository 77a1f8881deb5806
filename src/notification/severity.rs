// SPDX-License-Identifier: MPL-2.0
//! Severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level determines event classification and default styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation completed successfully.
    Success,
    /// Something failed. Also the fallback for unrecognized server severities.
    #[default]
    Error,
    /// Warning that doesn't block the operation.
    Warning,
    /// Informational message.
    Info,
}

impl Severity {
    /// All severities, in configuration order.
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ];

    /// Returns the lowercase name used in serialized messages and config tables.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Maps a severity token sent by a server.
    ///
    /// The mapping is closed: `warn`, `success`, `info` and `error`. Anything
    /// else, including `warning`, resolves to [`Severity::Error`].
    #[must_use]
    pub fn from_server_token(token: &str) -> Self {
        match token {
            "warn" => Severity::Warning,
            "success" => Severity::Success,
            "info" => Severity::Info,
            "error" => Severity::Error,
            other => {
                log::trace!("unrecognized server severity {other:?}, using error");
                Severity::Error
            }
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

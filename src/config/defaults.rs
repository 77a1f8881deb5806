// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for the notification configuration.
//!
//! # Categories
//!
//! - **Display**: Position, uniqueness, inline rendering
//! - **Server payload**: Field names looked up in server-sent messages
//! - **Message**: Per-message defaults

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Default screen position token for the rendering collaborator.
pub const DEFAULT_POSITION: &str = "top-right";

/// Identical messages are shown once by default.
pub const DEFAULT_ONLY_UNIQUE_MESSAGES: bool = true;

/// Messages render as floating toasts unless inline display is enabled.
pub const DEFAULT_INLINE_MESSAGES: bool = false;

// ==========================================================================
// Server Payload Defaults
// ==========================================================================

/// Key of the messages array in a response body.
pub const DEFAULT_MESSAGES_KEY: &str = "messages";

/// Key of the text field in a server message.
pub const DEFAULT_MESSAGE_TEXT_KEY: &str = "text";

/// Key of the severity field in a server message.
pub const DEFAULT_MESSAGE_SEVERITY_KEY: &str = "severity";

/// Key of the interpolation variables in a server message.
pub const DEFAULT_MESSAGE_VARIABLE_KEY: &str = "variables";

// ==========================================================================
// Message Defaults
// ==========================================================================

/// Text is escaped unless HTML is enabled.
pub const DEFAULT_ENABLE_HTML: bool = false;

/// The close button is shown by default.
pub const DEFAULT_DISABLE_CLOSE_BUTTON: bool = false;

/// Reference id attached to messages that don't set one.
pub const DEFAULT_REFERENCE_ID: u64 = 0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(!DEFAULT_POSITION.is_empty());
    assert!(!DEFAULT_MESSAGES_KEY.is_empty());
    assert!(!DEFAULT_MESSAGE_TEXT_KEY.is_empty());
    assert!(!DEFAULT_MESSAGE_SEVERITY_KEY.is_empty());
    assert!(!DEFAULT_MESSAGE_VARIABLE_KEY.is_empty());
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_payload_keys_match_wire_names() {
        assert_eq!(DEFAULT_MESSAGES_KEY, "messages");
        assert_eq!(DEFAULT_MESSAGE_TEXT_KEY, "text");
        assert_eq!(DEFAULT_MESSAGE_SEVERITY_KEY, "severity");
        assert_eq!(DEFAULT_MESSAGE_VARIABLE_KEY, "variables");
    }

    #[test]
    fn display_defaults_are_valid() {
        assert_eq!(DEFAULT_POSITION, "top-right");
        assert!(DEFAULT_ONLY_UNIQUE_MESSAGES);
        assert!(!DEFAULT_INLINE_MESSAGES);
    }
}

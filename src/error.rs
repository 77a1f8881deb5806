// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Translation(TranslationError),
    Payload(String),
}

/// Failures while registering Fluent catalogs.
#[derive(Debug, Clone)]
pub enum TranslationError {
    /// The locale string is not a valid language identifier.
    InvalidLocale(String),

    /// The FTL source failed to parse.
    Parse(String),

    /// A message in the resource is already defined in the bundle.
    Overriding(String),
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::InvalidLocale(locale) => write!(f, "Invalid locale: {}", locale),
            TranslationError::Parse(msg) => write!(f, "Invalid FTL resource: {}", msg),
            TranslationError::Overriding(msg) => write!(f, "Duplicate message: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Translation(e) => write!(f, "Translation Error: {}", e),
            Error::Payload(e) => write!(f, "Payload Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<TranslationError> for Error {
    fn from(err: TranslationError) -> Self {
        Error::Translation(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Payload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn invalid_json_produces_payload_variant() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_error.into();
        assert!(matches!(err, Error::Payload(_)));
    }

    #[test]
    fn translation_error_wraps_into_error() {
        let err: Error = TranslationError::InvalidLocale("??".into()).into();
        assert_eq!(format!("{}", err), "Translation Error: Invalid locale: ??");
    }
}

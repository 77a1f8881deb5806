// SPDX-License-Identifier: MPL-2.0
//! Translation of message text before it is published.
//!
//! The service works without a translator. When one is installed, every
//! message text is passed through it together with the message variables,
//! so applications can emit message ids and let the translator resolve them.
//!
//! # Features
//!
//! - Fluent catalogs, with built-in defaults for `en-US` and `fr`
//! - Locale detection from an explicit choice, the config, or the OS
//! - Unknown ids pass through unchanged, so literal text still works

pub mod fluent;

use crate::config::GrowlConfig;
use crate::notification::Variables;
use unic_langid::LanguageIdentifier;

pub use fluent::FluentTranslator;

/// Locale used when nothing else matches.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Resolves message text (usually a message id) into display text.
pub trait Translator {
    /// Returns the translated text. Implementations return `text` unchanged
    /// when they have no translation for it.
    fn translate(&self, text: &str, variables: &Variables) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &Variables) -> String,
{
    fn translate(&self, text: &str, variables: &Variables) -> String {
        self(text, variables)
    }
}

fn resolve_locale(
    explicit: Option<&str>,
    config: &GrowlConfig,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    // 1. Explicit choice (CLI flag, application setting)
    if let Some(lang_str) = explicit {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    // 2. Config file
    if let Some(lang_str) = &config.language {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    // 3. OS locale
    if let Some(os_locale_str) = sys_locale::get_locale() {
        if let Ok(os_lang) = os_locale_str.parse::<LanguageIdentifier>() {
            if available.contains(&os_lang) {
                return Some(os_lang);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GrowlConfig, Options};

    fn available() -> Vec<LanguageIdentifier> {
        vec!["en-US".parse().unwrap(), "fr".parse().unwrap()]
    }

    #[test]
    fn explicit_locale_wins() {
        let config = GrowlConfig::from_options(Options::new().language("en-US"));
        let lang = resolve_locale(Some("fr"), &config, &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn config_locale_used_without_explicit() {
        let config = GrowlConfig::from_options(Options::new().language("fr"));
        let lang = resolve_locale(None, &config, &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn unavailable_locale_is_skipped() {
        let config = GrowlConfig::default();
        let lang = resolve_locale(Some("de"), &config, &available());
        // Falls through to the OS locale, which is system dependent
        if let Some(l) = lang {
            assert!(available().contains(&l));
        }
    }

    #[test]
    fn closures_are_translators() {
        let upper = |text: &str, _: &Variables| text.to_uppercase();
        assert_eq!(upper.translate("saved", &Variables::new()), "SAVED");
    }
}

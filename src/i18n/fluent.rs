// SPDX-License-Identifier: MPL-2.0
use super::{resolve_locale, Translator, DEFAULT_LOCALE};
use crate::config::GrowlConfig;
use crate::error::{Result, TranslationError};
use crate::notification::Variables;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Fluent-backed translator.
///
/// Lookups try the current locale, then `en-US`. Text that is not a known
/// message id comes back unchanged.
pub struct FluentTranslator {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
    fallback_locale: LanguageIdentifier,
}

impl Default for FluentTranslator {
    fn default() -> Self {
        Self::new(None, &GrowlConfig::default())
    }
}

impl FluentTranslator {
    /// Loads the built-in catalogs and picks a locale from `explicit`, the
    /// config's `language`, or the OS, in that order.
    pub fn new(explicit: Option<&str>, config: &GrowlConfig) -> Self {
        let mut translator = Self::empty();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale_str) = filename.strip_suffix(".ftl") else {
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };
            let source = String::from_utf8_lossy(content.data.as_ref());
            if let Err(err) = translator.add_resource(locale_str, &source) {
                log::warn!("skipping built-in catalog {filename}: {err}");
            }
        }

        if let Some(locale) = resolve_locale(explicit, config, &translator.available_locales) {
            translator.current_locale = locale;
        }
        translator
    }

    /// A translator without any catalog. Every text passes through.
    #[must_use]
    pub fn empty() -> Self {
        let default_locale: LanguageIdentifier = DEFAULT_LOCALE
            .parse()
            .unwrap_or_default();
        Self {
            bundles: HashMap::new(),
            available_locales: Vec::new(),
            current_locale: default_locale.clone(),
            fallback_locale: default_locale,
        }
    }

    /// Adds FTL source to the bundle for `locale`, creating it if needed.
    pub fn add_resource(&mut self, locale: &str, source: &str) -> Result<()> {
        let locale: LanguageIdentifier = locale
            .parse()
            .map_err(|_| TranslationError::InvalidLocale(locale.to_string()))?;

        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            TranslationError::Parse(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

        let bundle = self.bundles.entry(locale.clone()).or_insert_with(|| {
            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            bundle.set_use_isolating(false);
            bundle
        });
        bundle.add_resource(resource).map_err(|errors| {
            TranslationError::Overriding(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

        if !self.available_locales.contains(&locale) {
            self.available_locales.push(locale);
        }
        Ok(())
    }

    /// Switches locale. Returns `false` if no catalog exists for it.
    pub fn set_locale(&mut self, locale: LanguageIdentifier) -> bool {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
            return true;
        }
        false
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    fn format(&self, locale: &LanguageIdentifier, id: &str, args: &FluentArgs) -> Option<String> {
        let bundle = self.bundles.get(locale)?;
        let pattern = bundle.get_message(id)?.value()?;
        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, Some(args), &mut errors);
        if !errors.is_empty() {
            log::warn!("formatting {id:?} for {locale}: {errors:?}");
        }
        Some(value.into_owned())
    }
}

impl Translator for FluentTranslator {
    fn translate(&self, text: &str, variables: &Variables) -> String {
        let args = to_fluent_args(variables);
        self.format(&self.current_locale, text, &args)
            .or_else(|| self.format(&self.fallback_locale, text, &args))
            .unwrap_or_else(|| text.to_string())
    }
}

fn to_fluent_args(variables: &Variables) -> FluentArgs<'_> {
    let mut args = FluentArgs::new();
    for (key, value) in variables {
        let value: FluentValue = match value {
            serde_json::Value::String(s) => FluentValue::from(s.as_str()),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(number) => FluentValue::from(number),
                None => FluentValue::from(n.to_string()),
            },
            other => FluentValue::from(other.to_string()),
        };
        args.set(key.as_str(), value);
    }
    args
}

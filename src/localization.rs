//! # Localization Module
//!
//! Fluent message bundles for user-facing reasons (recipe availability, meal
//! recommendations). English and French resources are compiled into the
//! binary; unsupported languages fall back to English.

use crate::planner_errors::PlannerError;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use lazy_static::lazy_static;
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

/// Languages with bundled resources
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "fr"];

/// Fallback language
pub const DEFAULT_LANGUAGE: &str = "en";

const EN_RESOURCE: &str = include_str!("../locales/en/main.ftl");
const FR_RESOURCE: &str = include_str!("../locales/fr/main.ftl");

/// Localization manager holding one bundle per supported language
pub struct LocalizationManager {
    bundles: HashMap<String, Arc<FluentBundle<FluentResource>>>,
}

impl LocalizationManager {
    /// Create a new localization manager with all bundled languages
    pub fn new() -> Result<Self, PlannerError> {
        let mut bundles = HashMap::new();

        for (language, source) in [("en", EN_RESOURCE), ("fr", FR_RESOURCE)] {
            let locale: LanguageIdentifier = language
                .parse()
                .map_err(|e| PlannerError::Localization(format!("{language}: {e}")))?;
            let bundle = Self::create_bundle(&locale, source)?;
            bundles.insert(language.to_string(), Arc::new(bundle));
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(
        locale: &LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>, PlannerError> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Plain text output, no bidi isolation marks around arguments
        bundle.set_use_isolating(false);

        let resource = match FluentResource::try_new(source.to_string()) {
            Ok(resource) => resource,
            Err((resource, errors)) => {
                warn!("Locale {} has {} syntax errors", locale, errors.len());
                resource
            }
        };

        bundle
            .add_resource(resource)
            .map_err(|errors| PlannerError::Localization(format!("{locale}: {errors:?}")))?;

        Ok(bundle)
    }

    /// Get a localized message in the given language
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = match self
            .bundles
            .get(language)
            .or_else(|| self.bundles.get(DEFAULT_LANGUAGE))
        {
            Some(bundle) => bundle,
            None => return format!("Missing translation: {}", key),
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let fluent_args = args.map(|args| {
            FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))))
        });

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            warn!("Formatting '{}' in '{}' reported {:?}", key, language, errors);
        }

        value.into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, language: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message_in_language(key, language, Some(&args_map))
    }
}

lazy_static! {
    static ref LOCALIZATION_MANAGER: LocalizationManager =
        LocalizationManager::new().expect("Bundled locale resources should be valid");
}

/// Get the shared localization manager
pub fn get_localization_manager() -> &'static LocalizationManager {
    &LOCALIZATION_MANAGER
}

/// Map a language tag such as "fr-CA" to a supported language
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    let Some(code) = language_code else {
        return DEFAULT_LANGUAGE;
    };

    let primary = code
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase();

    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| **lang == primary)
        .copied()
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// Convenience function to get a localized message
pub fn t_lang(key: &str, language_code: Option<&str>) -> String {
    get_localization_manager().get_message_in_language(key, detect_language(language_code), None)
}

/// Convenience function to get a localized message with arguments
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
    get_localization_manager().get_message_with_args(key, detect_language(language_code), args)
}

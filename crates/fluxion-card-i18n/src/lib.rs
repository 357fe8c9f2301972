// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

pub use fluent_bundle::FluentArgs;

/// Translation domains embedded in the binary
const DOMAINS: [&str; 2] = ["editor", "presets"];

/// Supported languages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default)
    #[default]
    English,
    /// German
    German,
}

impl Language {
    /// Get the language identifier string (e.g., "en", "de")
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::German => "de",
        }
    }

    /// Get the language display name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::German => "Deutsch",
        }
    }

    /// List all supported languages
    pub const ALL: [Language; 2] = [Language::English, Language::German];

    /// Parse language from string code
    ///
    /// Home Assistant reports regional codes such as `de-AT`; only the
    /// primary subtag is considered.
    ///
    /// # Errors
    ///
    /// Returns `I18nError::UnsupportedLanguage` if the language code is not supported.
    pub fn from_code(code: &str) -> Result<Self, I18nError> {
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        match primary.to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "de" | "german" | "deutsch" => Ok(Self::German),
            _ => Err(I18nError::UnsupportedLanguage(code.to_owned())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = I18nError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

/// Translation errors
#[derive(Debug, Error)]
pub enum I18nError {
    /// Translation key not found
    #[error("Translation key not found: {0}")]
    KeyNotFound(String),

    /// Failed to load translation resource
    #[error("Failed to load translation resource: {0}")]
    LoadError(String),

    /// Unsupported language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Formatting error
    #[error("Failed to format translation: {0}")]
    FormatError(String),
}

type Bundles = HashMap<&'static str, FluentBundle<FluentResource>>;

/// Translation catalogue for the card editor
///
/// Constructed once per editor session and shared by reference; the active
/// language can be switched at runtime.
pub struct I18n {
    bundles: RwLock<Bundles>,
    language: RwLock<Language>,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("language", &*self.language.read())
            .field("bundles", &"<FluentBundle>")
            .finish()
    }
}

impl I18n {
    /// Create a new i18n instance for the specified language
    ///
    /// # Errors
    ///
    /// Returns `I18nError::LoadError` if translation files cannot be loaded.
    pub fn new(language: Language) -> Result<Self, I18nError> {
        Ok(Self {
            bundles: RwLock::new(Self::load_bundles(language)?),
            language: RwLock::new(language),
        })
    }

    /// Switch the catalogue to another language
    ///
    /// The previous bundles stay in place if loading fails.
    ///
    /// # Errors
    ///
    /// Returns `I18nError::LoadError` if translation files cannot be loaded.
    pub fn set_language(&self, language: Language) -> Result<(), I18nError> {
        if *self.language.read() == language {
            return Ok(());
        }
        let bundles = Self::load_bundles(language)?;
        *self.bundles.write() = bundles;
        *self.language.write() = language;
        Ok(())
    }

    fn load_bundles(language: Language) -> Result<Bundles, I18nError> {
        let mut bundles = HashMap::new();
        for domain in DOMAINS {
            bundles.insert(domain, Self::load_domain(language, domain)?);
        }
        Ok(bundles)
    }

    /// Load a translation domain (e.g., "editor", "presets")
    fn load_domain(
        language: Language,
        domain: &str,
    ) -> Result<FluentBundle<FluentResource>, I18nError> {
        let lang_code = language.code();
        let ftl_content = Self::load_ftl_file(lang_code, domain)?;

        let resource = FluentResource::try_new(ftl_content)
            .map_err(|e| I18nError::LoadError(format!("Failed to parse {domain}.ftl: {e:?}")))?;

        let lang_id: LanguageIdentifier = lang_code
            .parse()
            .map_err(|e| I18nError::LoadError(format!("Invalid language ID: {e}")))?;

        let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
        // Labels end up in form controls, not in bidi-mixed prose
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|e| I18nError::LoadError(format!("Failed to add resource: {e:?}")))?;

        Ok(bundle)
    }

    /// Load FTL file content
    fn load_ftl_file(lang_code: &str, domain: &str) -> Result<String, I18nError> {
        match (lang_code, domain) {
            ("en", "editor") => Ok(include_str!("../locales/en/editor.ftl").to_owned()),
            ("en", "presets") => Ok(include_str!("../locales/en/presets.ftl").to_owned()),
            ("de", "editor") => Ok(include_str!("../locales/de/editor.ftl").to_owned()),
            ("de", "presets") => Ok(include_str!("../locales/de/presets.ftl").to_owned()),
            _ => Err(I18nError::LoadError(format!(
                "Translation file not found: {lang_code}/{domain}.ftl"
            ))),
        }
    }

    /// Get a translated string by key
    ///
    /// # Errors
    ///
    /// Returns `I18nError::KeyNotFound` if the translation key is not found in any domain.
    pub fn get(&self, key: &str) -> Result<String, I18nError> {
        self.format(key, None)
    }

    /// Format a translated string with arguments
    ///
    /// # Errors
    ///
    /// Returns `I18nError::KeyNotFound` if the translation key is not found.
    /// Returns `I18nError::FormatError` if formatting fails.
    pub fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> Result<String, I18nError> {
        let bundles = self.bundles.read();
        for domain in DOMAINS {
            let Some(bundle) = bundles.get(domain) else {
                continue;
            };
            if let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(pattern, args, &mut errors);

                if !errors.is_empty() {
                    return Err(I18nError::FormatError(format!(
                        "Formatting errors: {errors:?}"
                    )));
                }

                return Ok(value.to_string());
            }
        }

        Err(I18nError::KeyNotFound(key.to_owned()))
    }

    /// Translated label, falling back to the key itself
    #[must_use]
    pub fn label(&self, key: &str) -> String {
        self.get(key).unwrap_or_else(|_| key.to_owned())
    }

    /// Get the current language
    #[must_use]
    pub fn language(&self) -> Language {
        *self.language.read()
    }
}

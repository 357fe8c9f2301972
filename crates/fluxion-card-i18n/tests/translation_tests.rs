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

use fluent_bundle::FluentArgs;
use fluxion_card_i18n::{I18n, Language};

/// List of all translation keys that must exist in all languages
const REQUIRED_KEYS: &[&str] = &[
    // Editor - Views
    "editor-main-title",
    "editor-back",
    "editor-item-heading",
    "editor-bars-heading",
    "editor-card-unsupported",
    "editor-add-entity",
    "editor-add-bar",
    "editor-edit-center",
    "editor-move-left",
    "editor-move-right",
    "editor-remove",
    // Editor - Groups
    "group-general",
    "group-value",
    "group-colors",
    "group-secondary-info",
    "group-actions",
    "group-battery",
    "group-grid",
    // Editor - Card fields
    "field-title",
    "field-animation",
    "field-center-type",
    "option-animation-none",
    "option-animation-flash",
    "option-animation-slide",
    "option-center-none",
    "option-center-card",
    "option-center-bars",
    // Editor - Entity fields
    "field-entity",
    "field-preset",
    "field-name",
    "field-icon",
    "field-attribute",
    "field-unit-of-display",
    "field-decimals",
    "field-invert-value",
    "field-display-abs",
    "field-hide-arrows",
    "field-invert-arrow",
    "field-calc-excluded",
    "field-threshold",
    "field-color-threshold",
    "field-icon-color-bigger",
    "field-icon-color-equal",
    "field-icon-color-smaller",
    "field-arrow-color-bigger",
    "field-arrow-color-equal",
    "field-arrow-color-smaller",
    "field-secondary-info-entity",
    "field-secondary-info-attribute",
    "field-secondary-info-replace-name",
    "field-tap-action",
    "field-double-tap-action",
    "field-battery-percentage-entity",
    "field-grid-buy-entity",
    "field-grid-sell-entity",
    // Editor - Bar fields
    "field-color",
    "field-background-color",
    // Presets
    "preset-battery",
    "preset-car-charger",
    "preset-consumer",
    "preset-grid",
    "preset-home",
    "preset-hydro",
    "preset-pool",
    "preset-producer",
    "preset-solar",
    "preset-wind",
    "preset-heating",
    "preset-placeholder",
    "bar-preset-autarky",
    "bar-preset-ratio",
    "bar-preset-none",
];

fn dummy_args() -> FluentArgs<'static> {
    let mut args = FluentArgs::new();
    args.set("position", 1);
    args
}

fn missing_keys(i18n: &I18n) -> Vec<&'static str> {
    REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| i18n.format(key, Some(&dummy_args())).is_err())
        .collect()
}

#[test]
fn test_english_translations_complete() {
    let i18n = I18n::new(Language::English).expect("Failed to load English translations");
    let missing = missing_keys(&i18n);
    assert!(
        missing.is_empty(),
        "Missing English translations for keys: {missing:?}"
    );
}

#[test]
fn test_german_translations_complete() {
    let i18n = I18n::new(Language::German).expect("Failed to load German translations");
    let missing = missing_keys(&i18n);
    assert!(
        missing.is_empty(),
        "Missing German translations for keys: {missing:?}"
    );
}

#[test]
fn test_translations_not_empty() {
    for lang in Language::ALL {
        let i18n = I18n::new(lang).expect("Failed to load translations");

        for key in REQUIRED_KEYS {
            let translation = i18n
                .format(key, Some(&dummy_args()))
                .unwrap_or_else(|_| panic!("Missing key: {key}"));
            assert!(
                !translation.trim().is_empty(),
                "Empty translation for key '{key}' in language {lang:?}"
            );
        }
    }
}

#[test]
fn test_every_preset_has_a_label() {
    let i18n = I18n::new(Language::English).expect("Failed to load English");
    for key in REQUIRED_KEYS.iter().filter(|k| k.starts_with("preset-")) {
        assert_ne!(i18n.label(key), *key, "{key} falls back to the raw key");
    }
}

#[test]
fn test_language_switching() {
    let en = I18n::new(Language::English).expect("Failed to load English");
    let de = I18n::new(Language::German).expect("Failed to load German");

    let key = "editor-back";
    let en_text = en.get(key).expect("Missing English translation");
    let de_text = de.get(key).expect("Missing German translation");

    assert_ne!(en_text, de_text, "English and German translations should differ");
    assert_eq!(en_text, "Back");
}

#[test]
fn test_variable_interpolation() {
    let i18n = I18n::new(Language::German).expect("Failed to load German");
    let mut args = FluentArgs::new();
    args.set("position", 4);

    let text = i18n
        .format("editor-item-heading", Some(&args))
        .expect("Variable interpolation should work");
    assert_eq!(text, "Entität 4");
}

#[test]
fn test_missing_variable_is_reported() {
    let i18n = I18n::new(Language::English).expect("Failed to load English");
    assert!(i18n.get("editor-item-heading").is_err());
}

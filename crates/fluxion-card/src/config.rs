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

//! Reading raw documents from disk and writing resolved configurations

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cli::OutputFormat;

/// Load a JSON or TOML document.
///
/// The extension decides the parser; files without a known extension are
/// tried as JSON first and TOML second.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let document = match extension.as_deref() {
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        Some("toml") => {
            toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?
        }
        Some(_) | None => {
            if let Ok(document) = serde_json::from_str(&text) {
                document
            } else {
                debug!("{} is not JSON, trying TOML", path.display());
                toml::from_str(&text)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
        }
    };

    info!("✅ Loaded {}", path.display());
    Ok(document)
}

/// Render a value in the requested output format
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize as JSON")
        }
        OutputFormat::Toml => toml::to_string_pretty(value).context("Failed to serialize as TOML"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluxion_card_core::resolve;
    use serde_json::{Value, json};
    use std::io::Write;
    use tempfile::{Builder, tempdir};

    #[test]
    fn test_json_and_toml_documents_resolve_identically() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("card.json");
        let toml_path = dir.path().join("card.toml");

        std::fs::write(
            &json_path,
            r#"{"title": "Home", "entities": ["sensor.solar", {"entity": "sensor.grid", "preset": "grid"}]}"#,
        )
        .unwrap();
        std::fs::write(
            &toml_path,
            r#"
title = "Home"
entities = ["sensor.solar", { entity = "sensor.grid", preset = "grid" }]
"#,
        )
        .unwrap();

        let from_json: Value = load_document(&json_path).unwrap();
        let from_toml: Value = load_document(&toml_path).unwrap();
        assert_eq!(resolve(&from_json).unwrap(), resolve(&from_toml).unwrap());
    }

    #[test]
    fn test_unknown_extension_falls_back_to_toml() {
        let mut file = Builder::new().suffix(".card").tempfile().unwrap();
        writeln!(file, "title = \"Garage\"").unwrap();

        let document: Value = load_document(file.path()).unwrap();
        assert_eq!(document, json!({"title": "Garage"}));
    }

    #[test]
    fn test_parse_errors_name_the_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, "{{ not json").unwrap();

        let error = load_document::<Value>(file.path()).unwrap_err();
        assert!(error.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let error = load_document::<Value>(&dir.path().join("absent.json")).unwrap_err();
        assert!(error.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_render_toml() {
        let config = resolve(&json!({"title": "Roof", "entities": ["sensor.pv"]})).unwrap();
        let rendered = render(&config, OutputFormat::Toml).unwrap();
        assert!(rendered.contains("title = \"Roof\""));
        assert!(rendered.contains("entity = \"sensor.pv\""));
    }
}

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

//! Turns the raw host configuration into a fully defaulted [`CardConfig`].
//!
//! Every entity record is layered `base -> preset -> explicit`, key by key
//! and one level deep: an explicit `icon_color` replaces the whole colour set
//! of the layers below it. Bars get the same treatment with the bar tables.

use fluxion_card_types::defaults::{
    bar_base_defaults, bar_preset_defaults, base_defaults, card_defaults, preset_defaults,
};
use fluxion_card_types::{BarPreset, BarSettings, CardConfig, EntitySettings, Preset};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ConfigError;

/// Resolve a raw host configuration
///
/// Idempotent: resolving an already resolved configuration yields an equal
/// configuration.
pub fn resolve(raw: &Value) -> Result<CardConfig, ConfigError> {
    let raw = match raw {
        Value::Object(map) => map,
        other => return Err(ConfigError::NotARecord(kind_of(other))),
    };

    let mut merged = to_layer(&card_defaults(), "card")?;
    for (key, value) in raw {
        // An explicit null leaves the default in place
        if value.is_null() {
            continue;
        }
        let value = match key.as_str() {
            "entities" => Value::Array(resolve_entities(value)?),
            "center" => resolve_center(value)?,
            _ => value.clone(),
        };
        merged.insert(key.clone(), value);
    }

    let config: CardConfig = from_layer(merged, "card")?;
    debug!(
        "Resolved card with {} entities ({} visible)",
        config.entities.len(),
        config.visible_entities().count()
    );
    Ok(config)
}

/// Resolve one entity entry (scalar shorthand or mapping)
pub fn resolve_entity(raw: &Value, path: &str) -> Result<EntitySettings, ConfigError> {
    let explicit = expand_shorthand(raw, path)?;

    let preset = match explicit.get("preset") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(Preset::from_config_value(name).ok_or_else(|| {
            ConfigError::UnknownPreset {
                path: path.to_owned(),
                preset: name.clone(),
            }
        })?),
        Some(other) => {
            return Err(ConfigError::UnknownPreset {
                path: path.to_owned(),
                preset: other.to_string(),
            });
        }
    };

    let mut layers = to_layer(&base_defaults(), path)?;
    if let Some(preset) = preset {
        merge_layer(&mut layers, to_layer(&preset_defaults(preset), path)?);
    }
    merge_layer(&mut layers, explicit);

    if is_unset(layers.get("entity")) && is_unset(layers.get("preset")) {
        layers.insert(
            "preset".to_owned(),
            Value::from(Preset::Placeholder.to_config_value()),
        );
    }

    from_layer(layers, path)
}

/// Resolve one center bar entry (scalar shorthand or mapping)
pub fn resolve_bar(raw: &Value, path: &str) -> Result<BarSettings, ConfigError> {
    let explicit = expand_shorthand(raw, path)?;
    // Bar preset names are validated by deserialization below
    let preset = explicit
        .get("preset")
        .and_then(Value::as_str)
        .and_then(|name| serde_json::from_value::<BarPreset>(Value::from(name)).ok());

    let mut layers = to_layer(&bar_base_defaults(), path)?;
    if let Some(preset) = preset {
        merge_layer(&mut layers, to_layer(&bar_preset_defaults(preset), path)?);
    }
    merge_layer(&mut layers, explicit);

    from_layer(layers, path)
}

/// Overlay `layer` onto `base`, one key at a time
///
/// A null in `layer` counts as unset and keeps the value below it.
pub fn merge_layer(base: &mut Map<String, Value>, layer: Map<String, Value>) {
    for (key, value) in layer {
        if !value.is_null() {
            base.insert(key, value);
        }
    }
}

/// `domain.object_id` as used by Home Assistant
pub fn is_entity_id(value: &str) -> bool {
    let valid = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    };
    value
        .split_once('.')
        .is_some_and(|(domain, object_id)| valid(domain) && valid(object_id))
}

fn resolve_entities(raw: &Value) -> Result<Vec<Value>, ConfigError> {
    let resolved: Vec<EntitySettings> = match raw {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| resolve_entity(item, &format!("entities[{i}]")))
            .collect::<Result<_, _>>()?,
        // Keyed-map form; the key only names the entry
        Value::Object(items) => items
            .iter()
            .map(|(key, item)| resolve_entity(item, &format!("entities.{key}")))
            .collect::<Result<_, _>>()?,
        other => {
            return Err(ConfigError::InvalidEntry {
                path: "entities".to_owned(),
                value: other.to_string(),
            });
        }
    };

    resolved
        .iter()
        .map(|record| to_layer(record, "entities").map(Value::Object))
        .collect()
}

fn resolve_center(raw: &Value) -> Result<Value, ConfigError> {
    let mut center = match raw {
        Value::Null => Map::new(),
        Value::String(kind) => {
            let mut center = Map::new();
            center.insert("type".to_owned(), Value::from(kind.clone()));
            center
        }
        Value::Object(map) => map
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
        other => {
            return Err(ConfigError::InvalidEntry {
                path: "center".to_owned(),
                value: other.to_string(),
            });
        }
    };

    // Card descriptors pass through untouched, bar lists are resolved
    if let Some(Value::Array(items)) = center.get("content") {
        let bars = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let path = format!("center.content[{i}]");
                resolve_bar(item, &path).and_then(|bar| to_layer(&bar, &path).map(Value::Object))
            })
            .collect::<Result<Vec<_>, _>>()?;
        center.insert("content".to_owned(), Value::Array(bars));
    }

    Ok(Value::Object(center))
}

fn expand_shorthand(raw: &Value, path: &str) -> Result<Map<String, Value>, ConfigError> {
    match raw {
        Value::String(entity) if is_entity_id(entity) => {
            let mut map = Map::new();
            map.insert("entity".to_owned(), Value::from(entity.clone()));
            Ok(map)
        }
        Value::Object(map) => Ok(map.clone()),
        other => Err(ConfigError::InvalidEntry {
            path: path.to_owned(),
            value: other.to_string(),
        }),
    }
}

fn is_unset(value: Option<&Value>) -> bool {
    value.is_none_or(Value::is_null)
}

fn to_layer<T: Serialize>(record: &T, path: &str) -> Result<Map<String, Value>, ConfigError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ConfigError::NotARecord(kind_of(&other))),
        Err(source) => Err(ConfigError::InvalidField {
            path: path.to_owned(),
            source,
        }),
    }
}

fn from_layer<T: DeserializeOwned>(layer: Map<String, Value>, path: &str) -> Result<T, ConfigError> {
    serde_json::from_value(Value::Object(layer)).map_err(|source| ConfigError::InvalidField {
        path: path.to_owned(),
        source,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

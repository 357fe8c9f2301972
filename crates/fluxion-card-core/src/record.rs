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

use fluxion_card_types::defaults::{
    bar_base_defaults, bar_preset_defaults, base_defaults, preset_defaults,
};
use fluxion_card_types::{BarPreset, BarSettings, EntitySettings, Preset};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::equality::{deep_equal, same_value};
use crate::error::{EditorError, Result};
use crate::events::SliceUpdate;
use crate::path::FieldPath;
use crate::resolve::merge_layer;

/// Which list a record type lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Entity rows; editing opens a dedicated field editor
    Entities,
    /// Center bars; editing happens inline in the list
    Bars,
}

/// A settings record that can be edited field by field
pub trait SettingsRecord:
    Clone + PartialEq + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Preset: Copy + std::fmt::Debug;

    const KIND: ListKind;

    /// New record for the add button
    fn fresh(preset: Option<Self::Preset>, entity: Option<String>) -> Result<Self>;

    /// Upward message replacing the whole list
    fn list_update(items: Vec<Self>) -> SliceUpdate;

    fn to_map(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(EditorError::InvalidValue {
                path: String::new(),
                reason: format!("record serialized as {other}"),
            }),
        }
    }

    fn from_map(map: Map<String, Value>) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    /// Copy of this record with one field replaced, `None` when the edit
    /// would not change anything
    fn with_field(&self, path: &FieldPath, value: Value) -> Result<Option<Self>> {
        let current = self.to_map()?;
        let unchanged = match path.get(&current) {
            Some(old) => deep_equal(old, &value),
            None => value.is_null(),
        };
        if unchanged {
            return Ok(None);
        }

        let updated = path.with_value(&current, value);
        let record = Self::from_map(updated).map_err(|e| EditorError::InvalidValue {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok((!same_value(self, &record)).then_some(record))
    }
}

/// Stack partial records key by key, later layers win
fn stack<T: SettingsRecord>(layers: &[T]) -> Result<T> {
    let mut merged = Map::new();
    for layer in layers {
        merge_layer(&mut merged, layer.to_map()?);
    }
    T::from_map(merged)
}

impl SettingsRecord for EntitySettings {
    type Preset = Preset;

    const KIND: ListKind = ListKind::Entities;

    fn fresh(preset: Option<Preset>, entity: Option<String>) -> Result<Self> {
        let mut layers = vec![base_defaults()];
        if let Some(preset) = preset {
            layers.push(EntitySettings {
                preset: Some(preset),
                ..preset_defaults(preset)
            });
        }
        let mut record = stack(&layers)?;
        match entity {
            Some(entity) => record.entity = Some(entity),
            None => record.preset = Some(Preset::Placeholder),
        }
        Ok(record)
    }

    fn list_update(items: Vec<Self>) -> SliceUpdate {
        SliceUpdate::Entities(items)
    }
}

impl SettingsRecord for BarSettings {
    type Preset = BarPreset;

    const KIND: ListKind = ListKind::Bars;

    fn fresh(preset: Option<BarPreset>, entity: Option<String>) -> Result<Self> {
        let mut layers = vec![bar_base_defaults()];
        if let Some(preset) = preset {
            layers.push(BarSettings {
                preset: Some(preset),
                ..bar_preset_defaults(preset)
            });
        }
        let mut record = stack(&layers)?;
        record.entity = entity;
        Ok(record)
    }

    fn list_update(items: Vec<Self>) -> SliceUpdate {
        SliceUpdate::Bars(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluxion_card_types::ColorSet;
    use serde_json::json;

    #[test]
    fn test_fresh_entity_without_entity_is_placeholder() {
        let record = EntitySettings::fresh(Some(Preset::Solar), None).unwrap();
        assert_eq!(record.preset, Some(Preset::Placeholder));
        // preset defaults were still layered in
        assert_eq!(record.icon.as_deref(), Some("mdi:solar-power"));
        assert_eq!(record.decimals, Some(2));

        let bare = EntitySettings::fresh(None, None).unwrap();
        assert_eq!(bare.preset, Some(Preset::Placeholder));
        assert!(bare.icon.is_none());
    }

    #[test]
    fn test_fresh_entity_with_preset_and_entity() {
        let record =
            EntitySettings::fresh(Some(Preset::Battery), Some("sensor.bat".to_owned())).unwrap();
        assert_eq!(record.preset, Some(Preset::Battery));
        assert_eq!(record.entity.as_deref(), Some("sensor.bat"));
        assert_eq!(record.name.as_deref(), Some("battery"));
        assert_eq!(record.consumer, Some(true));
    }

    #[test]
    fn test_fresh_bar() {
        let bar = BarSettings::fresh(Some(BarPreset::Autarky), None).unwrap();
        assert_eq!(bar.name.as_deref(), Some("autarky"));
        assert_eq!(bar.preset, Some(BarPreset::Autarky));
        assert!(bar.entity.is_none());
    }

    #[test]
    fn test_with_field_gates_redundant_edits() {
        let record = EntitySettings {
            decimals: Some(1),
            ..EntitySettings::for_entity("sensor.a")
        };
        let path = FieldPath::top("decimals");
        assert!(record.with_field(&path, json!(1)).unwrap().is_none());
        assert!(record.with_field(&path, json!(1.0)).unwrap().is_none());
        assert!(
            record
                .with_field(&FieldPath::top("icon"), Value::Null)
                .unwrap()
                .is_none()
        );

        let updated = record.with_field(&path, json!(3)).unwrap().unwrap();
        assert_eq!(updated.decimals, Some(3));
        assert_eq!(record.decimals, Some(1));
    }

    #[test]
    fn test_with_field_nested() {
        let record = EntitySettings {
            icon_color: Some(ColorSet {
                equal: Some("grey".to_owned()),
                ..ColorSet::default()
            }),
            ..EntitySettings::for_entity("sensor.a")
        };
        let updated = record
            .with_field(&FieldPath::nested("icon_color", "bigger"), json!("red"))
            .unwrap()
            .unwrap();
        let colors = updated.icon_color.unwrap();
        assert_eq!(colors.bigger.as_deref(), Some("red"));
        assert_eq!(colors.equal.as_deref(), Some("grey"));
    }

    #[test]
    fn test_with_field_rejects_wrong_type() {
        let record = EntitySettings::for_entity("sensor.a");
        let err = record
            .with_field(&FieldPath::top("decimals"), json!("many"))
            .unwrap_err();
        assert!(matches!(err, EditorError::InvalidValue { .. }));
    }

    #[test]
    fn test_unknown_fields_land_in_pass_through_map() {
        let record = EntitySettings::for_entity("sensor.a");
        let updated = record
            .with_field(&FieldPath::top("card_mod"), json!({"style": ""}))
            .unwrap()
            .unwrap();
        assert!(updated.extra.contains_key("card_mod"));
    }
}

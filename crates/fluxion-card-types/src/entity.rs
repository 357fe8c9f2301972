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

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::action::ActionConfig;
use crate::color::ColorSet;
use crate::preset::Preset;

/// Settings for one displayed entity
///
/// Every field is optional so the same type doubles as a partial record for
/// the default layers. Unset fields are not serialized, which keeps the host
/// YAML minimal and lets default layers be merged key by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySettings {
    /// Home Assistant entity id; absent means placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Read the value from this attribute instead of the entity state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_abs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_arrows: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert_arrow: Option<bool>,
    /// Exclude this entity from the autarky/ratio bar calculations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calc_excluded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer: Option<bool>,
    /// Values with an absolute value below this are shown as zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<ColorSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_color: Option<ColorSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_info_entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_info_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_info_replace_name: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<ActionConfig>,

    // ============= Preset-specific fields =============
    /// State of charge sensor, only read when `preset = battery`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_percentage_entity: Option<String>,
    /// Grid import sensor, only read when `preset = grid`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_buy_entity: Option<String>,
    /// Grid export sensor, only read when `preset = grid`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_sell_entity: Option<String>,

    /// Keys this version does not know about, kept for the host
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntitySettings {
    /// Shorthand record carrying only an entity reference
    pub fn for_entity(entity: impl Into<String>) -> Self {
        Self {
            entity: Some(entity.into()),
            ..Self::default()
        }
    }

    /// Inert records are skipped by the renderer and by preset-specific
    /// field logic
    pub fn is_inert(&self) -> bool {
        self.preset == Some(Preset::Placeholder) || self.entity.is_none()
    }

    /// Preset that currently governs preset-specific fields, `None` when inert
    pub fn active_preset(&self) -> Option<Preset> {
        if self.is_inert() { None } else { self.preset }
    }
}

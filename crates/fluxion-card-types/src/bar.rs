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
use crate::preset::BarPreset;

/// Settings for one bar of the center panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<BarPreset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<ActionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<ActionConfig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BarSettings {
    pub fn for_entity(entity: impl Into<String>) -> Self {
        Self {
            entity: Some(entity.into()),
            ..Self::default()
        }
    }

    /// Autarky and ratio bars are computed from the entity list and need no
    /// entity of their own
    pub fn is_calculated(&self) -> bool {
        matches!(self.preset, Some(BarPreset::Autarky | BarPreset::Ratio))
    }
}

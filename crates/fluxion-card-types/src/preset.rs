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
use std::fmt;

// ============= Entity Presets =============

/// Named templates for a displayed entity
///
/// A preset supplies default icon/name/flow flags and unlocks the
/// preset-specific extra fields (battery percentage, grid buy/sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Battery,
    CarCharger,
    Consumer,
    Grid,
    Home,
    Hydro,
    Pool,
    Producer,
    Solar,
    Wind,
    Heating,
    /// Inert record, rendered as an empty slot
    Placeholder,
}

impl Preset {
    /// All presets in selector order
    pub const ALL: [Preset; 12] = [
        Preset::Battery,
        Preset::CarCharger,
        Preset::Consumer,
        Preset::Grid,
        Preset::Home,
        Preset::Hydro,
        Preset::Pool,
        Preset::Producer,
        Preset::Solar,
        Preset::Wind,
        Preset::Heating,
        Preset::Placeholder,
    ];

    /// Config string value (snake_case)
    pub fn to_config_value(&self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::CarCharger => "car_charger",
            Self::Consumer => "consumer",
            Self::Grid => "grid",
            Self::Home => "home",
            Self::Hydro => "hydro",
            Self::Pool => "pool",
            Self::Producer => "producer",
            Self::Solar => "solar",
            Self::Wind => "wind",
            Self::Heating => "heating",
            Self::Placeholder => "placeholder",
        }
    }

    /// Parse a config value, `None` for names outside the enumeration
    pub fn from_config_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.to_config_value() == value)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_config_value())
    }
}

// ============= Bar Presets =============

/// Named templates for a center-panel bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarPreset {
    /// Share of consumption covered without grid import
    Autarky,
    /// Share of production consumed on site
    Ratio,
    #[default]
    None,
}

impl BarPreset {
    pub const ALL: [BarPreset; 3] = [BarPreset::Autarky, BarPreset::Ratio, BarPreset::None];

    pub fn to_config_value(&self) -> &'static str {
        match self {
            Self::Autarky => "autarky",
            Self::Ratio => "ratio",
            Self::None => "none",
        }
    }
}

impl fmt::Display for BarPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_config_value())
    }
}

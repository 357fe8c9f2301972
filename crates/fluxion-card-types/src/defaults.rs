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

//! Built-in default layers.
//!
//! Each function returns a *partial* record: only the keys it sets are
//! serialized, so layers can be stacked key by key.

use crate::bar::BarSettings;
use crate::card::{Animation, CardConfig, CenterConfig};
use crate::entity::EntitySettings;
use crate::preset::{BarPreset, Preset};

pub const DEFAULT_DECIMALS: u8 = 2;
pub const DEFAULT_UNIT_OF_DISPLAY: &str = "W";

/// Bottom layer applied to every entity record
pub fn base_defaults() -> EntitySettings {
    EntitySettings {
        decimals: Some(DEFAULT_DECIMALS),
        display_abs: Some(true),
        unit_of_display: Some(DEFAULT_UNIT_OF_DISPLAY.to_owned()),
        name: Some(String::new()),
        ..EntitySettings::default()
    }
}

/// Preset layer, applied on top of [`base_defaults`]
pub fn preset_defaults(preset: Preset) -> EntitySettings {
    let (icon, name, producer, consumer) = match preset {
        Preset::Battery => ("mdi:battery-outline", "battery", true, true),
        Preset::CarCharger => ("mdi:car-electric", "car", false, true),
        Preset::Consumer => ("mdi:lightbulb", "consumer", false, true),
        Preset::Grid => ("mdi:transmission-tower", "grid", true, true),
        Preset::Home => ("mdi:home-assistant", "home", false, true),
        Preset::Hydro => ("mdi:hydro-power", "hydro", true, false),
        Preset::Pool => ("mdi:pool", "pool", false, true),
        Preset::Producer => ("mdi:lightning-bolt-outline", "producer", true, false),
        Preset::Solar => ("mdi:solar-power", "solar", true, false),
        Preset::Wind => ("mdi:wind-turbine", "wind", true, false),
        Preset::Heating => ("mdi:radiator", "heating", false, true),
        Preset::Placeholder => return EntitySettings::default(),
    };

    EntitySettings {
        icon: Some(icon.to_owned()),
        name: Some(name.to_owned()),
        producer: producer.then_some(true),
        consumer: consumer.then_some(true),
        ..EntitySettings::default()
    }
}

/// Preset layer looked up by config name; unknown names give an empty layer
pub fn preset_defaults_named(name: &str) -> EntitySettings {
    Preset::from_config_value(name)
        .map(preset_defaults)
        .unwrap_or_default()
}

/// Bottom layer applied to every bar record
pub fn bar_base_defaults() -> BarSettings {
    BarSettings {
        name: Some(String::new()),
        ..BarSettings::default()
    }
}

/// Bar preset layer, applied on top of [`bar_base_defaults`]
pub fn bar_preset_defaults(preset: BarPreset) -> BarSettings {
    let name = match preset {
        BarPreset::Autarky => "autarky",
        BarPreset::Ratio => "ratio",
        BarPreset::None => return BarSettings::default(),
    };
    BarSettings {
        name: Some(name.to_owned()),
        ..BarSettings::default()
    }
}

/// Card-level defaults applied before the host configuration
pub fn card_defaults() -> CardConfig {
    CardConfig {
        title: Some(String::new()),
        animation: Animation::Flash,
        entities: Vec::new(),
        center: CenterConfig::default(),
        extra: serde_json::Map::new(),
    }
}

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

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bar::BarSettings;
use crate::entity::EntitySettings;

// ============= Card Configuration =============

/// Complete configuration of one power flow card
///
/// Owned by the card editor during a session and by the host otherwise.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub animation: Animation,
    /// Display order; the index is the only identity of a record
    #[serde(default)]
    pub entities: Vec<EntitySettings>,
    #[serde(default)]
    pub center: CenterConfig,
    /// Host keys such as `type: custom:fluxion-card`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CardConfig {
    /// Records the renderer draws, with their list index
    pub fn visible_entities(&self) -> impl Iterator<Item = (usize, &EntitySettings)> {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, record)| !record.is_inert())
    }

    /// Bars of the center panel, empty unless the content is a bar list
    pub fn bars(&self) -> &[BarSettings] {
        self.center.bars()
    }
}

/// Arrow animation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    None,
    #[default]
    Flash,
    Slide,
}

impl Animation {
    pub const ALL: [Animation; 3] = [Animation::None, Animation::Flash, Animation::Slide];

    pub fn to_config_value(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Flash => "flash",
            Self::Slide => "slide",
        }
    }
}

// ============= Center Panel =============

/// What the center panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CenterType {
    #[default]
    None,
    /// A nested Lovelace card
    Card,
    Bars,
}

impl CenterType {
    pub const ALL: [CenterType; 3] = [CenterType::None, CenterType::Card, CenterType::Bars];

    pub fn to_config_value(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Card => "card",
            Self::Bars => "bars",
        }
    }
}

/// Center panel settings
///
/// Changing `kind` leaves `content` alone; content of the other kind stays
/// dormant until the kind is switched back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CenterConfig {
    #[serde(rename = "type", default)]
    pub kind: CenterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<CenterContent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Center content: a bar list or an opaque nested card descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CenterContent {
    Bars(Vec<BarSettings>),
    Card(Map<String, Value>),
}

impl CenterConfig {
    pub fn bars(&self) -> &[BarSettings] {
        match &self.content {
            Some(CenterContent::Bars(bars)) => bars,
            Some(CenterContent::Card(_)) | None => &[],
        }
    }

    pub fn card(&self) -> Option<&Map<String, Value>> {
        match &self.content {
            Some(CenterContent::Card(card)) => Some(card),
            Some(CenterContent::Bars(_)) | None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::Preset;

    #[test]
    fn test_minimal_card_deserializes_with_defaults() {
        let config: CardConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config.animation, Animation::Flash);
        assert!(config.entities.is_empty());
        assert_eq!(config.center.kind, CenterType::None);
        assert!(config.bars().is_empty());
    }

    #[test]
    fn test_center_content_shapes() {
        let bars: CenterConfig = serde_json::from_value(serde_json::json!({
            "type": "bars",
            "content": [{"preset": "autarky"}, {"entity": "sensor.soc", "name": "SoC"}]
        }))
        .unwrap();
        assert_eq!(bars.bars().len(), 2);
        assert!(bars.card().is_none());

        let card: CenterConfig = serde_json::from_value(serde_json::json!({
            "type": "card",
            "content": {"type": "glance", "entities": ["sensor.a"]}
        }))
        .unwrap();
        assert!(card.bars().is_empty());
        assert_eq!(
            card.card().and_then(|c| c.get("type")),
            Some(&serde_json::json!("glance"))
        );
    }

    #[test]
    fn test_visible_entities_skip_inert_records() {
        let config = CardConfig {
            entities: vec![
                EntitySettings::for_entity("sensor.solar"),
                EntitySettings {
                    preset: Some(Preset::Placeholder),
                    ..EntitySettings::default()
                },
                EntitySettings::for_entity("sensor.home"),
            ],
            ..CardConfig::default()
        };
        let visible: Vec<usize> = config.visible_entities().map(|(i, _)| i).collect();
        assert_eq!(visible, vec![0, 2]);
    }

    #[test]
    fn test_host_keys_pass_through() {
        let raw = serde_json::json!({
            "type": "custom:fluxion-card",
            "animation": "slide",
            "entities": [],
            "center": {"type": "none"}
        });
        let config: CardConfig = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(config.animation, Animation::Slide);
        assert_eq!(serde_json::to_value(&config).unwrap(), raw);
    }
}

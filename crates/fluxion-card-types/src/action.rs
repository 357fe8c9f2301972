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

/// Home Assistant tap/double-tap action descriptor
///
/// Produced by the host's action picker. Only the `action` kind is read;
/// every other key (`navigation_path`, `service`, `service_data`, ...) is
/// carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionConfig {
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

fn default_action() -> String {
    "more-info".to_owned()
}

impl ActionConfig {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            params: Map::new(),
        }
    }

    /// True for the explicit "do nothing" action
    pub fn is_none(&self) -> bool {
        self.action == "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_params_pass_through() {
        let raw = serde_json::json!({
            "action": "navigate",
            "navigation_path": "/lovelace/energy"
        });
        let action: ActionConfig = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(action.action, "navigate");
        assert_eq!(serde_json::to_value(&action).unwrap(), raw);
    }

    #[test]
    fn test_missing_action_defaults_to_more_info() {
        let action: ActionConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(action.action, "more-info");
        assert!(ActionConfig::new("none").is_none());
    }
}

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
use std::cmp::Ordering;

/// Three-way colour choice keyed on a value compared against `color_threshold`
///
/// The three slots always exist; an unset slot means "use the neutral colour".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSet {
    /// Colour when the value is above the threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bigger: Option<String>,
    /// Colour when the value equals the threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equal: Option<String>,
    /// Colour when the value is below the threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smaller: Option<String>,
}

impl ColorSet {
    /// Slot names as used in nested field paths (`icon_color.bigger`)
    pub const SLOTS: [&'static str; 3] = ["bigger", "equal", "smaller"];

    /// Pick the colour for `value`, `None` when the matching slot is unset
    /// or the comparison is undefined (NaN)
    pub fn select(&self, value: f64, threshold: f64) -> Option<&str> {
        match value.partial_cmp(&threshold)? {
            Ordering::Greater => self.bigger.as_deref(),
            Ordering::Equal => self.equal.as_deref(),
            Ordering::Less => self.smaller.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bigger.is_none() && self.equal.is_none() && self.smaller.is_none()
    }
}

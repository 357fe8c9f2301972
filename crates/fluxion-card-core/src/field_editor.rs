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

//! Leaf editor for one entity record plus the declarative field lists the
//! form renderer turns into controls.

use fluxion_card_i18n::I18n;
use fluxion_card_types::{
    Animation, BarPreset, BarSettings, CardConfig, CenterType, EntitySettings, Preset,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::events::{EditorSender, SliceUpdate};
use crate::path::FieldPath;
use crate::record::SettingsRecord;

// ============= Descriptors =============

/// One selectable option of a [`FieldKind::Select`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Control kind and its constraints
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Entity picker
    Entity,
    Text,
    Icon,
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: f64,
    },
    Boolean,
    Select { options: Vec<SelectOption> },
    Color,
    /// Host action picker
    Action,
}

/// Section of the form a field is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    General,
    Value,
    Colors,
    SecondaryInfo,
    Actions,
    Battery,
    Grid,
}

impl FieldGroup {
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::General => "group-general",
            Self::Value => "group-value",
            Self::Colors => "group-colors",
            Self::SecondaryInfo => "group-secondary-info",
            Self::Actions => "group-actions",
            Self::Battery => "group-battery",
            Self::Grid => "group-grid",
        }
    }
}

/// Declarative description of one editable field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    #[serde(serialize_with = "serialize_path")]
    pub path: FieldPath,
    pub label: String,
    pub group: FieldGroup,
    #[serde(flatten)]
    pub kind: FieldKind,
}

fn serialize_path<S: serde::Serializer>(path: &FieldPath, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(path)
}

/// Preset-specific field group, unlocked by the record's preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtraFieldGroup {
    Battery,
    Grid,
}

impl ExtraFieldGroup {
    /// Group for the record's current preset; inert records get none
    pub fn for_record(record: &EntitySettings) -> Option<Self> {
        match record.active_preset()? {
            Preset::Battery => Some(Self::Battery),
            Preset::Grid => Some(Self::Grid),
            Preset::CarCharger
            | Preset::Consumer
            | Preset::Home
            | Preset::Hydro
            | Preset::Pool
            | Preset::Producer
            | Preset::Solar
            | Preset::Wind
            | Preset::Heating
            | Preset::Placeholder => None,
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::Battery => &["battery_percentage_entity"],
            Self::Grid => &["grid_buy_entity", "grid_sell_entity"],
        }
    }

    pub fn group(&self) -> FieldGroup {
        match self {
            Self::Battery => FieldGroup::Battery,
            Self::Grid => FieldGroup::Grid,
        }
    }
}

struct FieldTemplate {
    path: &'static str,
    group: FieldGroup,
    kind: fn(&I18n) -> FieldKind,
}

const fn field(
    path: &'static str,
    group: FieldGroup,
    kind: fn(&I18n) -> FieldKind,
) -> FieldTemplate {
    FieldTemplate { path, group, kind }
}

fn entity(_: &I18n) -> FieldKind {
    FieldKind::Entity
}

fn text(_: &I18n) -> FieldKind {
    FieldKind::Text
}

fn icon(_: &I18n) -> FieldKind {
    FieldKind::Icon
}

fn boolean(_: &I18n) -> FieldKind {
    FieldKind::Boolean
}

fn color(_: &I18n) -> FieldKind {
    FieldKind::Color
}

fn action(_: &I18n) -> FieldKind {
    FieldKind::Action
}

fn decimals(_: &I18n) -> FieldKind {
    FieldKind::Number {
        min: Some(0.0),
        max: Some(6.0),
        step: 1.0,
    }
}

fn watts(_: &I18n) -> FieldKind {
    FieldKind::Number {
        min: None,
        max: None,
        step: 1.0,
    }
}

fn presets(i18n: &I18n) -> FieldKind {
    let options = Preset::ALL
        .iter()
        .map(|preset| {
            let value = preset.to_config_value();
            SelectOption {
                value: value.to_owned(),
                label: i18n.label(&format!("preset-{}", value.replace('_', "-"))),
            }
        })
        .collect();
    FieldKind::Select { options }
}

fn bar_presets(i18n: &I18n) -> FieldKind {
    let options = BarPreset::ALL
        .iter()
        .map(|preset| {
            let value = preset.to_config_value();
            SelectOption {
                value: value.to_owned(),
                label: i18n.label(&format!("bar-preset-{value}")),
            }
        })
        .collect();
    FieldKind::Select { options }
}

fn animations(i18n: &I18n) -> FieldKind {
    let options = Animation::ALL
        .iter()
        .map(|animation| {
            let value = animation.to_config_value();
            SelectOption {
                value: value.to_owned(),
                label: i18n.label(&format!("option-animation-{value}")),
            }
        })
        .collect();
    FieldKind::Select { options }
}

fn center_types(i18n: &I18n) -> FieldKind {
    let options = CenterType::ALL
        .iter()
        .map(|kind| {
            let value = kind.to_config_value();
            SelectOption {
                value: value.to_owned(),
                label: i18n.label(&format!("option-center-{value}")),
            }
        })
        .collect();
    FieldKind::Select { options }
}

const ENTITY_FIELDS: &[FieldTemplate] = &[
    field("entity", FieldGroup::General, entity),
    field("preset", FieldGroup::General, presets),
    field("name", FieldGroup::General, text),
    field("icon", FieldGroup::General, icon),
    field("attribute", FieldGroup::General, text),
    field("unit_of_display", FieldGroup::Value, text),
    field("decimals", FieldGroup::Value, decimals),
    field("threshold", FieldGroup::Value, watts),
    field("invert_value", FieldGroup::Value, boolean),
    field("display_abs", FieldGroup::Value, boolean),
    field("hide_arrows", FieldGroup::Value, boolean),
    field("invert_arrow", FieldGroup::Value, boolean),
    field("calc_excluded", FieldGroup::Value, boolean),
    field("color_threshold", FieldGroup::Colors, watts),
    field("icon_color.bigger", FieldGroup::Colors, color),
    field("icon_color.equal", FieldGroup::Colors, color),
    field("icon_color.smaller", FieldGroup::Colors, color),
    field("arrow_color.bigger", FieldGroup::Colors, color),
    field("arrow_color.equal", FieldGroup::Colors, color),
    field("arrow_color.smaller", FieldGroup::Colors, color),
    field("secondary_info_entity", FieldGroup::SecondaryInfo, entity),
    field("secondary_info_attribute", FieldGroup::SecondaryInfo, text),
    field("secondary_info_replace_name", FieldGroup::SecondaryInfo, boolean),
    field("tap_action", FieldGroup::Actions, action),
    field("double_tap_action", FieldGroup::Actions, action),
];

const BAR_FIELDS: &[FieldTemplate] = &[
    field("entity", FieldGroup::General, entity),
    field("preset", FieldGroup::General, bar_presets),
    field("name", FieldGroup::General, text),
    field("color", FieldGroup::Colors, color),
    field("background_color", FieldGroup::Colors, color),
    field("invert_value", FieldGroup::Value, boolean),
    field("tap_action", FieldGroup::Actions, action),
    field("double_tap_action", FieldGroup::Actions, action),
];

const CARD_FIELDS: &[FieldTemplate] = &[
    field("title", FieldGroup::General, text),
    field("animation", FieldGroup::General, animations),
    field("center.type", FieldGroup::General, center_types),
];

fn describe(templates: &[FieldTemplate], i18n: &I18n) -> Vec<FieldDescriptor> {
    templates
        .iter()
        .filter_map(|template| {
            let path = FieldPath::parse(template.path).ok()?;
            Some(FieldDescriptor {
                label: i18n.label(&path.label_key()),
                path,
                group: template.group,
                kind: (template.kind)(i18n),
            })
        })
        .collect()
}

/// Field list for an entity record, including its preset-specific group
pub fn entity_descriptors(record: &EntitySettings, i18n: &I18n) -> Vec<FieldDescriptor> {
    let mut descriptors = describe(ENTITY_FIELDS, i18n);
    if let Some(extra) = ExtraFieldGroup::for_record(record) {
        descriptors.extend(extra.fields().iter().map(|field| {
            let path = FieldPath::top(*field);
            FieldDescriptor {
                label: i18n.label(&path.label_key()),
                path,
                group: extra.group(),
                kind: FieldKind::Entity,
            }
        }));
    }
    descriptors
}

/// Field list for one center bar
pub fn bar_descriptors(_bar: &BarSettings, i18n: &I18n) -> Vec<FieldDescriptor> {
    describe(BAR_FIELDS, i18n)
}

/// Whole-card fields shown on the main view
pub fn card_descriptors(_config: &CardConfig, i18n: &I18n) -> Vec<FieldDescriptor> {
    describe(CARD_FIELDS, i18n)
}

/// Paths of [`card_descriptors`], the only whole-card fields the main form edits
pub fn is_card_field(path: &FieldPath) -> bool {
    CARD_FIELDS
        .iter()
        .any(|template| FieldPath::parse(template.path).is_ok_and(|p| &p == path))
}

// ============= Field editor =============

/// Editor for the entity record at one list index
///
/// Works on a copy of the record and emits whole-record replacements.
#[derive(Debug)]
pub struct FieldEditor {
    index: usize,
    record: EntitySettings,
    outbox: EditorSender,
    i18n: Arc<I18n>,
}

impl FieldEditor {
    pub fn new(index: usize, record: EntitySettings, outbox: EditorSender, i18n: Arc<I18n>) -> Self {
        Self {
            index,
            record,
            outbox,
            i18n,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn record(&self) -> &EntitySettings {
        &self.record
    }

    /// Replace the local copy with the record pushed down by the controller
    pub fn set_record(&mut self, record: EntitySettings) {
        self.record = record;
    }

    /// Apply one reported edit; `path` is `field` or `field.nested`
    pub fn on_field_changed(&mut self, path: &str, raw_value: Value) {
        let path = match FieldPath::parse(path) {
            Ok(path) => path,
            Err(e) => {
                warn!("Rejected edit of record {}: {e}", self.index);
                return;
            }
        };

        match self.record.with_field(&path, raw_value) {
            Ok(Some(record)) => {
                if record.preset != self.record.preset {
                    info!(
                        "Record {} preset changed to {:?}, extra fields: {:?}",
                        self.index,
                        record.preset,
                        ExtraFieldGroup::for_record(&record)
                    );
                }
                self.record = record;
                let update = SliceUpdate::Entity {
                    index: self.index,
                    record: self.record.clone(),
                };
                if let Err(e) = self.outbox.send_update(update) {
                    warn!("Failed to emit record {}: {e}", self.index);
                }
            }
            Ok(None) => debug!("Record {}: {path} unchanged, not emitting", self.index),
            Err(e) => warn!("Rejected edit of record {}: {e}", self.index),
        }
    }

    /// Preset-specific group for the current record
    pub fn extra_group(&self) -> Option<ExtraFieldGroup> {
        ExtraFieldGroup::for_record(&self.record)
    }

    /// Field list for the current record
    pub fn descriptors(&self) -> Vec<FieldDescriptor> {
        entity_descriptors(&self.record, &self.i18n)
    }
}

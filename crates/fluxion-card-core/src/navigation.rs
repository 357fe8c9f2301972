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

//! Top-level card editor: owns the configuration, decides which sub-editor
//! is active and merges their updates back.

use fluxion_card_i18n::{FluentArgs, I18n, I18nError, Language};
use fluxion_card_types::{BarSettings, CardConfig, CenterContent, CenterType, EntitySettings};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::equality::same_value;
use crate::error::{ConfigError, EditorError};
use crate::events::{
    ConfigChangeSender, ConfigChangedEvent, ConfigSection, EditorInbox, EditorMessage,
    EditorSender, SliceUpdate,
};
use crate::field_editor::{FieldDescriptor, FieldEditor, card_descriptors, is_card_field};
use crate::list_editor::{IndexPolicy, ListEditor};
use crate::path::FieldPath;
use crate::resolve::resolve;

/// Which sub-editor is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorView {
    /// Card fields and the entity list
    #[default]
    Main,
    /// Field editor for the entity at this index
    Item(usize),
    /// Center bar list
    Bars,
    /// Nested card, not editable here
    Card,
}

impl fmt::Display for EditorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str("main"),
            Self::Item(index) => write!(f, "item({index})"),
            Self::Bars => f.write_str("bars"),
            Self::Card => f.write_str("card"),
        }
    }
}

/// Session-wide collaborators, built once and shared with every sub-editor
#[derive(Debug, Clone)]
pub struct EditorContext {
    pub i18n: Arc<I18n>,
}

impl EditorContext {
    pub fn new(i18n: Arc<I18n>) -> Self {
        Self { i18n }
    }

    /// Context with a freshly loaded catalogue
    pub fn for_language(language: Language) -> Result<Self, I18nError> {
        Ok(Self::new(Arc::new(I18n::new(language)?)))
    }
}

/// The card editor
///
/// Sub-editors are reached through the `with_*` methods, which drain the
/// message inbox before returning so every interaction completes
/// synchronously.
#[derive(Debug)]
pub struct CardEditor {
    config: CardConfig,
    view: EditorView,
    context: EditorContext,
    outbox: EditorSender,
    inbox: EditorInbox,
    host: ConfigChangeSender,
    entities: ListEditor<EntitySettings>,
    bars: ListEditor<BarSettings>,
    item: Option<FieldEditor>,
}

impl CardEditor {
    /// Editor over an already resolved configuration
    pub fn new(config: CardConfig, context: EditorContext, host: ConfigChangeSender) -> Self {
        let (outbox, inbox) = EditorSender::new();
        let entities = ListEditor::new(
            config.entities.clone(),
            IndexPolicy::ZeroIsUnset,
            outbox.clone(),
        );
        let bars = ListEditor::new(config.bars().to_vec(), IndexPolicy::Explicit, outbox.clone());
        Self {
            config,
            view: EditorView::Main,
            context,
            outbox,
            inbox,
            host,
            entities,
            bars,
            item: None,
        }
    }

    /// Resolve the raw host configuration and open an editor over it
    pub fn from_raw(
        raw: &Value,
        context: EditorContext,
        host: ConfigChangeSender,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(resolve(raw)?, context, host))
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn view(&self) -> EditorView {
        self.view
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    // ============= Active sub-editor access =============

    /// Run `f` on the entity list; only available on the main view
    pub fn with_entities<R>(
        &mut self,
        f: impl FnOnce(&mut ListEditor<EntitySettings>) -> R,
    ) -> Option<R> {
        if self.view != EditorView::Main {
            debug!("Entity list is not active in view {}", self.view);
            return None;
        }
        let result = f(&mut self.entities);
        self.process_messages();
        Some(result)
    }

    /// Run `f` on the field editor; only available on an item view
    pub fn with_item<R>(&mut self, f: impl FnOnce(&mut FieldEditor) -> R) -> Option<R> {
        let Some(item) = self.item.as_mut() else {
            debug!("No field editor in view {}", self.view);
            return None;
        };
        let result = f(item);
        self.process_messages();
        Some(result)
    }

    /// Run `f` on the bar list; only available on the bars view
    pub fn with_bars<R>(&mut self, f: impl FnOnce(&mut ListEditor<BarSettings>) -> R) -> Option<R> {
        if self.view != EditorView::Bars {
            debug!("Bar list is not active in view {}", self.view);
            return None;
        }
        let result = f(&mut self.bars);
        self.process_messages();
        Some(result)
    }

    // ============= Navigation =============

    /// Open the field editor for an entity row
    pub fn edit_item(&mut self, index: usize) {
        self.with_entities(|entities| entities.edit_requested(index));
    }

    /// Return to the main view
    pub fn back(&mut self) {
        if self.view != EditorView::Main {
            info!("⬅️ Leaving {} editor", self.view);
        }
        self.item = None;
        self.view = EditorView::Main;
    }

    /// Enter the editor matching the current center type
    pub fn open_center_editor(&mut self) {
        self.show_center(self.config.center.kind);
    }

    /// Explanatory notice for the nested-card view
    pub fn card_notice(&self) -> Option<String> {
        (self.view == EditorView::Card)
            .then(|| self.context.i18n.label("editor-card-unsupported"))
    }

    /// Localized heading for the active view
    pub fn heading(&self) -> String {
        let i18n = &self.context.i18n;
        match self.view {
            EditorView::Main | EditorView::Card => i18n.label("editor-main-title"),
            EditorView::Bars => i18n.label("editor-bars-heading"),
            EditorView::Item(index) => {
                let mut args = FluentArgs::new();
                args.set("position", index + 1);
                i18n.format("editor-item-heading", Some(&args))
                    .unwrap_or_else(|_| i18n.label("editor-item-heading"))
            }
        }
    }

    // ============= Main form =============

    /// Whole-card fields of the main form
    pub fn main_descriptors(&self) -> Vec<FieldDescriptor> {
        card_descriptors(&self.config, &self.context.i18n)
    }

    /// Edit a whole-card field (`title`, `animation`, `center.type`)
    ///
    /// Only available on the main view; returns whether the form was active.
    pub fn set_field(&mut self, path: &str, value: Value) -> bool {
        if self.view != EditorView::Main {
            debug!("Main form is not active in view {}", self.view);
            return false;
        }
        let path = match FieldPath::parse(path) {
            Ok(path) => path,
            Err(e) => {
                warn!("Rejected card edit: {e}");
                return true;
            }
        };
        let center_type = (path == FieldPath::nested("center", "type"))
            .then(|| serde_json::from_value::<CenterType>(value.clone()).ok())
            .flatten();

        self.merge(SliceUpdate::Field { path, value });

        // Choosing a center type from the main form opens its editor
        if let Some(kind) = center_type
            && self.config.center.kind == kind
        {
            self.show_center(kind);
        }
        true
    }

    // ============= Host side =============

    /// Replace the configuration with one pushed down by the host
    ///
    /// Does not notify the host.
    pub fn set_config(&mut self, config: CardConfig) {
        self.config = config;
        self.push_down();

        match self.view {
            EditorView::Item(index) if index >= self.config.entities.len() => {
                info!("Record {index} vanished, returning to main view");
                self.back();
            }
            EditorView::Bars if self.config.center.kind != CenterType::Bars => self.back(),
            EditorView::Card if self.config.center.kind != CenterType::Card => self.back(),
            EditorView::Main | EditorView::Item(_) | EditorView::Bars | EditorView::Card => {}
        }
    }

    /// Apply every pending sub-editor message
    pub fn process_messages(&mut self) {
        while let Some(message) = self.inbox.try_next() {
            match message {
                EditorMessage::Update(update) => self.merge(update),
                EditorMessage::EditItem(index) => self.open_item(index),
            }
        }
    }

    fn open_item(&mut self, index: usize) {
        let Some(record) = self.config.entities.get(index) else {
            debug!("Edit of stale index {index} ignored");
            return;
        };
        info!("✏️ Editing record {index}");
        self.item = Some(FieldEditor::new(
            index,
            record.clone(),
            self.outbox.clone(),
            Arc::clone(&self.context.i18n),
        ));
        self.view = EditorView::Item(index);
    }

    fn show_center(&mut self, kind: CenterType) {
        self.item = None;
        self.view = match kind {
            CenterType::None => EditorView::Main,
            CenterType::Bars => EditorView::Bars,
            CenterType::Card => EditorView::Card,
        };
        info!("Center editor: {}", self.view);
    }

    /// Merge a slice into the configuration and notify the host when it changed
    fn merge(&mut self, update: SliceUpdate) {
        let merged = match self.merged(update) {
            Ok(Some(config)) => config,
            Ok(None) => return,
            Err(e) => {
                warn!("Rejected editor update: {e}");
                return;
            }
        };

        if same_value(&self.config, &merged) {
            debug!("Update leaves the configuration unchanged, not notifying");
            return;
        }

        let sections = ConfigSection::diff(&self.config, &merged);
        self.config = merged;
        self.push_down();
        info!("💾 Configuration changed: {sections:?}");

        let event = ConfigChangedEvent::new(self.config.clone(), sections);
        if let Err(e) = self.host.send_update(event) {
            warn!("Failed to notify host: {e}");
        }
    }

    fn merged(&self, update: SliceUpdate) -> Result<Option<CardConfig>, EditorError> {
        let mut config = self.config.clone();
        match update {
            SliceUpdate::Entities(entities) => config.entities = entities,
            SliceUpdate::Entity { index, record } => {
                let Some(slot) = config.entities.get_mut(index) else {
                    debug!("Update of stale index {index} ignored");
                    return Ok(None);
                };
                *slot = record;
            }
            SliceUpdate::Bars(bars) => config.center.content = Some(CenterContent::Bars(bars)),
            SliceUpdate::Field { path, value } => {
                if !is_card_field(&path) {
                    return Err(EditorError::UnknownField(path.to_string()));
                }
                let Value::Object(current) = serde_json::to_value(&config)? else {
                    return Err(EditorError::UnknownField(path.to_string()));
                };
                let updated = path.with_value(&current, value);
                config = serde_json::from_value(Value::Object(updated)).map_err(|e| {
                    EditorError::InvalidValue {
                        path: path.to_string(),
                        reason: e.to_string(),
                    }
                })?;
            }
        }
        Ok(Some(config))
    }

    /// Hand every sub-editor a fresh copy of its slice
    fn push_down(&mut self) {
        self.entities.set_items(self.config.entities.clone());
        self.bars.set_items(self.config.bars().to_vec());
        if let Some(item) = self.item.as_mut()
            && let Some(record) = self.config.entities.get(item.index())
        {
            item.set_record(record.clone());
        }
    }
}

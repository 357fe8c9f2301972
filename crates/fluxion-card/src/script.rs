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

//! Scripted editor sessions
//!
//! A script is a list of user actions. Each step goes through the editor
//! exactly as a UI event would, and the host app runs one update after every
//! step so the `CardConfig` resource always reflects what the host received.

use anyhow::{Context, Result};
use bevy_app::App;
use fluxion_card_core::{
    CardEditor, ConfigChangeSender, ConfigRevision, EditorContext, FieldPath,
    FluxionCardHostPlugin,
};
use fluxion_card_i18n::Language;
use fluxion_card_types::{BarPreset, CardConfig, Preset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// One user action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditStep {
    /// Main form field (`title`, `animation`, `center.type`)
    SetCardField { path: String, value: Value },
    AddEntity {
        #[serde(default)]
        preset: Option<Preset>,
        #[serde(default)]
        entity: Option<String>,
    },
    RemoveEntity { index: usize },
    MoveEntity { from: usize, to: usize },
    EditItem { index: usize },
    /// Field of the entity open in the field editor
    SetItemField { path: String, value: Value },
    Back,
    OpenCenter,
    AddBar {
        #[serde(default)]
        preset: Option<BarPreset>,
        #[serde(default)]
        entity: Option<String>,
    },
    RemoveBar { index: usize },
    MoveBar { from: usize, to: usize },
    /// Toggle the inline editor of a bar
    SelectBar { index: usize },
    /// Field of the selected bar
    SetBarField { path: String, value: Value },
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditScript {
    pub steps: Vec<EditStep>,
}

/// Outcome of a replayed session
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Changes the host applied
    pub revision: u64,
    /// View the editor ended in
    pub view: String,
    /// Positions of steps the active view did not accept
    pub skipped: Vec<usize>,
    pub config: CardConfig,
}

/// Editor plus the host app receiving its changes
#[derive(Debug)]
pub struct EditSession {
    editor: CardEditor,
    app: App,
}

impl EditSession {
    pub fn open(raw: &Value, language: Language) -> Result<Self> {
        let context = EditorContext::for_language(language)
            .with_context(|| format!("Failed to load translations for {language}"))?;
        let (host, channel) = ConfigChangeSender::new();
        let editor =
            CardEditor::from_raw(raw, context, host).context("Invalid card configuration")?;

        let mut app = App::new();
        app.add_plugins(FluxionCardHostPlugin::new(channel, editor.config().clone()));

        Ok(Self { editor, app })
    }

    pub fn editor(&self) -> &CardEditor {
        &self.editor
    }

    /// Configuration as last applied by the host
    pub fn host_config(&self) -> &CardConfig {
        self.app.world().resource::<CardConfig>()
    }

    pub fn revision(&self) -> u64 {
        self.app.world().resource::<ConfigRevision>().0
    }

    /// Replay one step, then let the host catch up.
    ///
    /// Returns false when the active view does not offer the action.
    pub fn apply(&mut self, step: &EditStep) -> Result<bool> {
        let editor = &mut self.editor;
        let accepted = match step {
            EditStep::SetCardField { path, value } => editor.set_field(path, value.clone()),
            EditStep::AddEntity { preset, entity } => editor
                .with_entities(|list| list.add(*preset, entity.clone()))
                .is_some(),
            EditStep::RemoveEntity { index } => {
                editor.with_entities(|list| list.remove(*index)).is_some()
            }
            EditStep::MoveEntity { from, to } => editor
                .with_entities(|list| list.move_to(*from, *to))
                .is_some(),
            EditStep::EditItem { index } => editor
                .with_entities(|list| list.edit_requested(*index))
                .is_some(),
            EditStep::SetItemField { path, value } => editor
                .with_item(|item| item.on_field_changed(path, value.clone()))
                .is_some(),
            EditStep::Back => {
                editor.back();
                true
            }
            EditStep::OpenCenter => {
                editor.open_center_editor();
                true
            }
            EditStep::AddBar { preset, entity } => editor
                .with_bars(|bars| bars.add(*preset, entity.clone()))
                .is_some(),
            EditStep::RemoveBar { index } => editor.with_bars(|bars| bars.remove(*index)).is_some(),
            EditStep::MoveBar { from, to } => editor
                .with_bars(|bars| bars.move_to(*from, *to))
                .is_some(),
            EditStep::SelectBar { index } => editor
                .with_bars(|bars| bars.edit_requested(*index))
                .is_some(),
            EditStep::SetBarField { path, value } => {
                let path: FieldPath = path
                    .parse()
                    .with_context(|| format!("Invalid bar field path '{path}'"))?;
                editor
                    .with_bars(|bars| bars.selected_field_changed(&path, value.clone()))
                    .is_some()
            }
        };

        self.app.update();
        Ok(accepted)
    }

    /// Replay a whole script
    pub fn run(mut self, script: &EditScript) -> Result<SessionReport> {
        let mut skipped = Vec::new();
        for (position, step) in script.steps.iter().enumerate() {
            if !self.apply(step)? {
                warn!(
                    "Step {position} ({step:?}) not available in view {}",
                    self.editor().view()
                );
                skipped.push(position);
            }
        }

        info!(
            "🏁 Session finished: {} steps, {} applied changes",
            script.steps.len(),
            self.revision()
        );

        Ok(SessionReport {
            revision: self.revision(),
            view: self.editor().view().to_string(),
            skipped,
            config: self.host_config().clone(),
        })
    }
}

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

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use fluxion_card_types::{BarSettings, CardConfig, EntitySettings};
use serde_json::Value;
use std::collections::HashSet;

use crate::error::EditorError;
use crate::path::FieldPath;

// ============= Editor messages (sub-editor -> controller) =============

/// A fully formed replacement for one slice of the configuration
#[derive(Debug, Clone, PartialEq)]
pub enum SliceUpdate {
    /// Whole entity list
    Entities(Vec<EntitySettings>),
    /// One entity record, addressed by list index
    Entity {
        index: usize,
        record: EntitySettings,
    },
    /// Whole center bar list
    Bars(Vec<BarSettings>),
    /// Whole-card field such as `title` or `center.type`
    Field { path: FieldPath, value: Value },
}

/// Upward message from a sub-editor to the navigation controller
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMessage {
    Update(SliceUpdate),
    /// Open the field editor for the entity at this index
    EditItem(usize),
}

/// Clonable sender handed to every sub-editor at construction
#[derive(Clone)]
pub struct EditorSender {
    sender: Sender<EditorMessage>,
}

/// Controller side of the editor message channel
pub struct EditorInbox {
    receiver: Receiver<EditorMessage>,
}

impl std::fmt::Debug for EditorSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSender").finish_non_exhaustive()
    }
}

impl std::fmt::Debug for EditorInbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorInbox")
            .field("pending", &self.receiver.len())
            .finish()
    }
}

impl EditorSender {
    /// Create a new sender/inbox pair
    pub fn new() -> (Self, EditorInbox) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self { sender }, EditorInbox { receiver })
    }

    pub fn send(&self, message: EditorMessage) -> Result<(), EditorError> {
        self.sender
            .send(message)
            .map_err(|_| EditorError::ChannelClosed)
    }

    pub fn send_update(&self, update: SliceUpdate) -> Result<(), EditorError> {
        self.send(EditorMessage::Update(update))
    }
}

impl EditorInbox {
    /// Next pending message, `None` when the inbox is empty
    pub fn try_next(&self) -> Option<EditorMessage> {
        match self.receiver.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

// ============= Host notifications (controller -> host) =============

/// Parts of the card configuration an accepted edit touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    /// Title, animation and pass-through keys
    General,
    /// Entity list
    Entities,
    /// Center panel type and content
    Center,
}

impl ConfigSection {
    pub const ALL: [ConfigSection; 3] = [
        ConfigSection::General,
        ConfigSection::Entities,
        ConfigSection::Center,
    ];

    /// Sections that differ between two configurations
    pub fn diff(old: &CardConfig, new: &CardConfig) -> HashSet<ConfigSection> {
        let mut sections = HashSet::new();
        if old.title != new.title || old.animation != new.animation || old.extra != new.extra {
            sections.insert(ConfigSection::General);
        }
        if old.entities != new.entities {
            sections.insert(ConfigSection::Entities);
        }
        if old.center != new.center {
            sections.insert(ConfigSection::Center);
        }
        sections
    }
}

/// Sent to the host once per accepted edit, carrying the complete configuration
#[derive(Event, Debug, Clone)]
pub struct ConfigChangedEvent {
    /// New configuration, replaces the host copy wholesale
    pub config: CardConfig,
    /// Sections that changed
    pub changed_sections: HashSet<ConfigSection>,
}

impl ConfigChangedEvent {
    pub fn new(config: CardConfig, changed_sections: HashSet<ConfigSection>) -> Self {
        Self {
            config,
            changed_sections,
        }
    }

    /// Event marking every section as changed
    pub fn full_update(config: CardConfig) -> Self {
        Self {
            config,
            changed_sections: ConfigSection::ALL.into_iter().collect(),
        }
    }

    pub fn section_changed(&self, section: ConfigSection) -> bool {
        self.changed_sections.contains(&section)
    }
}

/// Host side of the configuration-changed channel
#[derive(Resource, Debug, Clone)]
pub struct ConfigChangeChannel {
    pub receiver: Receiver<ConfigChangedEvent>,
}

/// Clonable sender for configuration-changed notifications
#[derive(Clone)]
pub struct ConfigChangeSender {
    sender: Sender<ConfigChangedEvent>,
}

impl std::fmt::Debug for ConfigChangeSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigChangeSender").finish_non_exhaustive()
    }
}

impl ConfigChangeSender {
    /// Create a new sender/receiver pair
    pub fn new() -> (Self, ConfigChangeChannel) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self { sender }, ConfigChangeChannel { receiver })
    }

    /// Send a configuration-changed event
    pub fn send_update(&self, event: ConfigChangedEvent) -> Result<(), EditorError> {
        self.sender
            .send(event)
            .map_err(|_| EditorError::ChannelClosed)
    }
}

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

//! Host side of the editor: applies configuration-changed events to the
//! `CardConfig` resource of a bevy app.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use fluxion_card_types::CardConfig;
use tracing::{debug, info};

use crate::equality::same_value;
use crate::events::ConfigChangeChannel;

/// Number of configuration changes applied since startup
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigRevision(pub u64);

/// Registers the host resources and the change handler
#[derive(Debug)]
pub struct FluxionCardHostPlugin {
    channel: ConfigChangeChannel,
    initial: CardConfig,
}

impl FluxionCardHostPlugin {
    pub fn new(channel: ConfigChangeChannel, initial: CardConfig) -> Self {
        Self { channel, initial }
    }
}

impl Plugin for FluxionCardHostPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.channel.clone())
            .insert_resource(self.initial.clone())
            .init_resource::<ConfigRevision>()
            .add_systems(Update, config_change_handler);
    }
}

/// Drain pending configuration-changed events into the `CardConfig` resource
pub fn config_change_handler(
    channel: Res<ConfigChangeChannel>,
    mut config: ResMut<CardConfig>,
    mut revision: ResMut<ConfigRevision>,
) {
    while let Ok(event) = channel.receiver.try_recv() {
        if same_value(&*config, &event.config) {
            debug!("Configuration event without changes skipped");
            continue;
        }

        *config = event.config;
        revision.0 += 1;
        info!(
            "🔄 Applied card configuration revision {} ({} sections changed)",
            revision.0,
            event.changed_sections.len()
        );
    }
}

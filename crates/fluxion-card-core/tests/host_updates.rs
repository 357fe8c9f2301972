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

//! Integration tests for configuration-changed events
//!
//! This tests the full flow: editor -> ConfigChangedEvent -> ECS -> CardConfig resource

use bevy_app::App;
use bevy_ecs::system::RunSystemOnce;
use fluxion_card_core::{
    CardEditor, ConfigChangeSender, ConfigRevision, EditorContext, FluxionCardHostPlugin,
    config_change_handler,
};
use fluxion_card_i18n::Language;
use fluxion_card_types::{Animation, CardConfig, Preset};
use serde_json::json;

fn session(raw: serde_json::Value) -> (App, CardEditor) {
    let (host, channel) = ConfigChangeSender::new();
    let context = EditorContext::for_language(Language::English).expect("Failed to load English");
    let editor = CardEditor::from_raw(&raw, context, host).expect("Failed to resolve config");

    let mut app = App::new();
    app.add_plugins(FluxionCardHostPlugin::new(channel, editor.config().clone()));
    (app, editor)
}

#[test]
fn test_editor_changes_reach_host_resource() {
    let (mut app, mut editor) = session(json!({"entities": ["sensor.solar", "sensor.home"]}));

    editor.edit_item(0);
    editor.with_item(|item| item.on_field_changed("preset", json!("solar")));
    editor.back();
    editor.set_field("animation", json!("slide"));

    app.world_mut()
        .run_system_once(config_change_handler)
        .expect("Failed to run config change handler");

    let config = app.world().resource::<CardConfig>();
    assert_eq!(config, editor.config());
    assert_eq!(config.entities[0].preset, Some(Preset::Solar));
    assert_eq!(config.animation, Animation::Slide);
    assert_eq!(app.world().resource::<ConfigRevision>().0, 2);
}

#[test]
fn test_redundant_edits_do_not_bump_revision() {
    let (mut app, mut editor) = session(json!({"title": "PV", "entities": ["sensor.solar"]}));

    editor.set_field("title", json!("PV"));
    editor.with_entities(|list| list.remove(0));
    editor.with_entities(|list| list.move_to(0, 0));

    app.update();
    assert_eq!(app.world().resource::<ConfigRevision>().0, 0);
}

#[test]
fn test_host_keeps_last_configuration() {
    let (mut app, mut editor) = session(json!({}));

    for title in ["one", "two", "three"] {
        editor.set_field("title", json!(title));
    }
    app.update();

    assert_eq!(
        app.world().resource::<CardConfig>().title.as_deref(),
        Some("three")
    );
    assert_eq!(app.world().resource::<ConfigRevision>().0, 3);
}

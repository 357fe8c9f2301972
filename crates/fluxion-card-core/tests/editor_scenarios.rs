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

//! End-to-end editor sessions: raw config -> CardEditor -> host notifications

use fluxion_card_core::{
    CardEditor, ConfigChangeChannel, ConfigChangeSender, ConfigChangedEvent, EditorContext,
    EditorView, ExtraFieldGroup, resolve,
};
use fluxion_card_i18n::Language;
use fluxion_card_types::{EntitySettings, Preset};
use serde_json::{Value, json};

fn open(raw: Value) -> (CardEditor, ConfigChangeChannel) {
    // RUST_LOG=debug shows suppressed and stale edits
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let (host, channel) = ConfigChangeSender::new();
    let context = EditorContext::for_language(Language::English).expect("Failed to load English");
    let editor = CardEditor::from_raw(&raw, context, host).expect("Failed to resolve config");
    (editor, channel)
}

fn drain(channel: &ConfigChangeChannel) -> Vec<ConfigChangedEvent> {
    channel.receiver.try_iter().collect()
}

#[test]
fn test_keyed_map_entity_shorthand() {
    let config = resolve(&json!({"entities": {"solar": "sensor.solar"}})).unwrap();

    assert_eq!(config.entities.len(), 1);
    let solar = &config.entities[0];
    assert_eq!(solar.entity.as_deref(), Some("sensor.solar"));
    assert_eq!(solar.preset, None);
    assert_eq!(solar.decimals, Some(2));
    assert_eq!(solar.unit_of_display.as_deref(), Some("W"));
}

#[test]
fn test_keyed_map_keeps_declaration_order() {
    let config = resolve(&json!({
        "entities": {
            "solar": "sensor.solar",
            "grid": {"entity": "sensor.grid", "preset": "grid"},
            "home": "sensor.home"
        }
    }))
    .unwrap();
    let ids: Vec<_> = config
        .entities
        .iter()
        .filter_map(|r| r.entity.as_deref())
        .collect();
    assert_eq!(ids, vec!["sensor.solar", "sensor.grid", "sensor.home"]);
}

#[test]
fn test_add_without_preset_or_entity_gives_placeholder() {
    let (mut editor, channel) = open(json!({"entities": ["sensor.a"]}));
    editor.with_entities(|list| list.add(None, None));

    let events = drain(&channel);
    assert_eq!(events.len(), 1);
    let added = &events[0].config.entities[1];
    assert_eq!(added.preset, Some(Preset::Placeholder));
    assert!(added.is_inert());
    assert_eq!(editor.config().visible_entities().count(), 1);
}

#[test]
fn test_edit_item_then_back() {
    let (mut editor, _channel) = open(json!({
        "entities": ["sensor.a", "sensor.b", "sensor.c", "sensor.d"]
    }));
    assert_eq!(editor.view(), EditorView::Main);

    editor.edit_item(2);
    assert_eq!(editor.view(), EditorView::Item(2));
    assert_eq!(
        editor
            .with_item(|item| item.record().entity.clone())
            .flatten()
            .as_deref(),
        Some("sensor.c")
    );

    editor.back();
    assert_eq!(editor.view(), EditorView::Main);
}

#[test]
fn test_remove_first_entity_is_ignored() {
    let (mut editor, channel) = open(json!({"entities": ["sensor.a", "sensor.b"]}));
    editor.with_entities(|list| list.remove(0));

    assert!(drain(&channel).is_empty());
    assert_eq!(editor.config().entities.len(), 2);
}

#[test]
fn test_nested_color_edits_keep_other_slots() {
    let (mut editor, channel) = open(json!({
        "entities": [{"entity": "sensor.pv", "icon_color": {"equal": "grey"}}]
    }));
    editor.edit_item(0);
    editor.with_item(|item| item.on_field_changed("icon_color.bigger", json!("red")));
    editor.with_item(|item| item.on_field_changed("icon_color.smaller", json!("green")));

    let colors = editor.config().entities[0]
        .icon_color
        .clone()
        .expect("icon colors are set");
    assert_eq!(colors.bigger.as_deref(), Some("red"));
    assert_eq!(colors.equal.as_deref(), Some("grey"));
    assert_eq!(colors.smaller.as_deref(), Some("green"));
    assert_eq!(drain(&channel).len(), 2);
}

#[test]
fn test_preset_specific_fields_follow_preset() {
    let (mut editor, _channel) = open(json!({
        "entities": [{"entity": "sensor.battery", "preset": "battery"}]
    }));
    editor.edit_item(0);
    assert_eq!(
        editor.with_item(|item| item.extra_group()).flatten(),
        Some(ExtraFieldGroup::Battery)
    );

    editor.with_item(|item| item.on_field_changed("preset", json!("grid")));
    let paths: Vec<String> = editor
        .with_item(|item| item.descriptors())
        .unwrap_or_default()
        .iter()
        .map(|d| d.path.to_string())
        .collect();
    assert!(paths.contains(&"grid_buy_entity".to_owned()));
    assert!(paths.contains(&"grid_sell_entity".to_owned()));
    assert!(!paths.contains(&"battery_percentage_entity".to_owned()));
}

#[test]
fn test_drag_reorder_then_edit_uses_new_positions() {
    let (mut editor, channel) = open(json!({"entities": ["sensor.a", "sensor.b", "sensor.c"]}));
    editor.with_entities(|list| list.move_to(2, 0));
    editor.edit_item(0);
    editor.with_item(|item| item.on_field_changed("name", json!("Moved")));

    let entities = &editor.config().entities;
    assert_eq!(entities[0].entity.as_deref(), Some("sensor.c"));
    assert_eq!(entities[0].name.as_deref(), Some("Moved"));
    assert_eq!(drain(&channel).len(), 2);
}

#[test]
fn test_every_event_carries_complete_config() {
    let (mut editor, channel) = open(json!({
        "type": "custom:fluxion-card",
        "title": "Home",
        "entities": ["sensor.a"],
        "center": {"type": "bars", "content": [{"preset": "ratio"}]}
    }));
    editor.set_field("animation", json!("none"));

    let events = drain(&channel);
    assert_eq!(events.len(), 1);
    let config = &events[0].config;
    assert_eq!(config.title.as_deref(), Some("Home"));
    assert_eq!(config.entities.len(), 1);
    assert_eq!(config.bars().len(), 1);
    assert_eq!(config.extra.get("type"), Some(&json!("custom:fluxion-card")));
}

#[test]
fn test_bar_editing_round() {
    let (mut editor, channel) = open(json!({
        "center": {"type": "bars", "content": ["sensor.soc", {"preset": "autarky"}]}
    }));
    editor.open_center_editor();
    assert_eq!(editor.view(), EditorView::Bars);

    editor.with_bars(|bars| {
        bars.edit_requested(0);
        bars.selected_field_changed(
            &"background_color".parse().expect("valid path"),
            json!("#202020"),
        );
        bars.move_right(0);
    });

    let bars = editor.config().bars();
    assert_eq!(bars[0].name.as_deref(), Some("autarky"));
    assert_eq!(bars[1].background_color.as_deref(), Some("#202020"));
    assert_eq!(drain(&channel).len(), 2);
}

#[test]
fn test_host_push_down_keeps_editor_consistent() {
    let (mut editor, channel) = open(json!({"entities": ["sensor.a"]}));
    let mut pushed = editor.config().clone();
    pushed.entities.push(EntitySettings::for_entity("sensor.b"));
    editor.set_config(pushed);

    editor.with_entities(|list| list.remove(1));
    let events = drain(&channel);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].config.entities.len(), 1);
}

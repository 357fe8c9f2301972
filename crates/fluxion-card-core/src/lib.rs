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

pub mod equality;
pub mod error;
pub mod events;
pub mod field_editor;
pub mod host;
pub mod list_editor;
pub mod navigation;
pub mod path;
pub mod record;
pub mod resolve;

pub use equality::{deep_equal, same_value};
pub use error::{ConfigError, EditorError};
pub use events::{
    ConfigChangeChannel, ConfigChangeSender, ConfigChangedEvent, ConfigSection, EditorInbox,
    EditorMessage, EditorSender, SliceUpdate,
};
pub use field_editor::{
    ExtraFieldGroup, FieldDescriptor, FieldEditor, FieldGroup, FieldKind, SelectOption,
};
pub use host::{ConfigRevision, FluxionCardHostPlugin, config_change_handler};
pub use list_editor::{IndexPolicy, ListEditor};
pub use navigation::{CardEditor, EditorContext, EditorView};
pub use path::FieldPath;
pub use record::{ListKind, SettingsRecord};
pub use resolve::resolve;

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

//! Ordered list of settings records: add, remove, reorder, delegate edits.
//!
//! The editor works on its own copy of the list. Every committed change is
//! sent upward as a complete new list; the parent pushes the merged result
//! back down with [`ListEditor::set_items`].

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::events::{EditorMessage, EditorSender};
use crate::path::FieldPath;
use crate::record::{ListKind, SettingsRecord};

/// How index arguments of [`ListEditor::remove`] are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexPolicy {
    /// Index 0 means "no index"; keeps configurations produced by the
    /// dashboard editor behaving the same
    ZeroIsUnset,
    /// Every in-range index is addressable
    Explicit,
}

#[derive(Debug)]
pub struct ListEditor<T: SettingsRecord> {
    items: Vec<T>,
    policy: IndexPolicy,
    /// Inline selection, only used by the bar list
    selected: Option<usize>,
    outbox: EditorSender,
}

impl<T: SettingsRecord> ListEditor<T> {
    pub fn new(items: Vec<T>, policy: IndexPolicy, outbox: EditorSender) -> Self {
        Self {
            items,
            policy,
            selected: None,
            outbox,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn policy(&self) -> IndexPolicy {
        self.policy
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Replace the local copy with a slice pushed down by the parent
    pub fn set_items(&mut self, items: Vec<T>) {
        if self.selected.is_some_and(|i| i >= items.len()) {
            self.selected = None;
        }
        self.items = items;
    }

    /// Append a new record and emit
    pub fn add(&mut self, preset: Option<T::Preset>, entity: Option<String>) {
        let record = match T::fresh(preset, entity) {
            Ok(record) => record,
            Err(e) => {
                warn!("Failed to build new {:?} record: {e}", T::KIND);
                return;
            }
        };
        let mut items = self.items.clone();
        items.push(record);
        info!("➕ Added record at {}", items.len() - 1);
        self.commit(items);
    }

    /// Remove the record at `index`; stale or unset indices are ignored
    pub fn remove(&mut self, index: usize) {
        if self.policy == IndexPolicy::ZeroIsUnset && index == 0 {
            debug!("Remove without index ignored");
            return;
        }
        if index >= self.items.len() {
            debug!("Remove of stale index {index} ignored");
            return;
        }

        let mut items = self.items.clone();
        items.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        info!("➖ Removed record {index}");
        self.commit(items);
    }

    /// Remove the record at `from` and insert it at `to`
    ///
    /// `to` past the end is clamped to the last position. A stale `from` or
    /// a move onto itself changes nothing.
    pub fn move_to(&mut self, from: usize, to: usize) {
        let len = self.items.len();
        if from >= len {
            debug!("Move from stale index {from} ignored");
            return;
        }
        let to = to.min(len - 1);
        if from == to {
            return;
        }

        let mut items = self.items.clone();
        let record = items.remove(from);
        items.insert(to, record);
        self.selected = self.selected.map(|s| shifted_index(s, from, to));
        info!("↕️ Moved record {from} -> {to}");
        self.commit(items);
    }

    pub fn move_left(&mut self, index: usize) {
        if index > 0 {
            self.move_to(index, index - 1);
        }
    }

    pub fn move_right(&mut self, index: usize) {
        if let Some(next) = index.checked_add(1)
            && next < self.items.len()
        {
            self.move_to(index, next);
        }
    }

    /// Ask for the record at `index` to be edited
    ///
    /// Entity rows open the controller's field editor; bars toggle the
    /// inline selection.
    pub fn edit_requested(&mut self, index: usize) {
        if index >= self.items.len() {
            debug!("Edit of stale index {index} ignored");
            return;
        }
        match T::KIND {
            ListKind::Entities => {
                if let Err(e) = self.outbox.send(EditorMessage::EditItem(index)) {
                    warn!("Failed to request editor for record {index}: {e}");
                }
            }
            ListKind::Bars => self.select(index),
        }
    }

    /// Toggle the inline selection
    pub fn select(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Replace one field of one record (copy-on-write) and emit when it changed
    pub fn field_changed(&mut self, index: usize, path: &FieldPath, value: Value) {
        let Some(current) = self.items.get(index) else {
            debug!("Edit of stale index {index} ignored");
            return;
        };
        match current.with_field(path, value) {
            Ok(Some(record)) => {
                let mut items = self.items.clone();
                items[index] = record;
                debug!("Record {index}: {path} changed");
                self.commit(items);
            }
            Ok(None) => debug!("Record {index}: {path} unchanged, not emitting"),
            Err(e) => warn!("Rejected edit of record {index}: {e}"),
        }
    }

    /// [`Self::field_changed`] on the inline selection
    pub fn selected_field_changed(&mut self, path: &FieldPath, value: Value) {
        match self.selected {
            Some(index) => self.field_changed(index, path, value),
            None => debug!("Field edit without selection ignored"),
        }
    }

    fn commit(&mut self, items: Vec<T>) {
        self.items = items;
        if let Err(e) = self.outbox.send_update(T::list_update(self.items.clone())) {
            warn!("Failed to emit {:?} list: {e}", T::KIND);
        }
    }
}

/// Where the record at `index` ends up after moving `from` to `to`
fn shifted_index(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < index && index <= to {
        index - 1
    } else if to <= index && index < from {
        index + 1
    } else {
        index
    }
}

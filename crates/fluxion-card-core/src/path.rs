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

//! Field paths as reported by the form renderer (`icon` or `icon_color.bigger`).

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::EditorError;

/// A top-level field, optionally addressing one key of a nested record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    pub field: String,
    pub nested: Option<String>,
}

impl FieldPath {
    /// Split on the first `.`; everything after it addresses the nested key
    pub fn parse(path: &str) -> Result<Self, EditorError> {
        let (field, nested) = match path.split_once('.') {
            Some((field, nested)) => (field, Some(nested)),
            None => (path, None),
        };
        if field.is_empty() || nested.is_some_and(str::is_empty) {
            return Err(EditorError::InvalidPath(path.to_owned()));
        }
        Ok(Self {
            field: field.to_owned(),
            nested: nested.map(str::to_owned),
        })
    }

    pub fn top(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            nested: None,
        }
    }

    pub fn nested(field: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            nested: Some(key.into()),
        }
    }

    /// Translation key of the field label, e.g. `field-icon-color-bigger`
    pub fn label_key(&self) -> String {
        format!("field-{}", self.to_string().replace(['_', '.'], "-"))
    }

    /// Read the value this path points at
    pub fn get<'a>(&self, record: &'a Map<String, Value>) -> Option<&'a Value> {
        let top = record.get(&self.field)?;
        match &self.nested {
            Some(key) => top.as_object()?.get(key),
            None => Some(top),
        }
    }

    /// Copy of `record` with this path set to `value`
    ///
    /// Null clears the key. Nested writes keep the sibling keys; a nested
    /// record left without keys is dropped.
    pub fn with_value(&self, record: &Map<String, Value>, value: Value) -> Map<String, Value> {
        let mut updated = record.clone();
        let Some(key) = &self.nested else {
            if value.is_null() {
                updated.remove(&self.field);
            } else {
                updated.insert(self.field.clone(), value);
            }
            return updated;
        };

        let mut inner = record
            .get(&self.field)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        if value.is_null() {
            inner.remove(key);
        } else {
            inner.insert(key.clone(), value);
        }

        if inner.is_empty() {
            updated.remove(&self.field);
        } else {
            updated.insert(self.field.clone(), Value::Object(inner));
        }
        updated
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.nested {
            Some(key) => write!(f, "{}.{key}", self.field),
            None => f.write_str(&self.field),
        }
    }
}

impl FromStr for FieldPath {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

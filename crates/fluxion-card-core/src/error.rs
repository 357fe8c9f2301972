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

//! Error types for the card editor

use thiserror::Error;

/// Malformed host configuration, fatal when constructing the editor
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("card configuration must be a mapping, got {0}")]
    NotARecord(&'static str),

    #[error("{path}: expected an entity id or a mapping, got {value}")]
    InvalidEntry { path: String, value: String },

    #[error("{path}: unknown preset '{preset}'")]
    UnknownPreset { path: String, preset: String },

    #[error("{path}: {source}")]
    InvalidField {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Faults inside the editor tree; logged and recovered, never sent to the host
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid field path '{0}'")]
    InvalidPath(String),

    #[error("field '{0}' cannot be edited here")]
    UnknownField(String),

    #[error("invalid value for {path}: {reason}")]
    InvalidValue { path: String, reason: String },

    #[error("editor channel closed")]
    ChannelClosed,

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EditorError>;

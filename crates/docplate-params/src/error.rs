/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for binding data to parameters.
//!
//! Discovery and triggers never fail; only building a tree from external
//! data can.

use thiserror::Error;

/// Errors that can occur while building a parameter tree.
#[derive(Debug, Error)]
pub enum ParamError {
    /// The top-level data value has no named fields to bind.
    #[error("Parameter data must be an object, found {found}")]
    NotAnObject { found: &'static str },

    /// The value could not be converted to JSON.
    #[error("Failed to serialize parameter data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for parameter operations.
pub type ParamResult<T> = Result<T, ParamError>;

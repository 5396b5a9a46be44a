/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render pipeline for a single XML document part.
//!
//! Binds JSON data to a parameter tree, substitutes every placeholder found
//! in the part, then runs placeholder triggers in document order.

pub mod render;

pub use render::{RenderOutput, render};

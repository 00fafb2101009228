//! Glint Core - Foundational types for the Glint engine
//!
//! This crate provides the types that all other Glint crates depend on:
//! - `Vec3`, `Color` - Spatial and color value types
//! - Error types and Result alias

mod error;
mod types;

pub use error::{GlintError, Result};
pub use types::{Color, Vec3};

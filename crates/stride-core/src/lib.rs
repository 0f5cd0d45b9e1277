//! Stride Core - Foundational types for the Stride workspace
//!
//! This crate provides the types every other Stride crate depends on:
//! - `Vec2`, `Vec3` - Input axes and spatial vectors
//! - `move_toward` - Bounded-rate scalar interpolation
//! - Error types and Result alias

mod error;
mod types;

pub use error::{StrideError, Result};
pub use types::{move_toward, Vec2, Vec3};

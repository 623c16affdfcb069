//! Common types, traits, and error definitions for potential_field_3d
//!
//! This module provides the building blocks shared by the planner,
//! the visualization helpers and the demo binary.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;

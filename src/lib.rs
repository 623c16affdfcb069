//! potential_field_3d - artificial potential field path planning in 3D
//!
//! A point robot is guided from start to goal over a precomputed potential
//! grid built from point obstacles.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod path_planning;

// Re-export common types for convenience
pub use common::{Point3D, Path3D, Obstacles3D, GridIndex3D};
pub use common::PathPlanner3D;
pub use common::{PlannerError, PlannerResult};
pub use path_planning::potential_field::{plan, potential, PotentialFieldConfig, PotentialFieldPlanner3D};

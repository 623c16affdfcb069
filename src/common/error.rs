//! Error types for potential_field_3d

use thiserror::Error;

use crate::common::types::GridIndex3D;

/// Main error type for planning
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Empty obstacle set or a non-positive / non-finite parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Start or goal cannot be placed on the potential grid
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Descent walk stopped making progress
    #[error("Stuck after {steps} steps at cell {cell}")]
    Stuck { steps: usize, cell: GridIndex3D },

    /// Visualization error
    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for planning operations
pub type PlannerResult<T> = Result<T, PlannerError>;

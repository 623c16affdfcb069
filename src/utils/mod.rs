//! Utility modules for potential_field_3d

pub mod visualization;

pub use visualization::{colors, plot_planning_result, PathStyle, PointStyle, Visualizer3D};

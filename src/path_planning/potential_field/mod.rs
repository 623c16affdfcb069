//! Potential Field Planner Module
//!
//! Plans a path for a point robot through a 3D workspace with point
//! obstacles. An attractive potential pulls toward the goal, a repulsive
//! potential pushes away from the nearest obstacle inside the robot radius,
//! and the robot walks the combined field cell by cell.
//!
//! # Components
//!
//! - `config`: gains, grid margin and walk limits
//! - `field`: attractive and repulsive potentials
//! - `grid`: eager evaluation of the field over the workspace grid
//! - `motion`: the 24 candidate moves
//! - `planner`: steepest-descent walk from start to goal
//!
//! # Example
//!
//! ```no_run
//! use potential_field_3d::path_planning::potential_field::{PotentialFieldConfig, PotentialFieldPlanner3D};
//! use potential_field_3d::common::{Obstacles3D, PathPlanner3D, Point3D};
//!
//! let obstacles = Obstacles3D::from_xyz(&[15.0, 5.0], &[25.0, 15.0], &[1.0, 2.0]);
//! let planner = PotentialFieldPlanner3D::new(obstacles, PotentialFieldConfig::new(0.5, 5.0)).unwrap();
//! let path = planner.plan(Point3D::origin(), Point3D::new(30.0, 30.0, 30.0));
//! ```
//!
//! # References
//!
//! - PythonRobotics Potential Field Planning by Atsushi Sakai
//! - Khatib, O. (1986). "Real-Time Obstacle Avoidance for Manipulators and Mobile Robots"

pub mod config;
pub mod field;
pub mod grid;
pub mod motion;
pub mod planner;

// Re-exports
pub use config::{PotentialFieldConfig, AREA_WIDTH, ETA, KP, MIN_OBSTACLE_DISTANCE};
pub use field::{potential, FieldEvaluator};
pub use grid::{GridBounds, PotentialGrid};
pub use motion::MOTION_STENCIL;
pub use planner::{best_neighbor, plan, DescentTrace, PotentialFieldPlanner3D};

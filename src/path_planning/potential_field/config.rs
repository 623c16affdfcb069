//! Planner parameters

use crate::common::{PlannerError, PlannerResult};

/// Attractive potential gain
pub const KP: f64 = 5.0;
/// Repulsive potential gain
pub const ETA: f64 = 100.0;
/// Potential area width [m], split evenly on both sides of the bounding box
pub const AREA_WIDTH: f64 = 30.0;
/// Nearest-obstacle distances are clamped to this floor [m]
pub const MIN_OBSTACLE_DISTANCE: f64 = 0.1;

/// Configuration for the 3D potential field planner
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialFieldConfig {
    /// Attractive potential gain
    pub kp: f64,
    /// Repulsive potential gain
    pub eta: f64,
    /// Margin added around the bounding box [m]
    pub area_width: f64,
    /// Grid resolution [m]
    pub resolution: f64,
    /// Robot radius, i.e. the obstacle influence radius [m]
    pub robot_radius: f64,
    /// Grow the bounding box to also cover the start and goal. On by default:
    /// an obstacle-only box can leave the goal off the grid entirely.
    pub include_endpoints_in_bounds: bool,
    /// Evaluate grid cells in parallel (via rayon)
    pub parallel: bool,
    /// Step budget for the descent walk. `None` walks until the goal is reached.
    pub max_steps: Option<usize>,
    /// Number of recent cells checked for revisits. `None` disables the check.
    pub oscillation_window: Option<usize>,
}

impl Default for PotentialFieldConfig {
    fn default() -> Self {
        Self {
            kp: KP,
            eta: ETA,
            area_width: AREA_WIDTH,
            resolution: 0.5,
            robot_radius: 5.0,
            include_endpoints_in_bounds: true,
            parallel: true,
            max_steps: Some(100_000),
            oscillation_window: None,
        }
    }
}

impl PotentialFieldConfig {
    /// Default gains with the given grid resolution and influence radius
    pub fn new(resolution: f64, robot_radius: f64) -> Self {
        Self {
            resolution,
            robot_radius,
            ..Default::default()
        }
    }

    pub fn with_gains(mut self, kp: f64, eta: f64) -> Self {
        self.kp = kp;
        self.eta = eta;
        self
    }

    pub fn with_area_width(mut self, area_width: f64) -> Self {
        self.area_width = area_width;
        self
    }

    pub fn with_endpoints_in_bounds(mut self, include: bool) -> Self {
        self.include_endpoints_in_bounds = include;
        self
    }

    /// Enable or disable parallel grid construction.
    ///
    /// The resulting grid is identical either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_oscillation_window(mut self, window: Option<usize>) -> Self {
        self.oscillation_window = window;
        self
    }

    /// Check every parameter, returning `InvalidInput` for the first bad one
    pub fn validate(&self) -> PlannerResult<()> {
        require_positive("grid resolution", self.resolution)?;
        require_positive("influence radius", self.robot_radius)?;
        require_positive("attractive gain", self.kp)?;
        require_positive("repulsive gain", self.eta)?;

        if !self.area_width.is_finite() || self.area_width < 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "area width must be finite and non-negative, got {}",
                self.area_width
            )));
        }
        if self.max_steps == Some(0) {
            return Err(PlannerError::InvalidInput(
                "step budget must allow at least one step".to_string(),
            ));
        }
        if self.oscillation_window == Some(0) {
            return Err(PlannerError::InvalidInput(
                "oscillation window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn require_positive(name: &str, value: f64) -> PlannerResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PlannerError::InvalidInput(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

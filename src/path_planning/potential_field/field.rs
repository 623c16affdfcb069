//! Attractive and repulsive potentials around point obstacles

use crate::common::{Obstacles3D, PlannerError, PlannerResult, Point3D};

use super::config::{PotentialFieldConfig, ETA, KP, MIN_OBSTACLE_DISTANCE};

/// Evaluates the combined potential at a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldEvaluator {
    pub kp: f64,
    pub eta: f64,
    /// Distance beyond which obstacles exert no repulsion
    pub influence_radius: f64,
}

impl FieldEvaluator {
    pub fn new(kp: f64, eta: f64, influence_radius: f64) -> Self {
        Self { kp, eta, influence_radius }
    }

    /// Default gains with the given influence radius
    pub fn with_radius(influence_radius: f64) -> Self {
        Self::new(KP, ETA, influence_radius)
    }

    pub fn from_config(config: &PotentialFieldConfig) -> Self {
        Self::new(config.kp, config.eta, config.robot_radius)
    }

    /// `0.5 * kp * |p - goal|`
    pub fn attractive(&self, p: &Point3D, goal: &Point3D) -> f64 {
        0.5 * self.kp * p.distance(goal)
    }

    /// Index and distance of the obstacle nearest to `p`.
    ///
    /// Ties keep the earliest obstacle. Returns `None` for an empty set.
    pub fn nearest_obstacle(p: &Point3D, obstacles: &Obstacles3D) -> Option<(usize, f64)> {
        let mut nearest: Option<(usize, f64)> = None;
        for (i, o) in obstacles.iter().enumerate() {
            let d = p.distance(o);
            match nearest {
                Some((_, dmin)) if dmin <= d => {}
                _ => nearest = Some((i, d)),
            }
        }
        nearest
    }

    /// Repulsion from the nearest obstacle, zero outside the influence radius
    pub fn repulsive(&self, p: &Point3D, obstacles: &Obstacles3D) -> PlannerResult<f64> {
        let (_, d) = Self::nearest_obstacle(p, obstacles).ok_or_else(|| {
            PlannerError::InvalidInput("obstacle set is empty".to_string())
        })?;
        Ok(self.repulsive_from_distance(d))
    }

    /// Repulsive term for a known nearest-obstacle distance
    pub fn repulsive_from_distance(&self, distance: f64) -> f64 {
        let dq = distance.max(MIN_OBSTACLE_DISTANCE);
        if dq <= self.influence_radius {
            0.5 * self.eta * (1.0 / dq - 1.0 / self.influence_radius).powi(2)
        } else {
            0.0
        }
    }

    /// Attractive plus repulsive potential at `p`
    pub fn potential(&self, p: &Point3D, goal: &Point3D, obstacles: &Obstacles3D) -> PlannerResult<f64> {
        Ok(self.attractive(p, goal) + self.repulsive(p, obstacles)?)
    }
}

/// Potential at `p` with the default gains and the given robot radius
pub fn potential(p: Point3D, goal: Point3D, obstacles: &Obstacles3D, robot_radius: f64) -> PlannerResult<f64> {
    if !(robot_radius.is_finite() && robot_radius > 0.0) {
        return Err(PlannerError::InvalidInput(format!(
            "influence radius must be positive and finite, got {}",
            robot_radius
        )));
    }
    FieldEvaluator::with_radius(robot_radius).potential(&p, &goal, obstacles)
}

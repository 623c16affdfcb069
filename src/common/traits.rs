//! Common traits defining interfaces for planning algorithms

use crate::common::error::PlannerError;
use crate::common::types::*;

/// Trait for 3D path planning algorithms
pub trait PathPlanner3D {
    /// Plan a path from start to goal
    fn plan(&self, start: Point3D, goal: Point3D) -> Result<Path3D, PlannerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StraightLinePlanner;

    impl PathPlanner3D for StraightLinePlanner {
        fn plan(&self, start: Point3D, goal: Point3D) -> Result<Path3D, PlannerError> {
            Ok(Path3D::from_points(vec![start, goal]))
        }
    }

    #[test]
    fn test_path_planner_trait() {
        let planner = StraightLinePlanner;
        let path = planner
            .plan(Point3D::origin(), Point3D::new(1.0, 2.0, 2.0))
            .unwrap();
        assert_eq!(path.len(), 2);
        assert!((path.total_length() - 3.0).abs() < 1e-10);
    }
}

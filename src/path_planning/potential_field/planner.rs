//! Steepest-descent walk over the precomputed potential grid

use std::collections::{HashSet, VecDeque};

use log::{debug, trace, warn};

use crate::common::{
    GridIndex3D, Obstacles3D, Path3D, PathPlanner3D, PlannerError, PlannerResult, Point3D,
};

use super::config::PotentialFieldConfig;
use super::field::FieldEvaluator;
use super::grid::{GridBounds, PotentialGrid};
use super::motion::MOTION_STENCIL;

/// Cells visited by one descent walk
#[derive(Debug)]
pub struct DescentTrace {
    visited: HashSet<GridIndex3D>,
    recent: VecDeque<GridIndex3D>,
    window: Option<usize>,
}

impl DescentTrace {
    pub fn new(start: GridIndex3D, window: Option<usize>) -> Self {
        let mut trace = Self {
            visited: HashSet::new(),
            recent: VecDeque::new(),
            window,
        };
        trace.record(start);
        trace
    }

    /// Record a step. Returns true when `index` repeats a cell inside the
    /// oscillation window.
    pub fn record(&mut self, index: GridIndex3D) -> bool {
        self.visited.insert(index);

        let Some(window) = self.window else {
            return false;
        };
        let repeated = self.recent.iter().rev().take(window.saturating_sub(1)).any(|&c| c == index);
        self.recent.push_back(index);
        while self.recent.len() > window {
            self.recent.pop_front();
        }
        repeated
    }

    /// Number of distinct cells seen so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn has_visited(&self, index: GridIndex3D) -> bool {
        self.visited.contains(&index)
    }
}

/// Neighbor with the strictly lowest potential. Out-of-grid cells count as
/// +infinity, ties keep the first offset in `MOTION_STENCIL`.
pub fn best_neighbor(grid: &PotentialGrid, index: GridIndex3D) -> Option<(GridIndex3D, f64)> {
    let mut minp = f64::INFINITY;
    let mut best = None;
    for &[dx, dy, dz] in MOTION_STENCIL.iter() {
        let candidate = index.offset(dx, dy, dz);
        let p = grid.get(candidate).unwrap_or(f64::INFINITY);
        if minp > p {
            minp = p;
            best = Some((candidate, p));
        }
    }
    best
}

/// Potential field planner over a 3D grid
///
/// Builds the full potential grid for each request, then walks from the
/// start cell to the lowest-potential neighbor until the goal is within
/// one grid resolution.
pub struct PotentialFieldPlanner3D {
    obstacles: Obstacles3D,
    config: PotentialFieldConfig,
}

impl PotentialFieldPlanner3D {
    /// Create a planner, rejecting empty obstacle sets and bad parameters
    pub fn new(obstacles: Obstacles3D, config: PotentialFieldConfig) -> PlannerResult<Self> {
        config.validate()?;
        if obstacles.is_empty() {
            return Err(PlannerError::InvalidInput("obstacle set is empty".to_string()));
        }
        if let Some(bad) = obstacles.iter().find(|o| !o.is_finite()) {
            return Err(PlannerError::InvalidInput(format!("obstacle {:?} is not finite", bad)));
        }
        Ok(Self { obstacles, config })
    }

    /// Create from obstacle coordinate vectors with default gains
    pub fn from_obstacles(
        ox: &[f64],
        oy: &[f64],
        oz: &[f64],
        resolution: f64,
        robot_radius: f64,
    ) -> PlannerResult<Self> {
        Self::new(
            Obstacles3D::from_xyz(ox, oy, oz),
            PotentialFieldConfig::new(resolution, robot_radius),
        )
    }

    pub fn config(&self) -> &PotentialFieldConfig {
        &self.config
    }

    pub fn obstacles(&self) -> &Obstacles3D {
        &self.obstacles
    }

    pub fn field(&self) -> FieldEvaluator {
        FieldEvaluator::from_config(&self.config)
    }

    /// Grid extent for a request: obstacle bounding box (plus start and goal
    /// when configured), grown by the area width
    pub fn bounds_for(&self, start: Point3D, goal: Point3D) -> GridBounds {
        let mut points = self.obstacles.points.clone();
        if self.config.include_endpoints_in_bounds {
            points.push(start);
            points.push(goal);
        }
        // points is never empty: the constructor rejects empty obstacle sets
        let bounds = GridBounds::enclosing(&points).unwrap_or(GridBounds { min: start, max: start });
        bounds.expanded(self.config.area_width)
    }

    /// Evaluate the potential grid for a request
    pub fn build_grid(&self, start: Point3D, goal: Point3D) -> PlannerResult<PotentialGrid> {
        let bounds = self.bounds_for(start, goal);
        PotentialGrid::build(
            &self.field(),
            &goal,
            &self.obstacles,
            &bounds,
            self.config.resolution,
            self.config.parallel,
        )
    }

    /// Plan and also hand back the potential grid the walk ran on
    pub fn plan_with_grid(&self, start: Point3D, goal: Point3D) -> PlannerResult<(Path3D, PotentialGrid)> {
        if !start.is_finite() || !goal.is_finite() {
            return Err(PlannerError::InvalidInput(format!(
                "start {:?} and goal {:?} must be finite",
                start, goal
            )));
        }
        let grid = self.build_grid(start, goal)?;
        let path = self.descend(&grid, start, goal)?;
        Ok((path, grid))
    }

    /// Plan a path returning (rx, ry, rz) vectors (legacy interface)
    pub fn planning(
        &self,
        sx: f64,
        sy: f64,
        sz: f64,
        gx: f64,
        gy: f64,
        gz: f64,
    ) -> Option<(Vec<f64>, Vec<f64>, Vec<f64>)> {
        let start = Point3D::new(sx, sy, sz);
        let goal = Point3D::new(gx, gy, gz);

        match self.plan(start, goal) {
            Ok(path) => Some((path.x_coords(), path.y_coords(), path.z_coords())),
            Err(e) => {
                warn!("[PotentialField] {}", e);
                None
            }
        }
    }

    fn descend(&self, grid: &PotentialGrid, start: Point3D, goal: Point3D) -> PlannerResult<Path3D> {
        let resolution = grid.resolution();
        let mut index = grid.index_of(&start);
        let goal_index = grid.index_of(&goal);

        for (name, cell) in [("start", index), ("goal", goal_index)] {
            if !grid.contains_index(cell) {
                let [xw, yw, zw] = grid.dims();
                return Err(PlannerError::DegenerateGeometry(format!(
                    "{} cell {} is outside the {} x {} x {} grid",
                    name, cell, xw, yw, zw
                )));
            }
        }

        debug!("[PotentialField] start cell {} goal cell {}", index, goal_index);

        let mut path = Path3D::from_points(vec![start]);
        let mut visits = DescentTrace::new(index, self.config.oscillation_window);
        let mut d = start.distance(&goal);
        let mut steps = 0;

        while d >= resolution {
            if let Some(max_steps) = self.config.max_steps {
                if steps >= max_steps {
                    warn!("[PotentialField] step budget of {} exhausted at {}", max_steps, index);
                    return Err(PlannerError::Stuck { steps, cell: index });
                }
            }

            let (next, p) = match best_neighbor(grid, index) {
                Some(found) => found,
                None => {
                    warn!("[PotentialField] no neighbor inside the grid at {}", index);
                    return Err(PlannerError::Stuck { steps, cell: index });
                }
            };

            index = next;
            steps += 1;
            let position = grid.position_of(index);
            d = goal.distance(&position);
            path.push(position);
            trace!("[PotentialField] step {} -> {} u={:.3} d={:.3}", steps, index, p, d);

            if visits.record(index) {
                warn!("[PotentialField] oscillation detected at {}", index);
                return Err(PlannerError::Stuck { steps, cell: index });
            }
        }

        debug!(
            "[PotentialField] goal reached: {} points, {} distinct cells",
            path.len(),
            visits.visited_count()
        );
        Ok(path)
    }
}

impl PathPlanner3D for PotentialFieldPlanner3D {
    fn plan(&self, start: Point3D, goal: Point3D) -> PlannerResult<Path3D> {
        self.plan_with_grid(start, goal).map(|(path, _)| path)
    }
}

/// Plan with the default gains, area width and step budget
pub fn plan(
    start: Point3D,
    goal: Point3D,
    obstacles: &Obstacles3D,
    grid_resolution: f64,
    influence_radius: f64,
) -> PlannerResult<Path3D> {
    let config = PotentialFieldConfig::new(grid_resolution, influence_radius);
    PotentialFieldPlanner3D::new(obstacles.clone(), config)?.plan(start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_obstacle_planner(config: PotentialFieldConfig) -> PotentialFieldPlanner3D {
        let obstacles = Obstacles3D::from_points(vec![Point3D::new(8.0, 8.0, 5.0)]);
        PotentialFieldPlanner3D::new(obstacles, config).unwrap()
    }

    /// Square wall of obstacles in the x = 5 plane
    fn wall_obstacles() -> Obstacles3D {
        let mut obstacles = Obstacles3D::new();
        for iy in -6..=6 {
            for iz in -6..=6 {
                obstacles.push(Point3D::new(5.0, iy as f64, iz as f64));
            }
        }
        obstacles
    }

    /// Cube grid `[0, extent)^3` with one far-away obstacle, so cell values
    /// are the attractive term only
    fn cube_grid(extent: f64, resolution: f64, goal: Point3D) -> PotentialGrid {
        let obstacles = Obstacles3D::from_points(vec![Point3D::new(-50.0, -50.0, -50.0)]);
        let bounds = GridBounds {
            min: Point3D::origin(),
            max: Point3D::new(extent, extent, extent),
        };
        PotentialGrid::build(&FieldEvaluator::with_radius(1.0), &goal, &obstacles, &bounds, resolution, false)
            .unwrap()
    }

    #[test]
    fn test_best_neighbor_reaches_last_index() {
        let grid = cube_grid(3.0, 1.0, Point3D::new(2.0, 2.0, 2.0));
        assert_eq!(grid.dims(), [3, 3, 3]);

        let (next, p) = best_neighbor(&grid, GridIndex3D::new(1, 1, 1)).unwrap();
        assert_eq!(next, GridIndex3D::new(2, 2, 2));
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_best_neighbor_skips_out_of_grid_cells() {
        let grid = cube_grid(3.0, 1.0, Point3D::new(2.0, 2.0, 2.0));

        // +x and +y candidates fall off the grid, the goal is straight up
        let (next, p) = best_neighbor(&grid, GridIndex3D::new(2, 2, 1)).unwrap();
        assert!(grid.contains_index(next));
        assert!(p.is_finite());
        assert_eq!(next, GridIndex3D::new(1, 2, 2));

        let (next, _) = best_neighbor(&grid, GridIndex3D::new(2, 2, 2)).unwrap();
        assert!(grid.contains_index(next));
    }

    #[test]
    fn test_best_neighbor_on_single_cell_grid() {
        let grid = cube_grid(0.5, 0.5, Point3D::origin());
        assert_eq!(grid.dims(), [1, 1, 1]);
        assert!(best_neighbor(&grid, GridIndex3D::new(0, 0, 0)).is_none());
    }

    #[test]
    fn test_tiny_resolution_is_an_error() {
        let obstacles = Obstacles3D::from_points(vec![
            Point3D::new(15.0, 25.0, 1.0),
            Point3D::new(5.0, 15.0, 2.0),
        ]);
        let result = plan(Point3D::origin(), Point3D::new(30.0, 30.0, 30.0), &obstacles, 3e-5, 5.0);
        assert!(matches!(result, Err(PlannerError::InvalidInput(_))));
    }

    #[test]
    fn test_trace_detects_repeat_in_window() {
        let a = GridIndex3D::new(0, 0, 0);
        let b = GridIndex3D::new(1, 0, 0);
        let c = GridIndex3D::new(2, 0, 0);

        let mut trace = DescentTrace::new(a, Some(3));
        assert!(!trace.record(b));
        assert!(trace.record(a));

        let mut trace = DescentTrace::new(a, Some(2));
        assert!(!trace.record(b));
        assert!(!trace.record(c));
        assert!(!trace.record(a));
        assert_eq!(trace.visited_count(), 3);
    }

    #[test]
    fn test_trace_without_window_never_reports() {
        let a = GridIndex3D::new(0, 0, 0);
        let b = GridIndex3D::new(0, 1, 0);
        let mut trace = DescentTrace::new(a, None);
        for _ in 0..5 {
            assert!(!trace.record(b));
            assert!(!trace.record(a));
        }
        assert!(trace.has_visited(b));
        assert_eq!(trace.visited_count(), 2);
    }

    #[test]
    fn test_vertical_goal_zigzags_with_first_tie() {
        let config = PotentialFieldConfig::new(1.0, 2.0).with_area_width(10.0);
        let planner = far_obstacle_planner(config);

        let path = planner
            .plan(Point3D::origin(), Point3D::new(0.0, 0.0, 10.0))
            .unwrap();

        assert_eq!(path.len(), 11);
        for (i, p) in path.points.iter().enumerate() {
            let expected_x = if i % 2 == 1 { 1.0 } else { 0.0 };
            assert_eq!(*p, Point3D::new(expected_x, 0.0, i as f64));
        }
    }

    #[test]
    fn test_start_within_resolution_returns_start_only() {
        let planner = far_obstacle_planner(PotentialFieldConfig::new(1.0, 2.0));
        let start = Point3D::new(0.2, 0.1, 0.0);
        let path = planner.plan(start, Point3D::origin()).unwrap();
        assert_eq!(path.points, vec![start]);
    }

    #[test]
    fn test_each_step_takes_lowest_neighbor() {
        let obstacles = Obstacles3D::from_points(vec![
            Point3D::new(2.0, 6.0, 1.0),
            Point3D::new(6.0, 2.0, 2.0),
        ]);
        let config = PotentialFieldConfig::new(0.5, 2.0).with_area_width(6.0);
        let planner = PotentialFieldPlanner3D::new(obstacles, config).unwrap();
        let (path, grid) = planner
            .plan_with_grid(Point3D::origin(), Point3D::new(8.0, 8.0, 3.0))
            .unwrap();

        for pair in path.points[1..].windows(2) {
            let from = grid.index_of(&pair[0]);
            let to = grid.index_of(&pair[1]);
            let chosen = grid.get(to).unwrap();
            for &[dx, dy, dz] in MOTION_STENCIL.iter() {
                if let Some(p) = grid.get(from.offset(dx, dy, dz)) {
                    assert!(chosen <= p);
                }
            }
        }
    }

    #[test]
    fn test_wall_exhausts_step_budget() {
        let config = PotentialFieldConfig::new(0.5, 3.0)
            .with_area_width(10.0)
            .with_max_steps(Some(500));
        let planner = PotentialFieldPlanner3D::new(wall_obstacles(), config).unwrap();

        let result = planner.plan(Point3D::origin(), Point3D::new(10.0, 0.0, 0.0));
        assert!(matches!(result, Err(PlannerError::Stuck { steps: 500, .. })));
    }

    #[test]
    fn test_wall_oscillation_detected() {
        let config = PotentialFieldConfig::new(0.5, 3.0)
            .with_area_width(10.0)
            .with_max_steps(Some(500))
            .with_oscillation_window(Some(6));
        let planner = PotentialFieldPlanner3D::new(wall_obstacles(), config).unwrap();

        match planner.plan(Point3D::origin(), Point3D::new(10.0, 0.0, 0.0)) {
            Err(PlannerError::Stuck { steps, cell }) => {
                assert!(steps < 500);
                // the wall plane sits at x index 20
                assert!(cell.x < 20);
            }
            other => panic!("expected stuck, got {:?}", other),
        }
    }

    #[test]
    fn test_goal_outside_obstacle_only_grid() {
        let obstacles = Obstacles3D::from_points(vec![
            Point3D::new(15.0, 25.0, 1.0),
            Point3D::new(5.0, 15.0, 2.0),
        ]);
        let config = PotentialFieldConfig::new(0.5, 5.0).with_endpoints_in_bounds(false);
        let planner = PotentialFieldPlanner3D::new(obstacles, config).unwrap();

        let result = planner.plan(Point3D::origin(), Point3D::new(30.0, 30.0, 30.0));
        assert!(matches!(result, Err(PlannerError::DegenerateGeometry(_))));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let obstacles = Obstacles3D::from_points(vec![Point3D::new(1.0, 1.0, 1.0)]);
        let goal = Point3D::new(5.0, 5.0, 5.0);

        assert!(matches!(
            plan(Point3D::origin(), goal, &Obstacles3D::new(), 0.5, 5.0),
            Err(PlannerError::InvalidInput(_))
        ));
        assert!(matches!(
            plan(Point3D::origin(), goal, &obstacles, 0.0, 5.0),
            Err(PlannerError::InvalidInput(_))
        ));
        assert!(matches!(
            plan(Point3D::origin(), goal, &obstacles, 0.5, -5.0),
            Err(PlannerError::InvalidInput(_))
        ));
        assert!(matches!(
            plan(Point3D::new(f64::NAN, 0.0, 0.0), goal, &obstacles, 0.5, 5.0),
            Err(PlannerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_legacy_interface() {
        let planner = PotentialFieldPlanner3D::from_obstacles(&[8.0], &[8.0], &[5.0], 1.0, 2.0).unwrap();
        let (rx, ry, rz) = planner.planning(0.0, 0.0, 0.0, 4.0, 4.0, 0.0).unwrap();
        assert_eq!(rx.len(), ry.len());
        assert_eq!(ry.len(), rz.len());
        assert_eq!(rx.last(), Some(&4.0));
        assert_eq!(ry.last(), Some(&4.0));
    }

    #[test]
    fn test_legacy_interface_returns_none_on_error() {
        let obstacles = Obstacles3D::from_points(vec![Point3D::new(8.0, 8.0, 5.0)]);
        let config = PotentialFieldConfig::new(1.0, 2.0).with_endpoints_in_bounds(false);
        let planner = PotentialFieldPlanner3D::new(obstacles, config).unwrap();
        assert!(planner.planning(0.0, 0.0, 0.0, 100.0, 0.0, 0.0).is_none());
    }
}

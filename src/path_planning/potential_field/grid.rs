//! Precomputed potential over a regular 3D grid

use itertools::{Itertools, MinMaxResult};
use log::debug;
use ordered_float::OrderedFloat;
use rayon::prelude::*;

use crate::common::{GridIndex3D, Obstacles3D, PlannerError, PlannerResult, Point3D};

use super::field::FieldEvaluator;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub min: Point3D,
    pub max: Point3D,
}

impl GridBounds {
    /// Smallest box enclosing all points, `None` if there are none
    pub fn enclosing(points: &[Point3D]) -> Option<Self> {
        let (min_x, max_x) = axis_range(points.iter().map(|p| p.x))?;
        let (min_y, max_y) = axis_range(points.iter().map(|p| p.y))?;
        let (min_z, max_z) = axis_range(points.iter().map(|p| p.z))?;
        Some(Self {
            min: Point3D::new(min_x, min_y, min_z),
            max: Point3D::new(max_x, max_y, max_z),
        })
    }

    /// Grow by `area_width / 2` on every side
    pub fn expanded(&self, area_width: f64) -> Self {
        let half = area_width / 2.0;
        Self {
            min: Point3D::new(self.min.x - half, self.min.y - half, self.min.z - half),
            max: Point3D::new(self.max.x + half, self.max.y + half, self.max.z + half),
        }
    }

    /// Cells per axis: `round((max - min) / resolution)`
    pub fn cell_counts(&self, resolution: f64) -> [usize; 3] {
        [
            ((self.max.x - self.min.x) / resolution).round() as usize,
            ((self.max.y - self.min.y) / resolution).round() as usize,
            ((self.max.z - self.min.z) / resolution).round() as usize,
        ]
    }
}

fn axis_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    match values.map(OrderedFloat).minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v.0, v.0)),
        MinMaxResult::MinMax(lo, hi) => Some((lo.0, hi.0)),
    }
}

/// Potential values for every cell, stored x-major.
///
/// Cell `(ix, iy, iz)` sits at `origin + (ix, iy, iz) * resolution`.
/// Values are written once during `build` and never change afterwards.
#[derive(Debug, Clone)]
pub struct PotentialGrid {
    data: Vec<f64>,
    dims: [usize; 3],
    origin: Point3D,
    resolution: f64,
}

impl PotentialGrid {
    /// Evaluate `field` at every cell of `bounds`.
    ///
    /// Cost is one nearest-obstacle scan per cell. With `parallel` set the
    /// x-slabs are filled on the rayon pool.
    pub fn build(
        field: &FieldEvaluator,
        goal: &Point3D,
        obstacles: &Obstacles3D,
        bounds: &GridBounds,
        resolution: f64,
        parallel: bool,
    ) -> PlannerResult<Self> {
        if obstacles.is_empty() {
            return Err(PlannerError::InvalidInput("obstacle set is empty".to_string()));
        }
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(PlannerError::InvalidInput(format!(
                "grid resolution must be positive and finite, got {}",
                resolution
            )));
        }

        let dims = bounds.cell_counts(resolution);
        let [xw, yw, zw] = dims;
        if dims.contains(&0) {
            return Err(PlannerError::DegenerateGeometry(format!(
                "grid has an empty axis: {} x {} x {}",
                xw, yw, zw
            )));
        }
        let cell_count = xw
            .checked_mul(yw)
            .and_then(|n| n.checked_mul(zw))
            .ok_or_else(|| {
                PlannerError::InvalidInput(format!("grid {} x {} x {} is too large", xw, yw, zw))
            })?;

        debug!(
            "[PotentialGrid] building {} x {} x {} cells ({} obstacles, parallel={})",
            xw, yw, zw, obstacles.len(), parallel
        );

        let origin = bounds.min;
        let slab_len = yw * zw;
        let mut data: Vec<f64> = Vec::new();
        data.try_reserve_exact(cell_count).map_err(|e| {
            PlannerError::InvalidInput(format!(
                "grid {} x {} x {} is too large: {}",
                xw, yw, zw, e
            ))
        })?;
        data.resize(cell_count, 0.0);

        let fill_slab = |(ix, slab): (usize, &mut [f64])| {
            let x = origin.x + ix as f64 * resolution;
            for iy in 0..yw {
                let y = origin.y + iy as f64 * resolution;
                for iz in 0..zw {
                    let z = origin.z + iz as f64 * resolution;
                    let p = Point3D::new(x, y, z);
                    let ug = field.attractive(&p, goal);
                    let uo = FieldEvaluator::nearest_obstacle(&p, obstacles)
                        .map_or(0.0, |(_, d)| field.repulsive_from_distance(d));
                    slab[iy * zw + iz] = ug + uo;
                }
            }
        };

        if parallel {
            data.par_chunks_mut(slab_len).enumerate().for_each(fill_slab);
        } else {
            data.chunks_mut(slab_len).enumerate().for_each(fill_slab);
        }

        Ok(Self { data, dims, origin, resolution })
    }

    /// Cells per axis `[xw, yw, zw]`
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// World position of cell (0, 0, 0)
    pub fn origin(&self) -> Point3D {
        self.origin
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw x-major values
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// True when `0 <= index < extent` on all three axes
    pub fn contains_index(&self, index: GridIndex3D) -> bool {
        let in_axis = |i: i64, extent: usize| i >= 0 && (i as u64) < extent as u64;
        in_axis(index.x, self.dims[0]) && in_axis(index.y, self.dims[1]) && in_axis(index.z, self.dims[2])
    }

    /// Stored potential, `None` outside the grid
    pub fn get(&self, index: GridIndex3D) -> Option<f64> {
        if !self.contains_index(index) {
            return None;
        }
        let [_, yw, zw] = self.dims;
        let flat = (index.x as usize * yw + index.y as usize) * zw + index.z as usize;
        self.data.get(flat).copied()
    }

    /// Nearest cell to a world position. May lie outside the grid.
    pub fn index_of(&self, p: &Point3D) -> GridIndex3D {
        GridIndex3D::new(
            ((p.x - self.origin.x) / self.resolution).round() as i64,
            ((p.y - self.origin.y) / self.resolution).round() as i64,
            ((p.z - self.origin.z) / self.resolution).round() as i64,
        )
    }

    /// World position of a cell
    pub fn position_of(&self, index: GridIndex3D) -> Point3D {
        Point3D::new(
            index.x as f64 * self.resolution + self.origin.x,
            index.y as f64 * self.resolution + self.origin.y,
            index.z as f64 * self.resolution + self.origin.z,
        )
    }

    /// Smallest and largest stored potential
    pub fn potential_range(&self) -> Option<(f64, f64)> {
        axis_range(self.data.iter().copied())
    }
}

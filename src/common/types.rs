//! Common types used throughout potential_field_3d

use std::fmt;

use nalgebra::Vector3;

/// 3D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn distance(&self, other: &Point3D) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<(f64, f64, f64)> for Point3D {
    fn from(tuple: (f64, f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1, z: tuple.2 }
    }
}

impl From<Vector3<f64>> for Point3D {
    fn from(v: Vector3<f64>) -> Self {
        Self { x: v[0], y: v[1], z: v[2] }
    }
}

/// Path represented as a sequence of 3D points
#[derive(Debug, Clone, PartialEq)]
pub struct Path3D {
    pub points: Vec<Point3D>,
}

impl Path3D {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point3D>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: Point3D) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point3D> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point3D> {
        self.points.last()
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn z_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.z).collect()
    }

    pub fn total_length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.points.windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

impl Default for Path3D {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer cell coordinates on a 3D grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridIndex3D {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl GridIndex3D {
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    pub fn offset(&self, dx: i64, dy: i64, dz: i64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl fmt::Display for GridIndex3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Point obstacles, read-only while a plan is computed
#[derive(Debug, Clone, Default)]
pub struct Obstacles3D {
    pub points: Vec<Point3D>,
}

impl Obstacles3D {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point3D>) -> Self {
        Self { points }
    }

    /// Build from parallel coordinate slices. Extra entries in the longer
    /// slices are ignored.
    pub fn from_xyz(x: &[f64], y: &[f64], z: &[f64]) -> Self {
        let points = x.iter().zip(y.iter()).zip(z.iter())
            .map(|((&x, &y), &z)| Point3D::new(x, y, z))
            .collect();
        Self { points }
    }

    pub fn push(&mut self, point: Point3D) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3D> {
        self.points.iter()
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn z_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.z).collect()
    }
}

impl From<Vec<Point3D>> for Obstacles3D {
    fn from(points: Vec<Point3D>) -> Self {
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point3d_distance() {
        let p1 = Point3D::new(0.0, 0.0, 0.0);
        let p2 = Point3D::new(2.0, 3.0, 6.0);
        assert!((p1.distance(&p2) - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_path3d_total_length() {
        let path = Path3D::from_points(vec![
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(1.0, 0.0, 1.0),
        ]);
        assert!((path.total_length() - 2.0).abs() < 1e-10);
        assert_eq!(path.z_coords(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_obstacles_from_xyz() {
        let obstacles = Obstacles3D::from_xyz(&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]);
        assert_eq!(obstacles.len(), 2);
        assert_eq!(obstacles.points[1], Point3D::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_grid_index_offset() {
        let idx = GridIndex3D::new(1, 2, 3).offset(-1, 0, 1);
        assert_eq!(idx, GridIndex3D::new(0, 2, 4));
    }
}

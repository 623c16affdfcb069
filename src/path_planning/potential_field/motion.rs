//! Candidate moves for the descent walk

/// Neighbor offsets (dx, dy, dz), evaluated in this order.
///
/// 8 planar moves on each of the z = 0, +1 and -1 layers. Pure vertical
/// moves (0, 0, +-1) are not part of the stencil.
pub const MOTION_STENCIL: [[i64; 3]; 24] = [
    [1, 0, 0],
    [0, 1, 0],
    [-1, 0, 0],
    [0, -1, 0],
    [-1, -1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [1, 1, 0],
    [1, 0, 1],
    [0, 1, 1],
    [-1, 0, 1],
    [0, -1, 1],
    [-1, -1, 1],
    [-1, 1, 1],
    [1, -1, 1],
    [1, 1, 1],
    [1, 0, -1],
    [0, 1, -1],
    [-1, 0, -1],
    [0, -1, -1],
    [-1, -1, -1],
    [-1, 1, -1],
    [1, -1, -1],
    [1, 1, -1],
];

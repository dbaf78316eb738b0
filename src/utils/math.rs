//! Planar math helpers layered on top of `glam`.

use glam::Vec2;

/// Counter-clockwise perpendicular of a vector: `(-y, x)`.
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Scalar 2D cross product `a.x * b.y - a.y * b.x`.
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Rotates a vector by `angle` radians about the origin.
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Velocity of a material point of a rigid body, decomposed into
/// center-of-mass translation plus rotation about the center (Chasles).
/// `r` is the point's offset from the center of mass.
pub fn point_velocity(linear: Vec2, angular: f32, r: Vec2) -> Vec2 {
    linear + angular * perp(r)
}

use glam::Vec2;

use crate::utils::math::perp;

/// Static, infinite-mass line obstacle described by the implicit equation
/// `normal · P + offset = 0`.
///
/// The endpoints are retained only to bound the rendered segment; collision
/// tests use the infinite line, so a vertex can register a contact past the
/// drawn ends. Walls never move.
#[derive(Debug, Clone, Copy)]
pub struct Wall {
    normal: Vec2,
    offset: f32,
    start: Vec2,
    end: Vec2,
}

impl Wall {
    /// Builds a wall from an endpoint pair. The normal is the left
    /// perpendicular of `end - start`, so the endpoint order picks which
    /// side of the line is clear.
    pub fn new(start: Vec2, end: Vec2) -> Self {
        let direction = end - start;
        debug_assert!(direction.length_squared() > 0.0);
        let normal = perp(direction).normalize();
        let midpoint = (start + end) * 0.5;
        let offset = -normal.dot(midpoint);
        Self {
            normal,
            offset,
            start,
            end,
        }
    }

    /// Signed distance from a point to the wall line. Positive on the side
    /// the normal points to (clear), negative when penetrating from it.
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        self.normal.dot(point) + self.offset
    }

    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn end(&self) -> Vec2 {
        self.end
    }
}

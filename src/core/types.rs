use glam::{Mat4, Quat, Vec2};
use serde::{Deserialize, Serialize};

/// Planar position and orientation of an entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    /// Rotation about the Z axis, in radians.
    pub orientation: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            orientation: 0.0,
        }
    }
}

impl Pose {
    /// Builds a homogeneous matrix: scale, then rotate about Z, then translate.
    pub fn to_matrix(&self, scale: Vec2) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            scale.extend(1.0),
            Quat::from_rotation_z(self.orientation),
            self.position.extend(0.0),
        )
    }

    /// Maps a point from local to world space.
    pub fn transform_point(&self, local: Vec2) -> Vec2 {
        self.position + Vec2::from_angle(self.orientation).rotate(local)
    }
}

/// Linear and angular velocity of a rigid body.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub linear: Vec2,
    /// Signed scalar spin about Z, radians per second.
    pub angular: f32,
}

/// Direction of the global gravity force.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravityState {
    None,
    #[default]
    Normal,
    Inverted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pose_matrix_scales_rotates_translates_in_order() {
        let pose = Pose {
            position: Vec2::new(3.0, -1.0),
            orientation: std::f32::consts::FRAC_PI_2,
        };
        // Local +X corner of a 2x4 box lands on world +Y after the quarter turn.
        let m = pose.to_matrix(Vec2::new(2.0, 4.0));
        let p = m.transform_point3(glam::Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn transform_point_matches_matrix() {
        let pose = Pose {
            position: Vec2::new(0.5, 2.0),
            orientation: 0.7,
        };
        let local = Vec2::new(-1.2, 0.4);
        let direct = pose.transform_point(local);
        let via_matrix = pose
            .to_matrix(Vec2::ONE)
            .transform_point3(local.extend(0.0));
        assert_relative_eq!(direct.x, via_matrix.x, epsilon = 1e-5);
        assert_relative_eq!(direct.y, via_matrix.y, epsilon = 1e-5);
    }
}

//! Scene descriptions: the static data a host supplies to build and reset
//! the body and wall collections.
//!
//! The supplying collaborator is expected to validate its data (positive
//! mass for movable bodies, non-degenerate wall segments, restitution in
//! `[0, 1]`).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{
    config,
    core::{
        rigidbody::{RigidBody, Slot},
        wall::Wall,
    },
};

/// Initial description of one rigid body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyDef {
    /// `None` builds an immovable body.
    pub mass: Option<f32>,
    pub width: f32,
    pub height: f32,
    pub restitution: f32,
    pub position: Vec2,
    pub orientation: f32,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    pub color: [f32; 3],
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            mass: Some(1.0),
            width: 1.0,
            height: 1.0,
            restitution: config::DEFAULT_RESTITUTION,
            position: Vec2::ZERO,
            orientation: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl BodyDef {
    /// Builds a live body from the definition. A restitution override, if
    /// present, replaces the per-body coefficient.
    pub fn instantiate(&self, restitution_override: Option<f32>) -> RigidBody {
        let mut body = RigidBody::new(self.mass, self.width, self.height);
        body.restitution = restitution_override.unwrap_or(self.restitution);
        body.color = self.color;

        let state = body.current_mut();
        state.pose.position = self.position;
        state.pose.orientation = self.orientation;
        state.velocity.linear = self.linear_velocity;
        state.velocity.angular = self.angular_velocity;

        let snapshot = *body.current();
        *body.future_mut() = snapshot;
        body.compute_vertices(Slot::Current);
        body.compute_vertices(Slot::Future);
        body
    }
}

/// Endpoint pair for one static wall.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WallDef {
    pub start: Vec2,
    pub end: Vec2,
}

impl WallDef {
    pub fn build(&self) -> Wall {
        Wall::new(self.start, self.end)
    }
}

/// A complete scene: the body and wall sets loaded together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDef {
    pub name: String,
    pub bodies: Vec<BodyDef>,
    pub walls: Vec<WallDef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn instantiate_copies_the_initial_state_into_both_slots() {
        let def = BodyDef {
            mass: Some(2.0),
            position: Vec2::new(1.0, 5.0),
            linear_velocity: Vec2::new(0.0, -3.0),
            ..Default::default()
        };
        let body = def.instantiate(None);

        assert_relative_eq!(body.current().pose.position.y, 5.0);
        assert_relative_eq!(body.future().pose.position.y, 5.0);
        assert_relative_eq!(body.current().velocity.linear.y, -3.0);
        assert_relative_eq!(body.inverse_mass, 0.5);
    }

    #[test]
    fn restitution_override_replaces_the_per_body_value() {
        let def = BodyDef {
            restitution: 0.3,
            ..Default::default()
        };
        assert_relative_eq!(def.instantiate(None).restitution, 0.3);
        assert_relative_eq!(def.instantiate(Some(0.9)).restitution, 0.9);
    }

    #[test]
    fn default_body_def_is_a_movable_unit_square() {
        let def = BodyDef::default();
        assert_relative_eq!(def.width, 1.0);
        assert_relative_eq!(def.height, 1.0);
        assert!(def.mass.is_some());
        assert!(!def.instantiate(None).is_immovable());
    }
}

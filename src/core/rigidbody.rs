use glam::{Mat4, Vec2};

use super::types::{Pose, Velocity};

/// Which of the two state buffers an operation addresses.
///
/// `Current` is the last accepted state; `Future` is scratch space for the
/// sub-step being attempted. A rejected sub-step simply overwrites the
/// future slot again, leaving the accepted state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Current,
    Future,
}

/// One buffered kinematic/dynamic state of a body.
///
/// `vertices` is a derived cache of `(pose, width, height)`; it is only
/// valid for a slot after [`RigidBody::compute_vertices`] has run for that
/// slot in the current tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyState {
    pub pose: Pose,
    pub velocity: Velocity,
    /// Force accumulator, recomputed every tick.
    pub force: Vec2,
    /// Torque accumulator, recomputed every tick.
    pub torque: f32,
    /// World-space corners of the oriented rectangle, counter-clockwise.
    pub vertices: [Vec2; 4],
}

/// Rigid rectangular body with double-buffered state.
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Zero encodes an immovable body.
    pub inverse_mass: f32,
    /// Zero for immovable bodies, otherwise `12 / (mass * (w² + h²))`.
    pub inverse_inertia: f32,
    pub width: f32,
    pub height: f32,
    /// Coefficient of restitution in `[0, 1]`.
    pub restitution: f32,
    /// Render-only tint; the simulation core never reads it.
    pub color: [f32; 3],
    states: [BodyState; 2],
    current: usize,
}

impl RigidBody {
    /// Creates a body at rest at the origin. `mass` of `None` builds an
    /// immovable body with zero inverse mass and inertia.
    pub fn new(mass: Option<f32>, width: f32, height: f32) -> Self {
        let (inverse_mass, inverse_inertia) = match mass {
            Some(mass) => {
                debug_assert!(mass > 0.0 && mass.is_finite());
                debug_assert!(width > 0.0 && height > 0.0);
                let inertia = mass * (width * width + height * height) / 12.0;
                (1.0 / mass, 1.0 / inertia)
            }
            None => (0.0, 0.0),
        };

        let mut body = Self {
            inverse_mass,
            inverse_inertia,
            width,
            height,
            restitution: crate::config::DEFAULT_RESTITUTION,
            color: [1.0, 1.0, 1.0],
            states: [BodyState::default(); 2],
            current: 0,
        };
        body.compute_vertices(Slot::Current);
        body.compute_vertices(Slot::Future);
        body
    }

    pub fn is_immovable(&self) -> bool {
        self.inverse_mass == 0.0
    }

    pub fn state(&self, slot: Slot) -> &BodyState {
        &self.states[self.index(slot)]
    }

    pub fn state_mut(&mut self, slot: Slot) -> &mut BodyState {
        let index = self.index(slot);
        &mut self.states[index]
    }

    pub fn current(&self) -> &BodyState {
        self.state(Slot::Current)
    }

    pub fn current_mut(&mut self) -> &mut BodyState {
        self.state_mut(Slot::Current)
    }

    pub fn future(&self) -> &BodyState {
        self.state(Slot::Future)
    }

    pub fn future_mut(&mut self) -> &mut BodyState {
        self.state_mut(Slot::Future)
    }

    /// Promotes the future slot to current by flipping the buffer index.
    /// No state is copied.
    pub fn swap_states(&mut self) {
        self.current ^= 1;
    }

    /// Zeroes the current slot's force and torque accumulators.
    pub fn clear_accumulators(&mut self) {
        let state = self.current_mut();
        state.force = Vec2::ZERO;
        state.torque = 0.0;
    }

    pub fn add_force(&mut self, force: Vec2) {
        self.current_mut().force += force;
    }

    pub fn add_torque(&mut self, torque: f32) {
        self.current_mut().torque += torque;
    }

    /// Recomputes the world-space corners for the given slot from its pose
    /// and the body dimensions. Corner order is counter-clockwise starting
    /// at the local `(+w/2, +h/2)` corner, so edge tests are deterministic.
    pub fn compute_vertices(&mut self, slot: Slot) {
        let (hw, hh) = (self.width * 0.5, self.height * 0.5);
        let locals = [
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
        ];
        let index = self.index(slot);
        let pose = self.states[index].pose;
        for (vertex, local) in self.states[index].vertices.iter_mut().zip(locals) {
            *vertex = pose.transform_point(local);
        }
    }

    /// Pose transform for rendering: scale by `(width, height)`, rotate
    /// about Z, translate. Recomputed per call.
    pub fn model_matrix(&self, slot: Slot) -> Mat4 {
        self.state(slot)
            .pose
            .to_matrix(Vec2::new(self.width, self.height))
    }

    fn index(&self, slot: Slot) -> usize {
        match slot {
            Slot::Current => self.current,
            Slot::Future => self.current ^ 1,
        }
    }
}

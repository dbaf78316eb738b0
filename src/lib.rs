//! Impulse2D – 2D rigid-body dynamics and collision resolution for Rust.
//!
//! The crate implements a discrete-time simulation core built around
//! double-buffered body state: each tick integrates the accepted state into
//! a tentative future configuration, classifies it with a narrow-phase
//! scan, and then either accepts the sub-step, drains contacts with
//! impulse iteration, or bisects the time interval to step around a
//! penetration.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod scene;
pub mod utils;
pub mod world;

pub use glam::{Mat4, Vec2};

pub use collision::{CollisionState, Contact, ContactKind, NarrowPhase};
pub use core::{BodyState, GravityState, Pose, RigidBody, Slot, Velocity, Wall};
pub use dynamics::{
    ConstantForce, ConstantTorque, DragForce, ForceGenerator, ForceRegistry, ImpulseSolver,
    Integrator,
};
pub use error::{Result, StepError};
pub use scene::{BodyDef, SceneDef, WallDef};
pub use world::{SceneRenderer, World};

/// High-level convenience wrapper that owns a [`World`].
pub struct Simulation {
    world: World,
}

impl Simulation {
    /// Creates a simulation over the provided scene list.
    pub fn new(scenes: Vec<SceneDef>) -> Self {
        Self {
            world: World::new(scenes),
        }
    }

    /// Advances the simulation by the provided delta time. Warns when the
    /// step took longer to compute than the interval it simulated.
    pub fn step(&mut self, delta_time: f32) -> Result<()> {
        let start = std::time::Instant::now();
        let result = self.world.simulate(delta_time);
        utils::logging::warn_if_tick_budget_exceeded(start.elapsed(), delta_time * 1000.0);
        result
    }

    /// Immutable access to the underlying world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the underlying world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Switches the active scene; false when the index is out of range.
    pub fn change_scene(&mut self, index: usize) -> bool {
        self.world.change_scene(index)
    }

    /// Restores the active scene's bodies to their initial state.
    pub fn reset_scene(&mut self) {
        self.world.reset_scene();
    }

    pub fn set_gravity_state(&mut self, state: GravityState) {
        self.world.set_gravity_state(state);
    }

    pub fn set_coefficient_of_restitution(&mut self, restitution: f32) {
        self.world.set_coefficient_of_restitution(restitution);
    }

    /// Pushes the current draw state to an external renderer.
    pub fn render(&self, renderer: &mut dyn SceneRenderer) {
        self.world.render(renderer);
    }
}

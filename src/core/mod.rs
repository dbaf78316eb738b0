//! Core types describing physics entities and shared state.

pub mod rigidbody;
pub mod types;
pub mod wall;

pub use rigidbody::{BodyState, RigidBody, Slot};
pub use types::{GravityState, Pose, Velocity};
pub use wall::Wall;

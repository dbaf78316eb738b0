//! Simulation dynamics: force generators, integration, impulse response.

pub mod forces;
pub mod impulse;
pub mod integrator;

pub use forces::{ConstantForce, ConstantTorque, DragForce, ForceGenerator, ForceRegistry};
pub use impulse::ImpulseSolver;
pub use integrator::Integrator;

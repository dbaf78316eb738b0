//! Global configuration constants for the Impulse2D engine.

/// Default gravity acceleration applied in the simulation world (Y-up).
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, -9.81];

/// Default integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Penetration tolerance in scene units. A vertex whose signed distance
/// drops below the negative tolerance counts as penetrating; within the
/// band around zero it counts as touching.
pub const DEFAULT_PENETRATION_TOLERANCE: f32 = 1.0;

/// Maximum impulse applications drained per sub-step before a contact is
/// declared unresolvable.
pub const MAX_IMPULSE_ITERATIONS: u32 = 100;

/// Maximum time-step halvings per accepted sub-step before a penetrating
/// configuration is declared unresolvable.
pub const MAX_BISECTION_DEPTH: u32 = 64;

/// Default coefficient of restitution for bodies whose scene definition
/// leaves it unset.
pub const DEFAULT_RESTITUTION: f32 = 0.6;

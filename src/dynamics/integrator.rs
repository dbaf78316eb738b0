use crate::core::rigidbody::{RigidBody, Slot};

/// Semi-implicit Euler integrator stepping the current slot into the
/// future slot.
#[derive(Debug, Clone, Default)]
pub struct Integrator;

impl Integrator {
    pub fn new() -> Self {
        Self
    }

    /// Writes the tentative state after `h` seconds into the future slot.
    /// Position and orientation advance with the *old* velocities; the
    /// velocities advance with the current force and torque.
    pub fn integrate(&self, body: &mut RigidBody, h: f32) {
        let inverse_mass = body.inverse_mass;
        let inverse_inertia = body.inverse_inertia;
        let current = *body.state(Slot::Current);

        let future = body.state_mut(Slot::Future);
        future.pose.position = current.pose.position + current.velocity.linear * h;
        future.pose.orientation = current.pose.orientation + current.velocity.angular * h;
        future.velocity.linear = current.velocity.linear + h * inverse_mass * current.force;
        future.velocity.angular = current.velocity.angular + h * inverse_inertia * current.torque;
        future.force = current.force;
        future.torque = current.torque;
    }
}

use glam::Vec2;

use crate::core::rigidbody::RigidBody;

/// Trait describing an external force generator applied to rigid bodies.
/// Generators write into the current slot's accumulators each tick.
pub trait ForceGenerator: Send + Sync {
    fn apply(&self, body: &mut RigidBody, dt: f32);
}

/// Constant force applied to every movable body.
pub struct ConstantForce {
    pub force: Vec2,
}

impl ConstantForce {
    pub fn new(force: Vec2) -> Self {
        Self { force }
    }
}

impl ForceGenerator for ConstantForce {
    fn apply(&self, body: &mut RigidBody, _dt: f32) {
        if body.is_immovable() {
            return;
        }
        body.add_force(self.force);
    }
}

/// Constant torque source, e.g. a spin-up stage in a scene.
pub struct ConstantTorque {
    pub torque: f32,
}

impl ForceGenerator for ConstantTorque {
    fn apply(&self, body: &mut RigidBody, _dt: f32) {
        if body.is_immovable() {
            return;
        }
        body.add_torque(self.torque);
    }
}

/// Quadratic drag resisting the direction of motion.
pub struct DragForce {
    pub drag_coefficient: f32,
}

impl ForceGenerator for DragForce {
    fn apply(&self, body: &mut RigidBody, _dt: f32) {
        if body.is_immovable() {
            return;
        }

        let velocity = body.current().velocity.linear;
        let speed = velocity.length();
        if speed < 1e-6 {
            return;
        }

        let drag = -velocity.normalize() * speed * speed * self.drag_coefficient;
        body.add_force(drag);
    }
}

/// Collection of forces that can be applied each tick.
pub struct ForceRegistry {
    forces: Vec<Box<dyn ForceGenerator>>,
}

impl Default for ForceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self { forces: Vec::new() }
    }

    pub fn add_force<F: ForceGenerator + 'static>(&mut self, force: F) {
        self.forces.push(Box::new(force));
    }

    pub fn clear(&mut self) {
        self.forces.clear();
    }

    pub fn apply_all(&self, bodies: &mut [RigidBody], dt: f32) {
        for force in &self.forces {
            for body in bodies.iter_mut() {
                force.apply(body, dt);
            }
        }
    }
}

use glam::Vec2;

use crate::{
    collision::contact::{Contact, ContactKind},
    core::rigidbody::RigidBody,
    utils::math::{perp, point_velocity},
};

/// Impulse-based collision response applied to future-slot state.
///
/// Impulses change velocities only; positions stay where the integrator
/// put them, so a resolution pass never turns a non-penetrating
/// configuration into a penetrating one.
#[derive(Debug, Clone, Default)]
pub struct ImpulseSolver;

impl ImpulseSolver {
    pub fn new() -> Self {
        Self
    }

    /// Applies one impulse for the given contact.
    pub fn resolve(&self, bodies: &mut [RigidBody], contact: &Contact) {
        match contact.kind {
            ContactKind::BodyWall { body, .. } => {
                Self::resolve_wall_contact(&mut bodies[body], contact.normal, contact.point_a);
            }
            ContactKind::VertexVertex { body_a, body_b, .. } => {
                if let Some((a, b)) = get_pair_mut(bodies, body_a, body_b) {
                    Self::resolve_pair_contact(a, b, contact.normal, contact.point_a, contact.point_b);
                }
            }
            ContactKind::VertexEdge {
                vertex_body,
                edge_body,
                ..
            } => {
                if let Some((a, b)) = get_pair_mut(bodies, vertex_body, edge_body) {
                    Self::resolve_pair_contact(a, b, contact.normal, contact.point_a, contact.point_b);
                }
            }
        }
    }

    /// Body against an immovable wall. `point` is the contacting vertex.
    fn resolve_wall_contact(body: &mut RigidBody, normal: Vec2, point: Vec2) {
        let inverse_mass = body.inverse_mass;
        let inverse_inertia = body.inverse_inertia;
        let restitution = body.restitution;

        let state = body.future_mut();
        let r = point - state.pose.position;
        let r_perp = perp(r);
        let vn = point_velocity(state.velocity.linear, state.velocity.angular, r).dot(normal);

        let angular_term = r_perp.dot(normal);
        let denominator = inverse_mass + inverse_inertia * angular_term * angular_term;
        if denominator <= f32::EPSILON {
            // Immovable body against an immovable wall; nothing an impulse
            // can change. The caller's iteration bound reports it.
            return;
        }

        let j = -(1.0 + restitution) * vn / denominator;
        state.velocity.linear += j * inverse_mass * normal;
        state.velocity.angular += j * inverse_inertia * angular_term;
    }

    /// Two finite-mass bodies. The normal points toward `a`; the impulse is
    /// applied with opposite signs to the pair.
    fn resolve_pair_contact(
        a: &mut RigidBody,
        b: &mut RigidBody,
        normal: Vec2,
        point_a: Vec2,
        point_b: Vec2,
    ) {
        let restitution = (a.restitution * b.restitution).sqrt();
        let (inverse_mass_a, inverse_inertia_a) = (a.inverse_mass, a.inverse_inertia);
        let (inverse_mass_b, inverse_inertia_b) = (b.inverse_mass, b.inverse_inertia);

        let state_a = *a.future();
        let state_b = *b.future();

        let r_a = point_a - state_a.pose.position;
        let r_b = point_b - state_b.pose.position;
        let r_perp_a = perp(r_a);
        let r_perp_b = perp(r_b);

        let velocity_a = point_velocity(state_a.velocity.linear, state_a.velocity.angular, r_a);
        let velocity_b = point_velocity(state_b.velocity.linear, state_b.velocity.angular, r_b);
        let vn = (velocity_a - velocity_b).dot(normal);

        let term_a = r_perp_a.dot(normal);
        let term_b = r_perp_b.dot(normal);
        let denominator = inverse_mass_a
            + inverse_mass_b
            + inverse_inertia_a * term_a * term_a
            + inverse_inertia_b * term_b * term_b;
        if denominator <= f32::EPSILON {
            return;
        }

        let j = -(1.0 + restitution) * vn / denominator;

        let future_a = a.future_mut();
        future_a.velocity.linear += j * inverse_mass_a * normal;
        future_a.velocity.angular += j * inverse_inertia_a * term_a;

        let future_b = b.future_mut();
        future_b.velocity.linear -= j * inverse_mass_b * normal;
        future_b.velocity.angular -= j * inverse_inertia_b * term_b;
    }
}

/// Disjoint mutable borrows of two slice entries.
fn get_pair_mut(
    bodies: &mut [RigidBody],
    a: usize,
    b: usize,
) -> Option<(&mut RigidBody, &mut RigidBody)> {
    if a == b || a >= bodies.len() || b >= bodies.len() {
        return None;
    }
    if a < b {
        let (left, right) = bodies.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = bodies.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}

use glam::Vec2;

use crate::{
    collision::contact::{CollisionState, Contact, ContactKind},
    core::{
        rigidbody::{BodyState, RigidBody},
        wall::Wall,
    },
    utils::math::point_velocity,
};

/// Narrow-phase contact classification over the tentative future state of
/// every body.
///
/// The scan is deterministic and first-found: the wall pass runs first
/// (body order, then vertex order, then wall order), then body pairs in
/// index order; within a pair, vertex–vertex, then A-vertices against
/// B-edges, then B-vertices against A-edges. The first touching-and-closing
/// contact is kept, but any penetration found anywhere aborts the scan and
/// outranks it.
pub struct NarrowPhase;

impl NarrowPhase {
    const DEGENERATE_DISTANCE: f32 = 1e-6;
    /// Approach speeds below this count as resting rather than closing.
    const RESTING_SPEED: f32 = 1e-6;

    /// Classifies the future configuration. `tolerance` is the penetration
    /// band ε: signed distance below `-ε` is penetrating, within `±ε` and
    /// approaching is colliding.
    pub fn detect(bodies: &[RigidBody], walls: &[Wall], tolerance: f32) -> CollisionState {
        let mut touching: Option<Contact> = None;

        for (body_index, body) in bodies.iter().enumerate() {
            let state = body.future();
            for (vertex_index, &vertex) in state.vertices.iter().enumerate() {
                for (wall_index, wall) in walls.iter().enumerate() {
                    let distance = wall.signed_distance(vertex);
                    if distance < -tolerance {
                        return CollisionState::Penetrating;
                    }
                    if distance < tolerance && touching.is_none() {
                        let r = vertex - state.pose.position;
                        let approach =
                            point_velocity(state.velocity.linear, state.velocity.angular, r)
                                .dot(wall.normal());
                        if approach < -Self::RESTING_SPEED {
                            touching = Some(Contact {
                                normal: wall.normal(),
                                point_a: vertex,
                                point_b: vertex,
                                kind: ContactKind::BodyWall {
                                    body: body_index,
                                    vertex: vertex_index,
                                    wall: wall_index,
                                },
                            });
                        }
                    }
                }
            }
        }

        for a in 0..bodies.len() {
            for b in (a + 1)..bodies.len() {
                if Self::detect_pair(&bodies[a], a, &bodies[b], b, tolerance, &mut touching) {
                    return CollisionState::Penetrating;
                }
            }
        }

        match touching {
            Some(contact) => CollisionState::Colliding(contact),
            None => CollisionState::Clear,
        }
    }

    /// Scans one body pair. Returns true when a penetration was found.
    fn detect_pair(
        body_a: &RigidBody,
        index_a: usize,
        body_b: &RigidBody,
        index_b: usize,
        tolerance: f32,
        touching: &mut Option<Contact>,
    ) -> bool {
        let state_a = body_a.future();
        let state_b = body_b.future();

        for (vertex_a, &va) in state_a.vertices.iter().enumerate() {
            for (vertex_b, &vb) in state_b.vertices.iter().enumerate() {
                let separation = va - vb;
                let distance = separation.length();
                if distance >= tolerance || touching.is_some() {
                    continue;
                }
                // Corner separation is non-negative, so this test never
                // yields a penetrating verdict.
                let normal = if distance > Self::DEGENERATE_DISTANCE {
                    separation / distance
                } else {
                    // Coincident corners: fall back to the center-to-center
                    // axis for a usable normal.
                    let centers = state_a.pose.position - state_b.pose.position;
                    if centers.length_squared() > Self::DEGENERATE_DISTANCE {
                        centers.normalize()
                    } else {
                        Vec2::Y
                    }
                };
                if Self::closing_speed(state_a, va, state_b, vb, normal) < -Self::RESTING_SPEED {
                    *touching = Some(Contact {
                        normal,
                        point_a: va,
                        point_b: vb,
                        kind: ContactKind::VertexVertex {
                            body_a: index_a,
                            vertex_a,
                            body_b: index_b,
                            vertex_b,
                        },
                    });
                }
            }
        }

        Self::scan_vertex_edge(state_a, index_a, state_b, index_b, tolerance, touching)
            || Self::scan_vertex_edge(state_b, index_b, state_a, index_a, tolerance, touching)
    }

    /// Tests every vertex of one body against the edges of another. The
    /// classifying edge for a vertex is the one with the largest signed
    /// distance (the shallowest axis), which keeps a vertex beyond the far
    /// side of the rectangle from reading as deep penetration of the near
    /// edge. Returns true when a penetration was found.
    fn scan_vertex_edge(
        vertex_state: &BodyState,
        vertex_body: usize,
        edge_state: &BodyState,
        edge_body: usize,
        tolerance: f32,
        touching: &mut Option<Contact>,
    ) -> bool {
        for (vertex_index, &p) in vertex_state.vertices.iter().enumerate() {
            let mut best_edge = 0;
            let mut best_distance = f32::NEG_INFINITY;
            for edge in 0..4 {
                let q1 = edge_state.vertices[edge];
                let q2 = edge_state.vertices[(edge + 1) % 4];
                let direction = q2 - q1;
                let outward = Vec2::new(direction.y, -direction.x).normalize();
                let distance = (p - q1).dot(outward);
                if distance > best_distance {
                    best_distance = distance;
                    best_edge = edge;
                }
            }

            if best_distance >= tolerance {
                continue;
            }

            let q1 = edge_state.vertices[best_edge];
            let q2 = edge_state.vertices[(best_edge + 1) % 4];
            let direction = q2 - q1;
            let t = (p - q1).dot(direction) / direction.length_squared();
            if !(0.0..=1.0).contains(&t) {
                // Past the segment ends near a corner; the vertex–vertex
                // test owns that case.
                continue;
            }

            if best_distance < -tolerance {
                return true;
            }

            if touching.is_some() {
                continue;
            }

            let outward = Vec2::new(direction.y, -direction.x).normalize();
            let edge_point = q1 + direction * t;
            if Self::closing_speed(vertex_state, p, edge_state, edge_point, outward)
                < -Self::RESTING_SPEED
            {
                *touching = Some(Contact {
                    normal: outward,
                    point_a: p,
                    point_b: edge_point,
                    kind: ContactKind::VertexEdge {
                        vertex_body,
                        vertex: vertex_index,
                        edge_body,
                        edge: best_edge,
                    },
                });
            }
        }
        false
    }

    /// Relative velocity of two contact points along the normal. Negative
    /// means approaching.
    fn closing_speed(
        state_a: &BodyState,
        point_a: Vec2,
        state_b: &BodyState,
        point_b: Vec2,
        normal: Vec2,
    ) -> f32 {
        let va = point_velocity(
            state_a.velocity.linear,
            state_a.velocity.angular,
            point_a - state_a.pose.position,
        );
        let vb = point_velocity(
            state_b.velocity.linear,
            state_b.velocity.angular,
            point_b - state_b.pose.position,
        );
        (va - vb).dot(normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rigidbody::Slot;
    use glam::Vec2;

    fn body_at(position: Vec2, velocity: Vec2) -> RigidBody {
        let mut body = RigidBody::new(Some(1.0), 2.0, 2.0);
        body.future_mut().pose.position = position;
        body.future_mut().velocity.linear = velocity;
        body.compute_vertices(Slot::Future);
        body
    }

    fn floor() -> Wall {
        Wall::new(Vec2::new(-100.0, 0.0), Vec2::new(100.0, 0.0))
    }

    #[test]
    fn separated_body_is_clear() {
        let bodies = vec![body_at(Vec2::new(0.0, 10.0), Vec2::new(0.0, -1.0))];
        let state = NarrowPhase::detect(&bodies, &[floor()], 0.1);
        assert!(state.is_clear());
    }

    #[test]
    fn touching_and_approaching_is_colliding() {
        // Lowest vertices sit just above the floor, moving down.
        let bodies = vec![body_at(Vec2::new(0.0, 1.05), Vec2::new(0.0, -1.0))];
        let state = NarrowPhase::detect(&bodies, &[floor()], 0.1);
        match state {
            CollisionState::Colliding(contact) => match contact.kind {
                ContactKind::BodyWall { body, wall, .. } => {
                    assert_eq!(body, 0);
                    assert_eq!(wall, 0);
                }
                other => panic!("expected wall contact, got {other:?}"),
            },
            other => panic!("expected colliding, got {other:?}"),
        }
    }

    #[test]
    fn touching_but_receding_is_clear() {
        let bodies = vec![body_at(Vec2::new(0.0, 1.05), Vec2::new(0.0, 1.0))];
        let state = NarrowPhase::detect(&bodies, &[floor()], 0.1);
        assert!(state.is_clear());
    }

    #[test]
    fn deep_overlap_is_penetrating() {
        let bodies = vec![body_at(Vec2::new(0.0, 0.5), Vec2::new(0.0, -1.0))];
        let state = NarrowPhase::detect(&bodies, &[floor()], 0.1);
        assert!(matches!(state, CollisionState::Penetrating));
    }

    #[test]
    fn penetration_outranks_an_earlier_touch() {
        // First body touches and approaches; second is buried in the floor.
        let bodies = vec![
            body_at(Vec2::new(-5.0, 1.05), Vec2::new(0.0, -1.0)),
            body_at(Vec2::new(5.0, 0.2), Vec2::ZERO),
        ];
        let state = NarrowPhase::detect(&bodies, &[floor()], 0.1);
        assert!(matches!(state, CollisionState::Penetrating));
    }

    #[test]
    fn approaching_corners_collide_vertex_to_vertex() {
        let a = body_at(Vec2::new(-1.04, 0.0), Vec2::new(1.0, 0.0));
        let b = body_at(Vec2::new(1.04, 2.0), Vec2::new(-1.0, 0.0));
        // a's (+1,+1) corner at (-0.04, 1.0); b's (-1,-1) corner at (0.04, 1.0).
        let state = NarrowPhase::detect(&[a, b], &[], 0.1);
        match state {
            CollisionState::Colliding(contact) => {
                assert!(matches!(contact.kind, ContactKind::VertexVertex { .. }));
            }
            other => panic!("expected vertex-vertex contact, got {other:?}"),
        }
    }

    #[test]
    fn vertex_into_edge_collides() {
        // a's right edge midpoint region meets b's left face.
        let a = body_at(Vec2::new(-1.02, 0.5), Vec2::new(1.0, 0.0));
        let b = body_at(Vec2::new(1.0, 0.0), Vec2::ZERO);
        let state = NarrowPhase::detect(&[a, b], &[], 0.1);
        match state {
            CollisionState::Colliding(contact) => {
                assert!(matches!(contact.kind, ContactKind::VertexEdge { .. }));
                // Normal points from b's left face toward a.
                assert!(contact.normal.x < -0.9);
            }
            other => panic!("expected vertex-edge contact, got {other:?}"),
        }
    }

    #[test]
    fn vertex_beyond_the_far_side_is_not_penetration() {
        // Far apart horizontally: no slab of b contains a's vertices deeply.
        let a = body_at(Vec2::new(-10.0, 0.0), Vec2::new(1.0, 0.0));
        let b = body_at(Vec2::new(10.0, 0.0), Vec2::ZERO);
        let state = NarrowPhase::detect(&[a, b], &[], 0.1);
        assert!(state.is_clear());
    }
}

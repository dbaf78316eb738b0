use glam::Vec2;

/// Identifies which geometry produced a contact. Indices refer to the
/// world's body and wall collections at detection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// A body vertex against a static wall.
    BodyWall {
        body: usize,
        vertex: usize,
        wall: usize,
    },
    /// Corner-to-corner contact between two bodies.
    VertexVertex {
        body_a: usize,
        vertex_a: usize,
        body_b: usize,
        vertex_b: usize,
    },
    /// A vertex of one body against an edge of another.
    VertexEdge {
        vertex_body: usize,
        vertex: usize,
        edge_body: usize,
        edge: usize,
    },
}

/// A single detected contact, consumed by the impulse solver within the
/// same tick. Never persisted across ticks.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit vector along which the impulse is applied. Points toward the
    /// first-named participant (the body for walls, body/vertex A for
    /// pairs).
    pub normal: Vec2,
    /// Contact point on the first participant, world space.
    pub point_a: Vec2,
    /// Contact point on the second participant. Equals `point_a` for wall
    /// contacts.
    pub point_b: Vec2,
    pub kind: ContactKind,
}

/// Outcome of a detection pass over the tentative future configuration.
#[derive(Debug, Clone, Copy)]
pub enum CollisionState {
    /// No contact; the sub-step can be accepted.
    Clear,
    /// Touching and approaching; resolve with an impulse.
    Colliding(Contact),
    /// Interpenetrating beyond tolerance; the sub-step must be rejected.
    Penetrating,
}

impl CollisionState {
    pub fn is_clear(&self) -> bool {
        matches!(self, CollisionState::Clear)
    }
}

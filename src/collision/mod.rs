//! Collision detection: contact records and the narrow-phase scan.

pub mod contact;
pub mod detection;

pub use contact::{CollisionState, Contact, ContactKind};
pub use detection::NarrowPhase;

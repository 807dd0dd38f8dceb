//! Domain modules (vertical slices): types, wire types, builder logic.

pub mod intent;
pub mod token;

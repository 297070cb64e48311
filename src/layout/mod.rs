//! Deterministic positioning seeds for the force and radial views

pub mod radial;
pub mod timeline;

pub use radial::{RadialLayout, RadialPlacement};
pub use timeline::{PlacedNode, TimelineLayout};

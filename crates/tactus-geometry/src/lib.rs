//! Pure math/data for touch geometry in Tactus
//!
//! This crate contains the geometry primitives shared by the gesture
//! recognizer and its hosts: points in the caller's coordinate space,
//! distances, and midpoints.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::Point;
}

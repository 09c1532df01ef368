//! Shared plumbing for the orrery
//!
//! Window and GPU setup, the logical viewport, and the orbital perspective
//! camera. Nothing in here knows about planets.

pub mod graphics;
pub mod camera;
pub mod viewport;

pub use graphics::*;
pub use camera::*;
pub use viewport::*;

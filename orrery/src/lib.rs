//! Orrery - an animated solar system
//!
//! A star field, a sun at the origin and a ring of textured planets moving
//! on flat circular orbits. One slider scales every planet's angular speed.
//!
//! - [`orbit`]: planet bodies and the per-tick position update
//! - [`viewport`]: resize handling for the camera and surface
//! - [`config`] / [`cli`]: RON configuration with command-line overrides
//! - [`starfield`], [`sphere`], [`texture`]: scene content
//! - [`renderer`], [`overlay`], [`ui`]: drawing and the speed control

pub mod cli;
pub mod config;
pub mod error;
pub mod orbit;
pub mod overlay;
pub mod renderer;
pub mod sphere;
pub mod starfield;
pub mod texture;
pub mod ui;
pub mod viewport;

pub use config::{OrreryConfig, PlanetRecord};
pub use error::{ConfigError, TextureError};
pub use orbit::{OrbitingBody, Orrery};

//! Planets on flat circular orbits around the origin
//!
//! Motion is per tick, not per second: every tick each body's angle grows by
//! its effective angular speed and its position is re-derived from the new
//! angle. Angles accumulate without wrapping.

use glam::Vec3;

use crate::config::PlanetRecord;

/// Self-rotation applied to every planet each tick, in radians
pub const SPIN_PER_TICK: f32 = 0.01;

/// A planet's mutable orbital state
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingBody {
    pub name: String,
    pub radius: f32,
    pub distance: f32,
    /// Radians per tick at speed factor 1
    pub base_speed: f32,
    /// `base_speed * speed_factor`, refreshed when the factor changes
    pub effective_speed: f32,
    /// Orbital angle in radians, unbounded
    pub angle: f32,
    /// Rotation about the body's own Y axis, unbounded
    pub spin: f32,
    pub position: Vec3,
}

impl OrbitingBody {
    pub fn from_record(record: &PlanetRecord, speed_factor: f32) -> Self {
        let mut body = Self {
            name: record.name.clone(),
            radius: record.radius,
            distance: record.orbital_distance,
            base_speed: record.base_angular_speed,
            effective_speed: record.base_angular_speed * speed_factor,
            angle: 0.0,
            spin: 0.0,
            position: Vec3::ZERO,
        };
        body.place();
        body
    }

    /// Advance one tick
    pub fn advance(&mut self) {
        self.angle += self.effective_speed;
        self.spin += SPIN_PER_TICK;
        self.place();
    }

    fn place(&mut self) {
        self.position = orbital_position(self.distance, self.angle);
    }
}

/// Position on a circle of radius `distance` in the XZ plane
pub fn orbital_position(distance: f32, angle: f32) -> Vec3 {
    Vec3::new(distance * angle.cos(), 0.0, distance * angle.sin())
}

/// All planets plus the global speed factor
#[derive(Debug, Clone)]
pub struct Orrery {
    bodies: Vec<OrbitingBody>,
    speed_factor: f32,
    ticks: u64,
}

impl Orrery {
    pub fn new(records: &[PlanetRecord], speed_factor: f32) -> Self {
        Self {
            bodies: records
                .iter()
                .map(|record| OrbitingBody::from_record(record, speed_factor))
                .collect(),
            speed_factor,
            ticks: 0,
        }
    }

    /// Bodies in configuration order. Read-only so every effective speed
    /// stays `base_speed * speed_factor`.
    pub fn bodies(&self) -> &[OrbitingBody] {
        &self.bodies
    }

    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Rescale every body's effective speed. Any finite or non-finite value
    /// is accepted; zero halts the orbits and negatives reverse them.
    pub fn set_speed_factor(&mut self, factor: f32) {
        self.speed_factor = factor;
        for body in &mut self.bodies {
            body.effective_speed = body.base_speed * factor;
        }
    }

    /// Advance every body by one tick
    pub fn tick(&mut self) {
        for body in &mut self.bodies {
            body.advance();
        }
        self.ticks += 1;
    }

    pub fn find_body(&self, name: &str) -> Option<&OrbitingBody> {
        self.bodies.iter().find(|b| b.name == name)
    }
}

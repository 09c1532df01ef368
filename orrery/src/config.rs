//! Configuration structs with defaults and RON loading.
//!
//! Every section is `#[serde(default)]`, so a config file only needs the
//! fields it changes. Without a file the built-in eight planets are used.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level orrery configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrreryConfig {
    /// Window settings.
    pub window: WindowConfig,
    /// Star field, sun, camera and mesh settings.
    pub scene: SceneConfig,
    /// Speed slider settings.
    pub speed: SpeedConfig,
    /// Planets, innermost first.
    pub planets: Vec<PlanetRecord>,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial width in physical pixels.
    pub width: u32,
    /// Initial height in physical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Scene configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of background stars.
    pub star_count: usize,
    /// Edge length of the cube the stars are scattered in.
    pub star_spread: f32,
    /// Fixed star field seed; random when unset.
    pub star_seed: Option<u64>,
    /// Sun radius in scene units.
    pub sun_radius: f32,
    /// Sun colour (sRGB).
    pub sun_color: [f32; 3],
    /// Camera distance from the origin along +Z.
    pub camera_distance: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    /// Longitude and latitude segments of the sphere mesh.
    pub sphere_segments: u32,
    /// Timeout for fetching remote textures, in seconds.
    pub texture_timeout_secs: u64,
}

/// Speed slider configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpeedConfig {
    /// Speed factor applied at startup.
    pub initial: f32,
    /// Slider lower bound.
    pub min: f32,
    /// Slider upper bound.
    pub max: f32,
    /// Slider step.
    pub step: f32,
}

/// One planet as listed in the configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanetRecord {
    pub name: String,
    /// Sphere radius in scene units.
    pub radius: f32,
    /// Orbit radius around the origin.
    pub orbital_distance: f32,
    /// Radians per tick at speed factor 1.
    pub base_angular_speed: f32,
    /// URL or file path of the surface texture.
    pub texture: String,
    /// Flat sRGB colour used when the texture cannot be loaded.
    #[serde(default = "PlanetRecord::default_color")]
    pub fallback_color: [f32; 3],
}

impl PlanetRecord {
    pub fn new(
        name: &str,
        radius: f32,
        orbital_distance: f32,
        base_angular_speed: f32,
        texture: &str,
        fallback_color: [f32; 3],
    ) -> Self {
        Self {
            name: name.to_string(),
            radius,
            orbital_distance,
            base_angular_speed,
            texture: texture.to_string(),
            fallback_color,
        }
    }

    fn default_color() -> [f32; 3] {
        [0.6, 0.6, 0.6]
    }
}

/// The built-in planet list.
pub fn default_planets() -> Vec<PlanetRecord> {
    vec![
        PlanetRecord::new("Mercury", 0.07, 1.2, 0.02, "https://i.imgur.com/x2g5rQm.jpg", [0.6, 0.6, 0.6]),
        PlanetRecord::new("Venus", 0.12, 1.8, 0.015, "https://i.imgur.com/YM8W4R9.jpg", [0.9, 0.75, 0.5]),
        PlanetRecord::new("Earth", 0.12, 2.5, 0.01, "https://i.imgur.com/nv36s2H.jpg", [0.2, 0.4, 0.8]),
        PlanetRecord::new("Mars", 0.09, 3.5, 0.007, "https://i.imgur.com/t2zNzsn.jpg", [0.8, 0.4, 0.2]),
        PlanetRecord::new("Jupiter", 0.25, 5.5, 0.004, "https://i.imgur.com/G3Xr2Gv.jpg", [0.85, 0.7, 0.55]),
        PlanetRecord::new("Saturn", 0.22, 6.5, 0.003, "https://i.imgur.com/lwOMm02.jpg", [0.9, 0.85, 0.6]),
        PlanetRecord::new("Uranus", 0.2, 8.5, 0.002, "https://i.imgur.com/ZXYpNqZ.jpg", [0.6, 0.85, 0.9]),
        PlanetRecord::new("Neptune", 0.2, 10.5, 0.001, "https://i.imgur.com/oH5M5Rs.jpg", [0.3, 0.4, 0.85]),
    ]
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            scene: SceneConfig::default(),
            speed: SpeedConfig::default(),
            planets: default_planets(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_count: 10_000,
            star_spread: 200.0,
            star_seed: None,
            sun_radius: 0.5,
            sun_color: [1.0, 1.0, 0.0],
            camera_distance: 12.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            sphere_segments: 32,
            texture_timeout_secs: 10,
        }
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            initial: 1.0,
            min: -2.0,
            max: 5.0,
            step: 0.1,
        }
    }
}

impl OrreryConfig {
    /// Load config from a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(contents)?)
    }

    /// Pretty RON, suitable as a starting point for a config file.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_eight_planets_innermost_first() {
        let config = OrreryConfig::default();
        let names: Vec<&str> = config.planets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
        assert!(config
            .planets
            .windows(2)
            .all(|w| w[0].orbital_distance < w[1].orbital_distance));
    }

    #[test]
    fn default_earth_matches_table() {
        let config = OrreryConfig::default();
        let earth = &config.planets[2];
        assert_eq!(earth.radius, 0.12);
        assert_eq!(earth.orbital_distance, 2.5);
        assert_eq!(earth.base_angular_speed, 0.01);
        assert!(earth.texture.starts_with("https://"));
    }

    #[test]
    fn dumped_config_parses_back() {
        let config = OrreryConfig::default();
        let ron_str = config.to_ron_string().unwrap();
        assert!(ron_str.contains("star_count: 10000"));
        assert_eq!(OrreryConfig::from_ron_str(&ron_str).unwrap(), config);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = OrreryConfig::from_ron_str("(window: (width: 800))").unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.speed, SpeedConfig::default());
        assert_eq!(config.planets.len(), 8);
    }

    #[test]
    fn planet_list_can_be_replaced() {
        let ron_str = r#"(
            planets: [
                (name: "Vulcan", radius: 0.05, orbital_distance: 0.8,
                 base_angular_speed: 0.05, texture: "assets/vulcan.png"),
            ],
        )"#;
        let config = OrreryConfig::from_ron_str(ron_str).unwrap();
        assert_eq!(config.planets.len(), 1);
        assert_eq!(config.planets[0].name, "Vulcan");
        assert_eq!(config.planets[0].fallback_color, [0.6, 0.6, 0.6]);
    }

    #[test]
    fn invalid_ron_is_a_parse_error() {
        let result = OrreryConfig::from_ron_str("{{not valid}}");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orrery.ron");
        std::fs::write(&path, "(scene: (star_count: 42))").unwrap();
        assert_eq!(OrreryConfig::load(&path).unwrap().scene.star_count, 42);

        let missing = dir.path().join("missing.ron");
        assert!(matches!(
            OrreryConfig::load(&missing),
            Err(ConfigError::Read { .. })
        ));
    }
}

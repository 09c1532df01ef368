//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::OrreryConfig;

/// Animated solar system.
///
/// CLI values override settings loaded from the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Animated solar system")]
pub struct CliArgs {
    /// Path to a RON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Initial speed factor. Zero halts the planets, negative reverses them.
    #[arg(long, allow_hyphen_values = true)]
    pub speed: Option<f32>,

    /// Number of background stars.
    #[arg(long)]
    pub stars: Option<usize>,

    /// Star field seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter (error, warn, info, debug, trace, or a full env_logger filter).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective configuration as RON and exit.
    #[arg(long)]
    pub dump_config: bool,
}

impl OrreryConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(speed) = args.speed {
            self.speed.initial = speed;
        }
        if let Some(stars) = args.stars {
            self.scene.star_count = stars;
        }
        if let Some(seed) = args.seed {
            self.scene.star_seed = Some(seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut config = OrreryConfig::default();
        let args = CliArgs {
            width: Some(1920),
            speed: Some(-1.0),
            seed: Some(7),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.speed.initial, -1.0);
        assert_eq!(config.scene.star_seed, Some(7));
        assert_eq!(config.scene.star_count, 10_000);
    }

    #[test]
    fn no_overrides_is_identity() {
        let mut config = OrreryConfig::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, OrreryConfig::default());
    }

    #[test]
    fn parses_negative_speed() {
        let args = CliArgs::try_parse_from(["orrery", "--speed", "-2.5", "--stars", "100"]).unwrap();
        assert_eq!(args.speed, Some(-2.5));
        assert_eq!(args.stars, Some(100));
        assert!(!args.dump_config);
    }
}

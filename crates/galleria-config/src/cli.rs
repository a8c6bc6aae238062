use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Galleria command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "galleria", about = "Headless circular gallery tour")]
pub struct CliArgs {
    /// Viewport width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of placeholder items when no manifest is given.
    #[arg(long)]
    pub items: Option<usize>,

    /// RON manifest of exhibited items.
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Lighting theme (default, gallery, dramatic, soft).
    #[arg(long)]
    pub theme: Option<String>,

    /// Simulated tour length in seconds.
    #[arg(long)]
    pub duration: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(items) = args.items {
            self.tour.items = items;
        }
        if let Some(ref manifest) = args.manifest {
            self.tour.manifest = Some(manifest.clone());
        }
        if let Some(ref theme) = args.theme {
            self.lighting.theme = theme.clone();
        }
        if let Some(duration) = args.duration {
            self.tour.duration = duration;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            theme: Some("soft".to_string()),
            items: Some(40),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.lighting.theme, "soft");
        assert_eq!(config.tour.items, 40);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.tour.duration, 30.0);
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "galleria",
            "--items",
            "20",
            "--duration",
            "12.5",
            "--manifest",
            "art/items.ron",
        ]);
        assert_eq!(args.items, Some(20));
        assert_eq!(args.duration, Some(12.5));
        assert_eq!(args.manifest, Some(PathBuf::from("art/items.ron")));
        assert!(args.theme.is_none());
    }
}

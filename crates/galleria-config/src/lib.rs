//! Configuration for the gallery.
//!
//! Settings persist to disk as `config.ron`, tolerate missing and unknown
//! fields, and can be overridden from the command line.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, InteractionConfig, LayoutConfig, LightingConfig, PerformanceConfig,
    TourConfig, WindowConfig,
};
pub use error::ConfigError;

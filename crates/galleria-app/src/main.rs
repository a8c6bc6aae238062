//! `galleria`: builds a circular gallery from a manifest (or placeholder
//! items) and runs a scripted headless tour through it, logging camera,
//! lighting, and performance activity.
//!
//! Run with: `cargo run -p galleria-app -- --items 20 --theme dramatic`

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use galleria_app::gallery::build_gallery;
use galleria_app::manifest::Manifest;
use galleria_app::settings;
use galleria_app::tour::{Tour, TourScript};
use galleria_assets::{FrameStyle, ImageFileLoader, TextureCache};
use galleria_config::{CliArgs, Config};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(Config::default_dir);
    let mut config = match config_dir.as_deref() {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|err| {
            eprintln!("galleria: {err}; using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    galleria_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tour_settings = settings::tour_settings(config)?;
    let (manifest, image_root) = match &config.tour.manifest {
        Some(path) => (Manifest::load(path)?, manifest_root(path)),
        None => (Manifest::placeholders(config.tour.items), PathBuf::from(".")),
    };
    if manifest.is_empty() {
        warn!("no items to exhibit; the gallery will be empty");
    }
    info!(
        items = manifest.len(),
        theme = %tour_settings.theme,
        viewport = ?(config.window.width, config.window.height),
        "{}",
        config.window.title
    );

    let loader = ImageFileLoader::new(image_root);
    let mut cache = TextureCache::new();
    let gallery = pollster::block_on(build_gallery(
        &manifest.items,
        &settings::layout_options(config),
        FrameStyle::default(),
        &mut cache,
        &loader,
    ));

    let script = TourScript::demo(manifest.len(), tour_settings.viewport, config.tour.duration);
    let mut tour = Tour::new(gallery, cache, tour_settings);
    let report = tour.run(&script, config.tour.duration);
    tour.dispose();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn manifest_root(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

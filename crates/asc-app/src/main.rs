use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use asc_core::config::{AppConfig, load_config};
use asc_core::frame::Viewport;
use asc_core::traits::ViewportProvider;
use asc_source::dispatch::Dispatcher;
use clap::Parser;

pub mod cli;
pub mod pipeline;
pub mod viewport;

/// Nom du fichier de config cherché dans le répertoire personnel.
const DEFAULT_CONFIG_NAME: &str = ".asciinator.toml";

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let config = cli.apply(resolve_config(&cli)?);
    let flags = config.flags.clone();
    let options = pipeline::ConvertOptions {
        aspect_ratio: f64::from(config.aspect_ratio),
        profile: config.color.resolve(),
        braille_fill: config.braille_fill,
    };
    log::debug!("Flags : {flags:?}, options : {options:?}");

    // 4. Résolveurs (URL puis fichier local) et viewport
    let dispatcher = Dispatcher::with_defaults(Duration::from_secs(config.timeout_secs))?;
    log::debug!("Résolveurs : {:?}", dispatcher.names());
    let viewport: Box<dyn ViewportProvider> = match cli.fixed_viewport() {
        Some((w, h)) => Box::new(viewport::FixedViewport(Viewport::new(w, h))),
        None => Box::new(viewport::TerminalViewport::new(
            config.border_rows,
            Viewport::new(config.fallback_width, config.fallback_height),
        )),
    };

    // 5. Une conversion par requête ; arrêt à la première erreur
    for request in &cli.images {
        let art = pipeline::convert(request, &flags, &dispatcher, viewport.as_ref(), &options)?;
        println!("{art}");
    }
    Ok(())
}

/// Resolve config: explicit --config must exist, the home default is optional.
fn resolve_config(cli: &cli::Cli) -> Result<AppConfig> {
    if let Some(ref path) = cli.config {
        return load_config(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => {
            log::info!("Config : {}", path.display());
            load_config(&path)
        }
        _ => Ok(AppConfig::default()),
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_NAME))
}

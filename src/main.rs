//! Practice Looper
//!
//! A desktop video player for musicians and dancers: mark A/B points, save
//! named loops per video, repeat them, and turn embedded chapters into loops.

mod app;
mod components;
mod config;
mod constants;
mod core;
mod error;
mod hotkeys;
mod state;
mod utils;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_filter)
            .or_else(|_| EnvFilter::try_new(Settings::default().log_filter))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::load_or_default();
    init_tracing(&settings)?;
    tracing::info!(data_dir = %core::paths::app_data_root().display(), "Starting Practice Looper");

    // Configure the window
    let config = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("Practice Looper")
                .with_inner_size(LogicalSize::new(1200.0, 760.0))
                .with_resizable(true),
        )
        .with_menu(None); // Disable default menu bar

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .with_context(settings)
        .launch(app::App);
    Ok(())
}

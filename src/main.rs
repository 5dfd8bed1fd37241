mod app;
mod domain;
mod models;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use gpui::Application;
use tracing_subscriber::EnvFilter;

use crate::ui::FileAssets;

/// Board client for an external chess rules engine.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the rules-engine executable
    #[arg(long, env = "TABIYA_BACKEND", default_value = "chess-backend")]
    backend: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    Application::new()
        .with_assets(FileAssets::new())
        .run(move |cx| app::run(args.backend, cx));
}

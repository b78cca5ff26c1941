//! Terminal front end: settings, resource list, and the presentation loop.

pub mod cli;

mod app;
mod effects;
mod provider;
mod render;
mod settings;

use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use engine_logging::engine_info;
use gridfetch_engine::BatchCoordinator;
use log::LevelFilter;

use cli::Cli;

const LOG_FILE: &str = "./gridfetch.log";

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    engine_logging::initialize(cli.log.into(), level, Path::new(LOG_FILE));

    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(settings::default_settings_path);
    let session = settings::resolve(&cli, settings::load_settings(&settings_path));
    let urls = provider::load_urls(session.urls_file.as_deref())?;
    engine_info!(
        "Session: {} urls -> {:?}",
        urls.len(),
        session.output_dir
    );

    let coordinator = BatchCoordinator::new(session.engine.clone())
        .context("failed to start download engine")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = app::run_session(&session, urls, coordinator, &mut out)?;
    writeln!(
        out,
        "{} of {} images available in {} ({} missing)",
        report.shown,
        report.total,
        session.output_dir.display(),
        report.missing
    )?;
    Ok(())
}

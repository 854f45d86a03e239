mod app;
mod camera;
mod cli;
mod cloud;
mod color;
mod config;
mod input;
mod label;
mod layout;
mod math;
mod panel;
mod render;
mod scene;
mod typeface;
mod words;

use anyhow::{Context, Result};
use std::fs::File;

fn main() -> Result<()> {
    let args = cli::parse();
    init_logging(&args)?;
    app::run(args)
}

/// The animation owns the screen, so logs only go somewhere when a file is given.
fn init_logging(args: &cli::Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level.as_str()))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
    Ok(())
}

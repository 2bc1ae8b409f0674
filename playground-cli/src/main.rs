mod cli;
mod config_file;
mod frame_clock;
mod window;

use clap::Parser;
use playground_core::Playground;

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    // Quiet GPU backend chatter unless RUST_LOG asks for it.
    let default = "info,wgpu_hal=warn,wgpu_core=warn,naga=warn";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();

    let cli = Cli::parse();

    if let Some(Command::Init { dir, force }) = &cli.command {
        let path = config_file::write_default(dir, *force)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let (mut config, path) = config_file::resolve_config(cli.config.as_deref())?;
    match &path {
        Some(path) => log::info!("Using config {}", path.display()),
        None => log::info!("No {} found, using defaults", config_file::CONFIG_FILE_NAME),
    }
    cli.apply_overrides(&mut config);

    let playground = Playground::new(config)?;
    log::info!(
        "Physics playground: {} boxes, left-drag a box to throw it, drag empty space to pan",
        playground.world().body_count()
    );
    window::run(playground)
}

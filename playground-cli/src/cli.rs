use std::path::PathBuf;

use clap::{Parser, Subcommand};
use playground_core::PlaygroundConfig;

#[derive(Parser)]
#[command(
    name = "playground",
    about = "Drag rigid-body boxes around a pannable 2D world",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (default: nearest playground.toml walking up from the
    /// current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the box layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of boxes to spawn
    #[arg(long)]
    pub boxes: Option<usize>,

    /// Initial window width
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height
    #[arg(long)]
    pub height: Option<u32>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write a default playground.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    pub fn apply_overrides(&self, config: &mut PlaygroundConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(count) = self.boxes {
            config.boxes.count = count;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_runs_with_file_values() {
        let cli = Cli::try_parse_from(["playground"]).unwrap();
        assert!(cli.command.is_none());
        let mut config = PlaygroundConfig::default();
        config.boxes.count = 5;
        cli.apply_overrides(&mut config);
        assert_eq!(config.boxes.count, 5);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "playground", "--seed", "3", "--boxes", "12", "--width", "640", "--height", "480",
        ])
        .unwrap();
        let mut config = PlaygroundConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.boxes.count, 12);
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 480);
    }

    #[test]
    fn test_init_subcommand() {
        let cli = Cli::try_parse_from(["playground", "init", "demo", "--force"]).unwrap();
        match cli.command {
            Some(Command::Init { dir, force }) => {
                assert_eq!(dir, PathBuf::from("demo"));
                assert!(force);
            }
            None => panic!("expected init"),
        }
    }

    #[test]
    fn test_rejects_bad_number() {
        assert!(Cli::try_parse_from(["playground", "--boxes", "lots"]).is_err());
    }
}

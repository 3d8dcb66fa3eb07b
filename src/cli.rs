use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::core::config::GameConfig;
use crate::games::SHAPEFALL;

#[derive(Parser, Debug)]
#[command(name = SHAPEFALL.id)]
#[command(about = SHAPEFALL.description)]
#[command(version)]
pub struct Cli {
    /// JSON config file; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Milliseconds between spawns
    #[arg(long = "spawn-ms")]
    pub spawn_ms: Option<u64>,

    /// Milliseconds between motion steps
    #[arg(long = "motion-ms")]
    pub motion_ms: Option<u64>,

    /// Seed for reproducible spawns
    #[arg(long)]
    pub seed: Option<u64>,

    /// Turn off the catch sound
    #[arg(long)]
    pub mute: bool,

    /// Write logs here (filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Config file (or defaults) with flags layered on top.
    pub fn resolve_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(ms) = self.spawn_ms {
            config.spawn_interval_ms = ms;
        }
        if let Some(ms) = self.motion_ms {
            config.motion_interval_ms = ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.mute {
            config.sound = false;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::io::Write;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from(["shapefall", "--spawn-ms", "500", "--seed", "4", "--mute"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.spawn_interval_ms, 500);
        assert_eq!(config.motion_interval_ms, 50);
        assert_eq!(config.seed, Some(4));
        assert!(!config.sound);
    }

    #[test]
    fn flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("shapefall-cli-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "spawn_interval_ms": 700, "motion_interval_ms": 25 }}"#).unwrap();
        drop(file);

        let args: Vec<OsString> = vec![
            "shapefall".into(),
            "--config".into(),
            path.clone().into_os_string(),
            "--motion-ms".into(),
            "40".into(),
        ];
        let cli = Cli::parse_from(args);
        let config = cli.resolve_config().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.spawn_interval_ms, 700);
        assert_eq!(config.motion_interval_ms, 40);
    }

    #[test]
    fn zero_flag_is_rejected() {
        let cli = Cli::parse_from(["shapefall", "--motion-ms", "0"]);
        assert!(cli.resolve_config().is_err());
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::physics::Arena;
use crate::session::Rules;

const APP_DIR: &str = "dodgeball";
/// Largest accepted arena side, in arena units.
const MAX_ARENA_SIDE: i32 = 10_000;
const MAX_TICK_MS: u64 = 1_000;

/// Command-line options. Anything given here overrides the config file.
#[derive(Debug, Default, Parser)]
#[command(name = "dodgeball", version, about = "Dodge the bouncing balls for as long as you can")]
pub struct Cli {
    /// Path to a config file (defaults to <config dir>/dodgeball/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// SQLite file holding the scoreboard
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Seed for ball spawns, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds per game tick
    #[arg(long)]
    pub tick_ms: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tick_ms: u64,
    pub arena_width: i32,
    pub arena_height: i32,
    pub player_size: i32,
    pub player_speed: i32,
    pub ball_radius: i32,
    /// How long an arrow key counts as held after its last key event, for
    /// terminals that never report releases. Must cover the terminal's
    /// auto-repeat delay or a held key stutters after the first step; the
    /// cost is that the avatar keeps moving this long after a release.
    pub key_hold_ms: u64,
    pub database: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    /// Used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let rules = Rules::default();
        Self {
            tick_ms: 16,
            arena_width: rules.arena.width,
            arena_height: rules.arena.height,
            player_size: rules.player_size,
            player_speed: rules.player_speed,
            ball_radius: rules.ball_radius,
            key_hold_ms: 500,
            database: None,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Load from `path`, or from the default location if none is given.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        Self::parse(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(db) = &cli.database {
            self.database = Some(db.clone());
        }
        if let Some(ms) = cli.tick_ms {
            self.tick_ms = ms;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 || self.tick_ms > MAX_TICK_MS {
            return Err(ConfigError::Invalid(format!(
                "tick_ms must be between 1 and {MAX_TICK_MS}"
            )));
        }
        for (name, side) in [("arena_width", self.arena_width), ("arena_height", self.arena_height)] {
            if !(1..=MAX_ARENA_SIDE).contains(&side) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between 1 and {MAX_ARENA_SIDE}"
                )));
            }
        }
        if self.ball_radius <= 0 || self.player_size <= 0 || self.player_speed <= 0 {
            return Err(ConfigError::Invalid(
                "ball_radius, player_size and player_speed must be positive".into(),
            ));
        }

        // i64 so a huge radius cannot overflow here
        let shortest = i64::from(self.arena_width.min(self.arena_height));
        let ball_span = 2 * i64::from(self.ball_radius) + 3;
        if ball_span > shortest || i64::from(self.player_size) > shortest {
            return Err(ConfigError::Invalid(format!(
                "arena {}x{} is too small for the ball and player",
                self.arena_width, self.arena_height
            )));
        }
        if self.player_speed >= self.arena_width.min(self.arena_height) {
            return Err(ConfigError::Invalid(
                "player_speed must be smaller than the arena".into(),
            ));
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn hold_ticks(&self) -> u64 {
        self.key_hold_ms / self.tick_ms.max(1)
    }

    pub fn rules(&self) -> Rules {
        Rules {
            arena: Arena {
                width: self.arena_width,
                height: self.arena_height,
            },
            player_size: self.player_size,
            player_speed: self.player_speed,
            ball_radius: self.ball_radius,
        }
    }

    fn data_file(name: &str) -> PathBuf {
        // Fall back to the working directory
        match dirs::data_dir() {
            Some(dir) => dir.join(APP_DIR).join(name),
            None => PathBuf::from(name),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| Self::data_file("scores.db"))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| Self::data_file("dodgeball.log"))
    }
}

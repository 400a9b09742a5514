//! Runtime configuration for the terminal game.
//!
//! Two layers: environment variables first, then command-line flags on top.
//! Unparsable environment values fall back to the defaults; bad flags are
//! errors, since the user just typed them.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Result};

use crate::types::{DEFAULT_TICK_MS, LINE_FLASH_MS};

pub const ENV_TICK_MS: &str = "TETRISH_TICK_MS";
pub const ENV_FLASH_MS: &str = "TETRISH_FLASH_MS";
pub const ENV_SEED: &str = "TETRISH_SEED";

pub const USAGE: &str = "\
usage: tetrish [--tick-ms N] [--flash-ms N] [--seed N]

  --tick-ms N    milliseconds between automatic descents (default 1000)
  --flash-ms N   milliseconds a completed row stays visible (default 1000, 0 disables)
  --seed N       piece sequence seed (default: system clock)
  -h, --help     show this help

environment: TETRISH_TICK_MS, TETRISH_FLASH_MS, TETRISH_SEED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub tick_ms: u64,
    pub flash_ms: u64,
    /// `None` seeds from the system clock at startup
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            flash_ms: LINE_FLASH_MS,
            seed: None,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(GameConfig),
    Help,
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Environment layer over an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(ms) = lookup(ENV_TICK_MS)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&ms| ms > 0)
        {
            config.tick_ms = ms;
        }

        if let Some(ms) = lookup(ENV_FLASH_MS).and_then(|s| s.trim().parse().ok()) {
            config.flash_ms = ms;
        }

        config.seed = lookup(ENV_SEED).and_then(|s| s.trim().parse().ok());
        config
    }

    /// Apply command-line flags (program name already stripped) on top of `self`
    pub fn parse_args(self, args: &[String]) -> Result<Command> {
        let mut config = self;
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "--tick-ms" => {
                    let ms: u64 = flag_value(arg, iter.next())?;
                    if ms == 0 {
                        bail!("--tick-ms must be greater than zero");
                    }
                    config.tick_ms = ms;
                }
                "--flash-ms" => config.flash_ms = flag_value(arg, iter.next())?,
                "--seed" => config.seed = Some(flag_value(arg, iter.next())?),
                other => bail!("unknown argument: {}", other),
            }
        }

        Ok(Command::Play(config))
    }

    /// Seed to start the game with
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn flag_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T> {
    let v = value.ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

fn clock_seed() -> u32 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => (d.as_secs() as u32) ^ d.subsec_nanos(),
        Err(_) => 1,
    }
}

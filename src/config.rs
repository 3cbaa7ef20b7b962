//! Runtime configuration: environment variables, then command-line flags.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Context, Result};

use crate::core::Timing;

pub const ENV_SEED: &str = "BLOCK_GAME_SEED";
pub const ENV_GRAVITY_MS: &str = "BLOCK_GAME_GRAVITY_MS";
pub const ENV_SPAWN_DELAY_MS: &str = "BLOCK_GAME_SPAWN_DELAY_MS";
pub const ENV_LOG_PATH: &str = "BLOCK_GAME_LOG_PATH";

pub const USAGE: &str =
    "usage: block-game [--seed N] [--gravity-ms N] [--spawn-delay-ms N] [--log PATH]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed for the piece generator
    pub seed: u32,
    pub timing: Timing,
    /// JSON-lines event log; `None` disables logging
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: time_seed(),
            timing: Timing::default(),
            log_path: None,
        }
    }
}

impl Config {
    /// Environment overlaid by `args` (program name already stripped).
    pub fn load(args: &[String]) -> Result<Self> {
        Self::from_env()?.with_args(args)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();
        if let Some(v) = get(ENV_SEED) {
            config.seed = parse_num(ENV_SEED, &v)?;
        }
        if let Some(v) = get(ENV_GRAVITY_MS) {
            config.timing.gravity_interval_ms = parse_num(ENV_GRAVITY_MS, &v)?;
        }
        if let Some(v) = get(ENV_SPAWN_DELAY_MS) {
            config.timing.spawn_delay_ms = parse_num(ENV_SPAWN_DELAY_MS, &v)?;
        }
        config.log_path = get(ENV_LOG_PATH).map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line flags on top of `self`.
    pub fn with_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            let mut value = || {
                i += 1;
                args.get(i)
                    .ok_or_else(|| anyhow!("missing value for {}\n{}", flag, USAGE))
            };
            match flag {
                "--seed" => self.seed = parse_num(flag, value()?)?,
                "--gravity-ms" => self.timing.gravity_interval_ms = parse_num(flag, value()?)?,
                "--spawn-delay-ms" => self.timing.spawn_delay_ms = parse_num(flag, value()?)?,
                "--log" => self.log_path = Some(PathBuf::from(value()?)),
                other => bail!("unknown argument: {}\n{}", other, USAGE),
            }
            i += 1;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.timing.gravity_interval_ms == 0 {
            bail!("gravity interval must be at least 1ms");
        }
        Ok(())
    }
}

fn parse_num(name: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .with_context(|| format!("invalid {} value: {}", name, value))
}

fn time_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.timing, Timing::default());
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn test_env_values() {
        let config = Config::from_lookup(lookup(&[
            (ENV_SEED, "42"),
            (ENV_GRAVITY_MS, " 250 "),
            (ENV_SPAWN_DELAY_MS, "0"),
            (ENV_LOG_PATH, "/tmp/game.jsonl"),
        ]))
        .unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.timing.gravity_interval_ms, 250);
        assert_eq!(config.timing.spawn_delay_ms, 0);
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/game.jsonl")));
    }

    #[test]
    fn test_blank_log_path_disables_logging() {
        let config = Config::from_lookup(lookup(&[(ENV_LOG_PATH, "  ")])).unwrap();
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn test_invalid_env_number() {
        let err = Config::from_lookup(lookup(&[(ENV_SEED, "abc")])).unwrap_err();
        assert!(err.to_string().contains(ENV_SEED));
    }

    #[test]
    fn test_args_override_env() {
        let env = lookup(&[(ENV_SEED, "1"), (ENV_GRAVITY_MS, "300")]);
        let base = Config::from_lookup(env).unwrap();
        let config = base
            .with_args(&args(&["--seed", "7", "--log", "events.jsonl"]))
            .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.timing.gravity_interval_ms, 300);
        assert_eq!(config.log_path, Some(PathBuf::from("events.jsonl")));
    }

    #[test]
    fn test_zero_gravity_rejected() {
        assert!(Config::from_lookup(lookup(&[(ENV_GRAVITY_MS, "0")])).is_err());
        let base = Config::from_lookup(|_| None).unwrap();
        assert!(base.with_args(&args(&["--gravity-ms", "0"])).is_err());
    }

    #[test]
    fn test_bad_args() {
        let base = Config::from_lookup(|_| None).unwrap();
        assert!(base.clone().with_args(&args(&["--seed"])).is_err());
        assert!(base.clone().with_args(&args(&["--speed", "3"])).is_err());
        assert!(base.with_args(&args(&["--spawn-delay-ms", "-1"])).is_err());
    }
}

use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_FPS: u32 = 60;

/// Viewer settings, read from `ECOSIM_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Frames (and therefore ticks) per second
    pub fps: u32,

    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,

    /// Run this many ticks without a terminal and print the final stats
    pub headless_ticks: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fps = parse_var(&lookup, "ECOSIM_FPS")?.unwrap_or(DEFAULT_FPS);
        if fps == 0 {
            bail!("ECOSIM_FPS must be greater than zero");
        }

        Ok(Self {
            fps,
            seed: parse_var(&lookup, "ECOSIM_SEED")?,
            headless_ticks: parse_var(&lookup, "ECOSIM_HEADLESS_TICKS")?,
        })
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("invalid {key}: {raw:?}"))
        })
        .transpose()
}

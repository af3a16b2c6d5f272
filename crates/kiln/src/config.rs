//! Driver configuration read from `KILN_*` environment variables.

use std::{
    env::{self, VarError},
    str::FromStr,
    time::Duration,
};

use anyhow::{bail, Context};

use crate::demo::{Canvas, DemoKind};

const DEFAULT_CANVAS: Canvas = Canvas {
    width: 400,
    height: 300,
};
const DEFAULT_TICKS: u64 = 100;
const DEFAULT_TICK_MS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub demo: DemoKind,
    pub canvas: Canvas,
    /// Number of ticks to run for. `None` runs until the process is killed.
    pub ticks: Option<u64>,
    pub tick_interval: Duration,
    /// Seed for the random colors. `None` seeds from the system.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo: DemoKind::LitF,
            canvas: DEFAULT_CANVAS,
            ticks: Some(DEFAULT_TICKS),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| match env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(s)) => {
                bail!("invalid value set for `{name}` variable: {s:?}")
            }
        })
    }

    /// Builds a configuration from a variable lookup function.
    ///
    /// `lookup` returns `Ok(None)` for unset variables. Unset variables take their default
    /// value; set but unparseable ones are an error naming the variable.
    pub fn from_lookup<F>(mut lookup: F) -> anyhow::Result<Self>
    where
        F: FnMut(&'static str) -> anyhow::Result<Option<String>>,
    {
        let default = Self::default();

        let demo = parse_var(&mut lookup, "KILN_DEMO")?.unwrap_or(default.demo);
        let canvas = parse_var(&mut lookup, "KILN_CANVAS")?.unwrap_or(default.canvas);
        let ticks = match parse_var::<u64, _>(&mut lookup, "KILN_TICKS")? {
            Some(0) => None,
            Some(n) => Some(n),
            None => default.ticks,
        };
        let tick_interval = match parse_var::<u64, _>(&mut lookup, "KILN_TICK_MS")? {
            Some(0) => bail!("`KILN_TICK_MS` must be greater than zero"),
            Some(ms) => Duration::from_millis(ms),
            None => default.tick_interval,
        };
        let seed = parse_var(&mut lookup, "KILN_SEED")?;

        let config = Self {
            demo,
            canvas,
            ticks,
            tick_interval,
            seed,
        };
        log::debug!("{config:?}");
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &mut F, name: &'static str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: Into<anyhow::Error>,
    F: FnMut(&'static str) -> anyhow::Result<Option<String>>,
{
    match lookup(name)? {
        Some(value) => {
            let parsed = value
                .trim()
                .parse::<T>()
                .map_err(Into::<anyhow::Error>::into)
                .with_context(|| format!("invalid value set for `{name}` variable: '{value}'"))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

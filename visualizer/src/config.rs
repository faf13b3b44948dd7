//! Command-line configuration: [`VizConfig`] and [`ConfigError`].

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use pathviz_core::{Point, Range};
use pathviz_search::{Heuristic, TieBreak};

/// Largest accepted board side; keeps the board inside a sane terminal.
pub const MAX_SIZE: i32 = 200;

pub const USAGE: &str = "\
Usage: pathviz [OPTIONS]

Options:
  --size N                board side length (default 20)
  --start X,Y             start cell (default 0,0)
  --target X,Y            target cell (default size-1,size-1)
  --tick-ms N             milliseconds per search step (default 30)
  --cell-width N          terminal columns per cell (default 2)
  --density P             wall probability for random walls (default 0.3)
  --seed N                random wall seed
  --heuristic NAME        manhattan | chebyshev (default manhattan)
  --tie-break NAME        earliest | latest (default earliest)
  --no-closed             do not colour expanded cells
  --log PATH              write log output to PATH
  --help                  print this help";

/// Everything the visualizer needs to start.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VizConfig {
    pub size: i32,
    pub start: Point,
    pub target: Point,
    pub tick_ms: u64,
    pub cell_width: i32,
    pub density: f64,
    pub seed: Option<u64>,
    pub heuristic: Heuristic,
    pub tie_break: TieBreak,
    pub mark_closed: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            size: 20,
            start: Point::new(0, 0),
            target: Point::new(19, 19),
            tick_ms: 30,
            cell_width: 2,
            density: 0.3,
            seed: None,
            heuristic: Heuristic::default(),
            tie_break: TieBreak::default(),
            mark_closed: true,
            log_file: None,
        }
    }
}

/// Rejected command-line input.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `--help` was given; not a failure, the caller prints [`USAGE`].
    HelpRequested,
    UnknownFlag(String),
    MissingValue(&'static str),
    InvalidValue { flag: &'static str, value: String },
    /// Start or target rejected by the grid's own validation.
    Placement(pathviz_search::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HelpRequested => write!(f, "help requested"),
            Self::UnknownFlag(flag) => write!(f, "unknown option `{flag}`"),
            Self::MissingValue(flag) => write!(f, "option `{flag}` needs a value"),
            Self::InvalidValue { flag, value } => {
                write!(f, "invalid value `{value}` for `{flag}`")
            }
            Self::Placement(e) => write!(f, "bad endpoints: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Placement(e) => Some(e),
            _ => None,
        }
    }
}

impl From<pathviz_search::Error> for ConfigError {
    fn from(e: pathviz_search::Error) -> Self {
        Self::Placement(e)
    }
}

impl VizConfig {
    /// Parse flags (without the program name) on top of the defaults and
    /// validate the result.
    ///
    /// When `--size` is given without `--target`, the target follows the
    /// size to the bottom-right corner.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cfg = Self::default();
        let mut target_given = false;
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--help" | "-h" => return Err(ConfigError::HelpRequested),
                "--no-closed" => cfg.mark_closed = false,
                "--size" => cfg.size = parse_num(&mut args, "--size")?,
                "--start" => cfg.start = parse_point(&mut args, "--start")?,
                "--target" => {
                    cfg.target = parse_point(&mut args, "--target")?;
                    target_given = true;
                }
                "--tick-ms" => cfg.tick_ms = parse_num(&mut args, "--tick-ms")?,
                "--cell-width" => cfg.cell_width = parse_num(&mut args, "--cell-width")?,
                "--density" => cfg.density = parse_num(&mut args, "--density")?,
                "--seed" => cfg.seed = Some(parse_num(&mut args, "--seed")?),
                "--heuristic" => cfg.heuristic = parse_named(&mut args, "--heuristic")?,
                "--tie-break" => cfg.tie_break = parse_named(&mut args, "--tie-break")?,
                "--log" => {
                    let path = args.next().ok_or(ConfigError::MissingValue("--log"))?;
                    cfg.log_file = Some(PathBuf::from(path));
                }
                _ => return Err(ConfigError::UnknownFlag(flag)),
            }
        }

        if !target_given {
            cfg.target = Point::new(cfg.size - 1, cfg.size - 1);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check ranges and endpoints before any grid is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_SIZE).contains(&self.size) {
            return Err(invalid("--size", self.size));
        }
        if self.tick_ms == 0 {
            return Err(invalid("--tick-ms", self.tick_ms));
        }
        if !(1..=4).contains(&self.cell_width) {
            return Err(invalid("--cell-width", self.cell_width));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(invalid("--density", self.density));
        }
        let bounds = Range::square(self.size);
        for pos in [self.start, self.target] {
            if !bounds.contains(pos) {
                return Err(pathviz_search::Error::OutOfBounds {
                    pos,
                    size: self.size,
                }
                .into());
            }
        }
        if self.start == self.target {
            return Err(pathviz_search::Error::Degenerate { pos: self.start }.into());
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

fn invalid(flag: &'static str, value: impl fmt::Display) -> ConfigError {
    ConfigError::InvalidValue {
        flag,
        value: value.to_string(),
    }
}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &'static str) -> Result<String, ConfigError> {
    args.next().ok_or(ConfigError::MissingValue(flag))
}

fn parse_num<T, I>(args: &mut I, flag: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    I: Iterator<Item = String>,
{
    let v = value(args, flag)?;
    v.trim().parse().map_err(|_| ConfigError::InvalidValue { flag, value: v })
}

fn parse_named<T, I>(args: &mut I, flag: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = String>,
    I: Iterator<Item = String>,
{
    let v = value(args, flag)?;
    v.parse().map_err(|_| ConfigError::InvalidValue { flag, value: v })
}

fn parse_point<I: Iterator<Item = String>>(args: &mut I, flag: &'static str) -> Result<Point, ConfigError> {
    let v = value(args, flag)?;
    let parsed = v.split_once(',').and_then(|(x, y)| {
        let x = x.trim().parse().ok()?;
        let y = y.trim().parse().ok()?;
        Some(Point::new(x, y))
    });
    parsed.ok_or(ConfigError::InvalidValue { flag, value: v })
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trips_through_json() {
        let cfg = VizConfig {
            seed: Some(7),
            heuristic: Heuristic::Chebyshev,
            ..VizConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: VizConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}

//! AlmaTrend CLI — offline front end for the indicator pipeline.
//!
//! Commands:
//! - `signal` — classify the latest bars of a candle CSV into a trading signal
//! - `series` — print the full trend-line series for charting or diffing
//!
//! Input is a CSV with a `date,open,high,low,close,volume` header. Parameters
//! come from a TOML config file and/or per-flag overrides; defaults match the
//! production scanner (ALMA 5/0.85/2.75, stdev window 20, factor 1.8).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use almatrend_core::domain::{candle, Candle};
use almatrend_core::indicators::{AlmaParams, AlmaSupertrend};
use almatrend_core::signals::classify;

#[derive(Parser)]
#[command(
    name = "almatrend",
    about = "ALMA Supertrend — trend line and signal classification over candle CSVs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the latest bars into LONG_CROSS/SHORT_CROSS/BULL/BEAR/NEUTRAL.
    Signal {
        #[command(flatten)]
        input: InputArgs,

        /// Emit machine-readable JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print date,close,trend_line,direction for every bar.
    Series {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Candle CSV file (date,open,high,low,close,volume).
    #[arg(long)]
    data: PathBuf,

    /// TOML config file; flags below override individual fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// ALMA window length.
    #[arg(long)]
    length: Option<usize>,

    /// ALMA offset in [0, 1].
    #[arg(long)]
    offset: Option<f64>,

    /// ALMA sigma.
    #[arg(long)]
    sigma: Option<f64>,

    /// Rolling stdev window.
    #[arg(long)]
    window: Option<usize>,

    /// Band width factor.
    #[arg(long)]
    factor: Option<f64>,

    /// Minimum number of candles required before computing anything.
    #[arg(long)]
    min_bars: Option<usize>,
}

/// Indicator configuration, TOML-serializable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct IndicatorConfig {
    alma: AlmaParams,
    stdev_window: usize,
    factor: f64,
    min_bars: usize,
}

impl Default for IndicatorConfig {
    /// Production scanner defaults.
    fn default() -> Self {
        Self {
            alma: AlmaParams::default(),
            stdev_window: 20,
            factor: 1.8,
            min_bars: 100,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Signal { input, json } => cmd_signal(&input, json),
        Commands::Series { input } => cmd_series(&input),
    }
}

fn resolve_config(input: &InputArgs) -> Result<IndicatorConfig> {
    let mut config = match &input.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => IndicatorConfig::default(),
    };

    if let Some(length) = input.length {
        config.alma.length = length;
    }
    if let Some(offset) = input.offset {
        config.alma.offset = offset;
    }
    if let Some(sigma) = input.sigma {
        config.alma.sigma = sigma;
    }
    if let Some(window) = input.window {
        config.stdev_window = window;
    }
    if let Some(factor) = input.factor {
        config.factor = factor;
    }
    if let Some(min_bars) = input.min_bars {
        config.min_bars = min_bars;
    }
    Ok(config)
}

fn load_candles(path: &Path) -> Result<Vec<Candle>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut candles = Vec::new();
    for (i, row) in reader.deserialize::<Candle>().enumerate() {
        let c: Candle = row.with_context(|| format!("bad candle at row {}", i + 1))?;
        candles.push(c);
    }
    if candles.is_empty() {
        bail!("{} contains no candles", path.display());
    }
    Ok(candles)
}

fn cmd_signal(input: &InputArgs, json: bool) -> Result<()> {
    let config = resolve_config(input)?;
    let candles = load_candles(&input.data)?;
    if candles.len() < config.min_bars {
        bail!(
            "insufficient candles: have {}, need {} (lower --min-bars to override)",
            candles.len(),
            config.min_bars
        );
    }

    let closes = candle::closes(&candles);
    let supertrend = AlmaSupertrend::new(config.alma, config.stdev_window, config.factor)?;
    let trend_line = supertrend.compute_bands(&closes).trend_line;
    let signal = classify(&trend_line, &closes)?;

    let last_close = *closes.last().expect("non-empty");
    let last_line = trend_line.last().copied().flatten();
    // Same distance figure the scanner logs while waiting for a cross.
    let distance_pct = last_line.map(|line| 100.0 * (last_close / line - 1.0));

    if json {
        let out = serde_json::json!({
            "signal": signal,
            "date": candles.last().map(|c| c.date),
            "close": last_close,
            "trend_line": last_line,
            "distance_pct": distance_pct,
            "bars": candles.len(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("signal:     {signal}");
        println!("close:      {last_close:.4}");
        match (last_line, distance_pct) {
            (Some(line), Some(pct)) => {
                println!("trend line: {line:.4}");
                println!("distance:   {pct:+.2}%");
            }
            _ => println!("trend line: undefined (still warming up)"),
        }
        println!("bars:       {}", candles.len());
    }
    Ok(())
}

fn cmd_series(input: &InputArgs) -> Result<()> {
    let config = resolve_config(input)?;
    let candles = load_candles(&input.data)?;

    let closes = candle::closes(&candles);
    let supertrend = AlmaSupertrend::new(config.alma, config.stdev_window, config.factor)?;
    let bands = supertrend.compute_bands(&closes);

    println!("date,close,trend_line,direction");
    for (i, c) in candles.iter().enumerate() {
        let line = bands.trend_line[i]
            .map(|v| format!("{v:.6}"))
            .unwrap_or_default();
        let direction = bands.direction[i]
            .map(|d| d.value().to_string())
            .unwrap_or_default();
        println!("{},{},{line},{direction}", c.date, c.close);
    }
    Ok(())
}

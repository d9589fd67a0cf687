//! ChartLab CLI: build chart figures and indicator tables from CSV files.
//!
//! Commands:
//! - `render`: compose a figure from prices (+ optional trade log) and emit JSON
//! - `indicators`: compute EMA and MACD columns and emit CSV

use anyhow::{Context, Result};
use chartlab_core::data::{export_indicators_csv, load_price_csv};
use chartlab_core::indicators::{compute_ema, compute_macd, MacdParams};
use chartlab_core::{render_files, ChartConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "chartlab",
    about = "ChartLab CLI: price charts with EMA, MACD and trade markers"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins if set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a chart and write the figure as JSON.
    Render {
        /// Price CSV (timestamp,open,high,low,close,volume).
        #[arg(long)]
        prices: PathBuf,

        /// Broker trade-log CSV (Time,Action,Price / share,Total,Result).
        #[arg(long)]
        trades: Option<PathBuf>,

        /// TOML chart config. Flags below override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Ticker shown in titles.
        #[arg(long)]
        ticker: Option<String>,

        /// Draw a close-price line instead of candlesticks.
        #[arg(long, default_value_t = false)]
        line: bool,

        /// EMA overlay span; repeat for several. Replaces the configured list.
        #[arg(long = "ema")]
        ema: Vec<usize>,

        /// Add MACD panels (configured spans, or 12/26/9).
        #[arg(long, default_value_t = false)]
        macd: bool,

        /// Add a volume panel.
        #[arg(long, default_value_t = false)]
        volume: bool,

        /// Trade action label to drop; repeat for several.
        #[arg(long = "exclude")]
        exclude: Vec<String>,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compute indicators and write them as CSV.
    Indicators {
        /// Price CSV (timestamp,open,high,low,close,volume).
        #[arg(long)]
        prices: PathBuf,

        /// EMA span; repeat for several. Defaults to 13 and 26.
        #[arg(long = "ema")]
        ema: Vec<usize>,

        /// MACD fast span.
        #[arg(long, default_value_t = 12)]
        fast: usize,

        /// MACD slow span.
        #[arg(long, default_value_t = 26)]
        slow: usize,

        /// MACD signal span.
        #[arg(long, default_value_t = 9)]
        signal: usize,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            prices,
            trades,
            config,
            ticker,
            line,
            ema,
            macd,
            volume,
            exclude,
            output,
        } => {
            let mut chart_config = match &config {
                Some(path) => ChartConfig::load(path)
                    .with_context(|| format!("load config {}", path.display()))?,
                None => ChartConfig::default(),
            };
            apply_overrides(&mut chart_config, ticker, line, ema, macd, volume, exclude);
            run_render(&chart_config, &prices, trades.as_deref(), output.as_deref())
        }
        Commands::Indicators {
            prices,
            ema,
            fast,
            slow,
            signal,
            output,
        } => run_indicators(
            &prices,
            &ema,
            MacdParams::new(fast, slow, signal),
            output.as_deref(),
        ),
    }
}

/// Install the global subscriber once. Logs go to stderr so stdout stays clean.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn apply_overrides(
    config: &mut ChartConfig,
    ticker: Option<String>,
    line: bool,
    ema: Vec<usize>,
    macd: bool,
    volume: bool,
    exclude: Vec<String>,
) {
    if let Some(ticker) = ticker {
        config.ticker = ticker;
    }
    if line {
        config.candlestick = false;
    }
    if !ema.is_empty() {
        config.ema_periods = ema;
    }
    if macd && config.macd.is_none() {
        config.macd = Some(MacdParams::default());
    }
    if volume {
        config.show_volume = true;
    }
    config.excluded_actions.extend(exclude);
}

fn run_render(
    config: &ChartConfig,
    prices: &Path,
    trades: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let figure = render_files(config, prices, trades)
        .with_context(|| format!("render chart from {}", prices.display()))?;
    let json = figure.to_json().context("serialize figure")?;
    info!(layers = figure.layers.len(), title = %figure.title, "rendered figure");
    write_output(output, &json)
}

fn run_indicators(
    prices: &Path,
    ema: &[usize],
    macd: MacdParams,
    output: Option<&Path>,
) -> Result<()> {
    let series =
        load_price_csv(prices).with_context(|| format!("load prices {}", prices.display()))?;

    let spans: &[usize] = if ema.is_empty() { &[13, 26] } else { ema };
    let emas = spans
        .iter()
        .map(|&span| compute_ema(&series, span))
        .collect::<chartlab_core::Result<Vec<_>>>()
        .context("compute EMA")?;
    let macd = compute_macd(&series, macd.fast, macd.slow, macd.signal).context("compute MACD")?;

    let csv = export_indicators_csv(&series, &emas, Some(&macd)).context("export indicators")?;
    info!(bars = series.len(), columns = emas.len() + 5, "exported indicators");
    write_output(output, &csv)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("write {}", path.display()))?;
            println!("Written to: {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

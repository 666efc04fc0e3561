//! # oilfield-charts
//!
//! Command-line front end: load forecast tables, build one chart, write it
//! as JSON.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use oilfield_charts::data::columns::wells;
use oilfield_charts::data::loader::load_table;
use oilfield_charts::{
    error_histogram, performance_plot, statistics_plot, well_plot, wells_bar_chart,
    AggregatePerformance, ErrorStatistics, Figure, Labels, Models, Palette, PlotContext,
    ProductionMode, Table,
};

#[derive(Parser)]
#[command(name = "oilfield-charts")]
#[command(about = "Forecast-vs-actual charts for oilfield production", long_about = None)]
struct Cli {
    /// Oilfield name shown in titles
    #[arg(long, default_value = "")]
    oilfield: String,

    /// JSON file overriding display strings
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Start from the Russian display strings
    #[arg(long)]
    russian: bool,

    /// Human-readable model name, as MODEL=NAME (repeatable)
    #[arg(long = "display-name", value_parser = parse_key_val)]
    display_names: Vec<(String, String)>,

    /// Number of evenly spaced hues instead of the qualitative palette
    #[arg(long)]
    hues: Option<usize>,

    /// Output file (stdout when omitted)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Actual vs. forecast for one well across models
    Well {
        /// Model dataset, as MODEL=PATH (repeatable, order sets colours)
        #[arg(short, long = "model", value_parser = parse_key_path, required = true)]
        models: Vec<(String, PathBuf)>,

        /// Well identifier
        #[arg(short, long)]
        well: String,

        /// Production mode (oil, liq)
        #[arg(long, default_value = "oil")]
        mode: ProductionMode,
    },

    /// Histogram of per-well mean error
    Histogram {
        /// Error table: one column per well
        #[arg(short, long)]
        errors: PathBuf,

        /// Bin width in percent
        #[arg(short, long, default_value = "5")]
        bin_size: f64,
    },

    /// Per-well mean error, sorted
    Wells {
        /// Error table: one column per well
        #[arg(short, long)]
        errors: PathBuf,
    },

    /// Field totals per model with relative error
    Performance {
        /// Table with `actual`, `predicted` and optional `error` columns, as MODEL=PATH
        #[arg(short, long = "model", value_parser = parse_key_path, required = true)]
        models: Vec<(String, PathBuf)>,

        /// Production mode (oil, liq)
        #[arg(long, default_value = "oil")]
        mode: ProductionMode,
    },

    /// Mean / std of cumulative and daily error per model
    Statistics {
        /// Table with mean_cumulative, std_cumulative, mean_daily, std_daily columns, as MODEL=PATH
        #[arg(short, long = "model", value_parser = parse_key_path, required = true)]
        models: Vec<(String, PathBuf)>,
    },

    /// List wells that have both actual and forecast columns
    ListWells {
        /// Model dataset
        #[arg(short, long)]
        input: PathBuf,

        /// Production mode (oil, liq)
        #[arg(long, default_value = "oil")]
        mode: ProductionMode,
    },
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_key_path(s: &str) -> std::result::Result<(String, PathBuf), String> {
    parse_key_val(s).map(|(k, v)| (k, PathBuf::from(v)))
}

fn build_context(cli: &Cli) -> Result<PlotContext> {
    let mut labels = if cli.russian {
        Labels::russian()
    } else {
        Labels::default()
    };
    if let Some(path) = &cli.labels {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        labels = labels
            .with_overrides(&text)
            .with_context(|| format!("applying labels from {}", path.display()))?;
    }

    let palette = match cli.hues {
        Some(n) => Palette::evenly_spaced(n),
        None => Palette::qualitative(),
    };

    let mut ctx = PlotContext::new(&cli.oilfield)
        .with_labels(labels)
        .with_palette(palette);
    for (model, name) in &cli.display_names {
        ctx = ctx.with_display_name(model, name);
    }
    Ok(ctx)
}

fn load_models(inputs: &[(String, PathBuf)]) -> Result<Models<Table>> {
    let mut models = Models::new();
    for (name, path) in inputs {
        models.insert(name.clone(), load_table(path)?);
    }
    Ok(models)
}

/// Statistics per model; dates come from the first table that has them.
fn collect_statistics(tables: &Models<Table>) -> (Models<ErrorStatistics>, Vec<String>) {
    let mut stats = Models::new();
    let mut dates = None;
    for (name, table) in tables.iter() {
        match ErrorStatistics::from_table(table) {
            Some(s) => {
                dates.get_or_insert_with(|| table.index.clone());
                stats.insert(name, s);
            }
            None => log::warn!("model '{name}': missing statistic columns, skipping"),
        }
    }
    (stats, dates.unwrap_or_default())
}

fn emit(fig: &Figure, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fig.write_json(path),
        None => {
            println!("{}", fig.to_json_pretty()?);
            Ok(())
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let ctx = build_context(&cli)?;

    let fig = match &cli.command {
        Commands::Well {
            models,
            well,
            mode,
        } => {
            let datasets = load_models(models)?;
            well_plot(&ctx, &datasets, well, *mode)
        }
        Commands::Histogram { errors, bin_size } => {
            if *bin_size <= 0.0 {
                bail!("--bin-size must be positive, got {bin_size}");
            }
            error_histogram(&ctx, &load_table(errors)?, *bin_size)
        }
        Commands::Wells { errors } => wells_bar_chart(&ctx, &load_table(errors)?),
        Commands::Performance { models, mode } => {
            let mut perf = Models::new();
            for (name, table) in load_models(models)?.iter() {
                match AggregatePerformance::from_table(table) {
                    Some(p) => {
                        perf.insert(name, p);
                    }
                    None => log::warn!("model '{name}': no actual/predicted columns, skipping"),
                }
            }
            performance_plot(&ctx, &perf, *mode)
        }
        Commands::Statistics { models } => {
            let (stats, dates) = collect_statistics(&load_models(models)?);
            statistics_plot(&ctx, &stats, &dates)
        }
        Commands::ListWells { input, mode } => {
            for well in wells(&load_table(input)?, *mode) {
                println!("{well}");
            }
            return Ok(());
        }
    };

    emit(&fig, cli.output.as_deref())
}

fn main() -> Result<()> {
    env_logger::init();
    run(Cli::parse())
}

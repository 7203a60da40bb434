//! Command line arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gridflow", version, about = "Next-day electricity demand forecasting")]
#[command(
    long_about = "Train the demand model offline, then serve forecasts and derived grid metrics.\n\
    \nExamples:\n  \
    gridflow train --data data/cleaned_demand.csv --model models/gridflow_model.json\n  \
    gridflow serve --config gridflow.toml\n  \
    gridflow serve --bind 0.0.0.0:8000"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Train a model from a demand CSV and save the artifact
    Train(TrainArgs),

    /// Load the series and model once, then serve the HTTP API
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct TrainArgs {
    /// Cleaned demand CSV with `date,demand_mw` columns
    #[arg(long, default_value = "data/cleaned_demand.csv")]
    pub data: PathBuf,

    /// Where to write the model artifact
    #[arg(long, default_value = "models/gridflow_model.json")]
    pub model: PathBuf,

    /// Region label recorded with the series
    #[arg(long, default_value = "Maharashtra")]
    pub region: String,

    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    pub trees: usize,

    /// Seed for bootstrap sampling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Trailing share of lag rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub holdout: f64,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// TOML configuration; defaults apply when the file is absent
    #[arg(long, default_value = "gridflow.toml")]
    pub config: PathBuf,

    /// Listen address (`host:port`), overrides the configuration
    #[arg(long)]
    pub bind: Option<String>,
}

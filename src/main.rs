use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use imoviedash::{config::DashboardConfig, dashboard::Dashboard, derive::InvalidDatePolicy, render};
use std::{
    io::{self, Write},
    path::PathBuf,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "IMovie viewing analytics dashboard")]
struct Args {
    /// Dataset path, http(s) URL, or `-` for stdin
    #[arg(short, long)]
    data: Option<String>,
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Year to show (default: earliest year in the data)
    #[arg(short, long)]
    year: Option<i32>,
    /// Category to include; repeat for several (default: all)
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Language to include; repeat for several (default: all)
    #[arg(long = "language")]
    languages: Vec<String>,
    /// Number of films in the top films chart
    #[arg(long)]
    top_n: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Drop rows whose Viewing_Month does not parse instead of failing
    #[arg(long)]
    skip_invalid_dates: bool,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // ─── 2) resolve config ───────────────────────────────────────────
    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = args.data {
        config.data = data;
    }
    if let Some(n) = args.top_n {
        config.top_n = n;
    }
    if args.skip_invalid_dates {
        config.invalid_dates = InvalidDatePolicy::Skip;
    }
    config.validate()?;

    // ─── 3) load + derive once ───────────────────────────────────────
    let dash = Dashboard::open(&config).with_context(|| format!("opening {}", config.data))?;
    let controls = dash.controls();

    // ─── 4) selection ────────────────────────────────────────────────
    let Some(filter) = controls.selection(args.year, &args.categories, &args.languages) else {
        bail!("dataset {} has no records", config.data);
    };
    if !controls.years.contains(&filter.year) {
        warn!(year = filter.year, available = ?controls.years, "selected year not in dataset");
    }
    info!(year = filter.year, "rendering dashboard");

    // ─── 5) render ───────────────────────────────────────────────────
    let view = dash.view(&filter);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => render::text(&view, &mut out)?,
        OutputFormat::Json => render::json(&view, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

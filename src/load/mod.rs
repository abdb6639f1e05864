// src/load/mod.rs

//! Dataset loader: reads the viewing table from a file, URL, stdin or memory
//! and validates the fixed schema before anything downstream sees it.

use std::{
    fmt,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use thiserror::Error;
use tracing::info;
use url::Url;

pub mod csv_reader;
pub mod fetch;
pub mod parquet_reader;
pub mod types;
pub mod zip_reader;

pub use types::{check_required_columns, RawRecord, REQUIRED_COLUMNS};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: invalid {column} value {value:?} ({reason})")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive contains no .csv entry")]
    NoCsvInArchive,
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(Url),
    Stdin,
    /// In-memory CSV text.
    Memory(Vec<u8>),
}

impl Source {
    /// `http(s)://…` is a URL, `-` is stdin, anything else is a local path.
    pub fn parse(raw: &str) -> Result<Self, LoadError> {
        let trimmed = raw.trim();
        if trimmed == "-" {
            Ok(Source::Stdin)
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Ok(Source::Url(Url::parse(trimmed)?))
        } else {
            Ok(Source::Path(PathBuf::from(trimmed)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Url(u) => write!(f, "{u}"),
            Source::Stdin => f.write_str("<stdin>"),
            Source::Memory(bytes) => write!(f, "<memory: {} bytes>", bytes.len()),
        }
    }
}

/// On-disk encoding, picked from the file extension. Unknown extensions are
/// read as CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Parquet,
    Zip,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|os_str| os_str.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "parquet" | "pq" => Format::Parquet,
            "zip" => Format::Zip,
            _ => Format::Csv,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub http_timeout: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(30),
        }
    }
}

/// Read every record from `source`. Fails on unreadable sources, missing
/// required columns and cells that do not fit the schema.
#[tracing::instrument(level = "info", skip_all, fields(source = %source))]
pub fn load(source: &Source, options: &LoadOptions) -> Result<Vec<RawRecord>, LoadError> {
    let start = Instant::now();
    let records = match source {
        Source::Path(path) => load_path(path)?,
        Source::Url(url) => fetch::load_url(url, options)?,
        Source::Stdin => csv_reader::read_csv(io::stdin().lock())?,
        Source::Memory(bytes) => csv_reader::read_csv(bytes.as_slice())?,
    };
    info!(rows = records.len(), elapsed = ?start.elapsed(), "dataset loaded");
    Ok(records)
}

fn load_path(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match Format::from_path(path) {
        Format::Csv => csv_reader::read_csv(BufReader::new(file)),
        Format::Parquet => parquet_reader::read_parquet(file),
        Format::Zip => zip_reader::read_zipped_csv(file),
    }
}

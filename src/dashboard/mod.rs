// src/dashboard/mod.rs

//! Everything the presentation layer needs for one filter state.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    aggregate::{
        category_avg_rating, category_views, language_views, top_films, Bar, Dimension, Kpis,
        LanguageViews,
    },
    config::{ConfigError, DashboardConfig},
    derive::{derive_records, DerivationError},
    filter::FilterSpec,
    load::{self, LoadError, Source},
    predict::{predict, PredictionRanking},
    table::ViewingTable,
};

pub mod controls;

pub use controls::Controls;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load dataset: {0}")]
    Load(#[from] LoadError),

    #[error("failed to derive columns: {0}")]
    Derive(#[from] DerivationError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Predictions {
    pub category: PredictionRanking,
    pub language: PredictionRanking,
}

/// Computed tables for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub filter: FilterSpec,
    pub matched_rows: usize,
    /// Whole-dataset numbers; unaffected by `filter`.
    pub kpis: Kpis,
    pub category_views: Vec<Bar>,
    pub category_ratings: Vec<Bar>,
    pub language_views: LanguageViews,
    pub top_films: Vec<Bar>,
    /// Whole-dataset ranking; unaffected by `filter`.
    pub predictions: Predictions,
}

/// The loaded table plus the outputs that do not depend on the selection,
/// computed once.
#[derive(Debug, Clone)]
pub struct Dashboard {
    table: ViewingTable,
    top_n: usize,
    kpis: Kpis,
    predictions: Predictions,
}

impl Dashboard {
    pub fn new(table: ViewingTable, top_n: usize) -> Self {
        let kpis = Kpis::compute(&table);
        let predictions = Predictions {
            category: predict(&table, Dimension::Category),
            language: predict(&table, Dimension::Language),
        };
        Self {
            table,
            top_n,
            kpis,
            predictions,
        }
    }

    /// Load and derive the configured source.
    pub fn open(config: &DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;
        Self::from_source(&config.source()?, config)
    }

    /// Like `open`, but reads `source` instead of `config.data`.
    pub fn from_source(source: &Source, config: &DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;
        let raw = load::load(source, &config.load_options())?;
        let derived = derive_records(raw, config.invalid_dates)?;
        let table = ViewingTable::new(derived.records);
        info!(rows = table.len(), skipped = derived.skipped, "dashboard ready");
        Ok(Self::new(table, config.top_n))
    }

    pub fn table(&self) -> &ViewingTable {
        &self.table
    }

    pub fn kpis(&self) -> &Kpis {
        &self.kpis
    }

    pub fn predictions(&self) -> &Predictions {
        &self.predictions
    }

    pub fn controls(&self) -> Controls {
        Controls::from_table(&self.table)
    }

    /// Recompute the filter-dependent tables for `filter`.
    pub fn view(&self, filter: &FilterSpec) -> DashboardView {
        let rows = filter.apply(&self.table);
        debug!(matched = rows.len(), "recomputing view");

        DashboardView {
            filter: filter.clone(),
            matched_rows: rows.len(),
            kpis: self.kpis.clone(),
            category_views: category_views(&rows),
            category_ratings: category_avg_rating(&rows),
            language_views: language_views(&rows),
            top_films: top_films(&rows, self.top_n),
            predictions: self.predictions.clone(),
        }
    }
}

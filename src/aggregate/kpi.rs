use serde::Serialize;

use super::{group_and_reduce, Dimension, Measure, Reducer};
use crate::table::ViewingTable;

/// Headline numbers for the whole dataset. These ignore the active filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_views: u64,
    /// Mean viewer rating rounded to two decimals; `None` for an empty table.
    pub avg_rating: Option<f64>,
    /// Category with the most summed views.
    pub top_category: Option<String>,
    /// Language with the most summed views.
    pub top_language: Option<String>,
}

impl Kpis {
    pub fn compute(table: &ViewingTable) -> Self {
        let total_views = table.iter().map(|r| r.number_of_views).sum();

        let avg_rating = if table.is_empty() {
            None
        } else {
            let sum: f64 = table.iter().map(|r| r.viewer_rate).sum();
            Some(round2(sum / table.len() as f64))
        };

        Self {
            total_views,
            avg_rating,
            top_category: top_by_views(table, Dimension::Category),
            top_language: top_by_views(table, Dimension::Language),
        }
    }
}

fn top_by_views(table: &ViewingTable, dimension: Dimension) -> Option<String> {
    group_and_reduce(table, &[dimension], Measure::NumberOfViews, Reducer::Sum)
        .argmax()
        .map(|k| k.label())
}

/// Two decimals, ties to even.
fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

// src/predict.rs

//! Next-year popularity ranking.
//!
//! This is a descriptive heuristic, not a forecast: each category or language
//! is scored by its mean `Popularity_Score` over the whole dataset and the
//! ranking is read as "what should do well next year". There is no model
//! fitting, hold-out or uncertainty estimate.

use serde::Serialize;

use crate::{
    aggregate::{group_and_reduce, to_bars, Bar, Dimension, Measure, Reducer},
    table::ViewingTable,
};

pub const METHOD_DESCRIPTION: &str = "Heuristic ranking, not a statistical forecast. \
Popularity Score = Viewer_Rate × Number_of_Views; \
a higher average popularity indicates higher demand next year.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRanking {
    pub dimension: Dimension,
    /// Year after the latest year in the data; `None` for an empty table.
    pub target_year: Option<i32>,
    /// Mean popularity score per value, highest first.
    pub entries: Vec<Bar>,
    pub method: &'static str,
}

/// Rank every value of `dimension` by mean popularity score over the full
/// table. The active filter never applies here.
pub fn predict(table: &ViewingTable, dimension: Dimension) -> PredictionRanking {
    let g = group_and_reduce(table, &[dimension], Measure::PopularityScore, Reducer::Mean);
    PredictionRanking {
        dimension,
        target_year: table.latest_year().map(|y| y + 1),
        entries: to_bars(g.ranked_desc()),
        method: METHOD_DESCRIPTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::table_from_rows;

    #[test]
    fn test_mean_popularity_ranking() {
        let table = table_from_rows(&[
            ("FilmA", "Action", "English", "2025-06", 8.0, 100),
            ("FilmB", "Action", "English", "2025-06", 5.0, 50),
            ("FilmC", "Comedy", "French", "2024-07", 9.0, 200),
        ]);

        let by_category = predict(&table, Dimension::Category);
        assert_eq!(by_category.target_year, Some(2026));
        let entries: Vec<(&str, f64)> = by_category
            .entries
            .iter()
            .map(|b| (b.label.as_str(), b.value))
            .collect();
        assert_eq!(entries, vec![("Comedy", 1800.0), ("Action", 525.0)]);

        let by_language = predict(&table, Dimension::Language);
        assert_eq!(by_language.entries[0].label, "French");
        assert_eq!(by_language.dimension, Dimension::Language);
    }

    #[test]
    fn test_method_is_flagged_as_heuristic() {
        let ranking = predict(&ViewingTable::default(), Dimension::Category);
        assert!(ranking.entries.is_empty());
        assert_eq!(ranking.target_year, None);
        assert!(ranking.method.contains("not a statistical forecast"));
    }
}

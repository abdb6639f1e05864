use serde::Serialize;

use super::{group_and_reduce, to_bars, Bar, Dimension, Measure, Reducer};
use crate::table::Record;

/// Default length of the top films chart.
pub const TOP_FILMS: usize = 10;

/// Summed views per category, ordered by category.
pub fn category_views<'a, I>(rows: I) -> Vec<Bar>
where
    I: IntoIterator<Item = &'a Record>,
{
    let g = group_and_reduce(rows, &[Dimension::Category], Measure::NumberOfViews, Reducer::Sum);
    to_bars(g.sorted_by_key())
}

/// Mean viewer rating per category, ordered by category.
pub fn category_avg_rating<'a, I>(rows: I) -> Vec<Bar>
where
    I: IntoIterator<Item = &'a Record>,
{
    let g = group_and_reduce(rows, &[Dimension::Category], Measure::ViewerRate, Reducer::Mean);
    to_bars(g.sorted_by_key())
}

/// Views per language, or an explicit no-data marker when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "bars", rename_all = "snake_case")]
pub enum LanguageViews {
    Data(Vec<Bar>),
    NoData,
}

impl LanguageViews {
    pub fn is_no_data(&self) -> bool {
        matches!(self, LanguageViews::NoData)
    }
}

pub fn language_views<'a, I>(rows: I) -> LanguageViews
where
    I: IntoIterator<Item = &'a Record>,
{
    let g = group_and_reduce(rows, &[Dimension::Language], Measure::NumberOfViews, Reducer::Sum);
    if g.is_empty() {
        LanguageViews::NoData
    } else {
        LanguageViews::Data(to_bars(g.sorted_by_key()))
    }
}

/// The `n` films with the highest summed popularity score, highest first.
/// Films with equal scores keep the order in which they first appear in `rows`.
pub fn top_films<'a, I>(rows: I, n: usize) -> Vec<Bar>
where
    I: IntoIterator<Item = &'a Record>,
{
    let g = group_and_reduce(
        rows,
        &[Dimension::FilmName],
        Measure::PopularityScore,
        Reducer::Sum,
    );
    let mut ranked = g.ranked_desc();
    ranked.truncate(n);
    to_bars(ranked)
}

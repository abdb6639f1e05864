// src/aggregate/mod.rs

//! Group-by-and-reduce over records.
//!
//! `group_and_reduce` is the only primitive; the dashboard views in `views`
//! and the KPI cards in `kpi` are fixed combinations of it.

use serde::Serialize;
use std::{borrow::Cow, collections::HashMap, fmt};

use crate::table::Record;

pub mod kpi;
pub mod views;

pub use kpi::Kpis;
pub use views::{category_avg_rating, category_views, language_views, top_films, LanguageViews};

/// Categorical field used as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    #[serde(rename = "Film_Name")]
    FilmName,
    Category,
    Language,
    Year,
}

impl Dimension {
    pub fn column(&self) -> &'static str {
        match self {
            Dimension::FilmName => "Film_Name",
            Dimension::Category => "Category",
            Dimension::Language => "Language",
            Dimension::Year => "Year",
        }
    }

    pub fn value<'r>(&self, record: &'r Record) -> Cow<'r, str> {
        match self {
            Dimension::FilmName => Cow::Borrowed(&record.film_name),
            Dimension::Category => Cow::Borrowed(&record.category),
            Dimension::Language => Cow::Borrowed(&record.language),
            Dimension::Year => Cow::Owned(record.year.to_string()),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Numeric field being aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Measure {
    #[serde(rename = "Number_of_Views")]
    NumberOfViews,
    #[serde(rename = "Viewer_Rate")]
    ViewerRate,
    #[serde(rename = "Popularity_Score")]
    PopularityScore,
}

impl Measure {
    pub fn value(&self, record: &Record) -> f64 {
        match self {
            Measure::NumberOfViews => record.number_of_views as f64,
            Measure::ViewerRate => record.viewer_rate,
            Measure::PopularityScore => record.popularity_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reducer {
    Sum,
    Mean,
    /// Number of rows in the group; the measure is ignored.
    Count,
}

/// Tuple of dimension values identifying a group. Ordered lexicographically,
/// component by component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupKey(pub Vec<String>);

impl GroupKey {
    /// Components joined with `" / "`; a single-dimension key is just its value.
    pub fn label(&self) -> String {
        self.0.join(" / ")
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One labelled value, the unit every chart is made of.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Default)]
struct Accumulator {
    sum: f64,
    count: u64,
}

impl Accumulator {
    fn push(&mut self, v: f64) {
        self.sum += v;
        self.count += 1;
    }

    fn finish(&self, reducer: Reducer) -> f64 {
        match reducer {
            Reducer::Sum => self.sum,
            Reducer::Mean => self.sum / self.count as f64,
            Reducer::Count => self.count as f64,
        }
    }
}

/// Result of `group_and_reduce`, kept in order of each group's first
/// appearance in the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouped {
    entries: Vec<(GroupKey, f64)>,
}

impl Grouped {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    pub fn get(&self, key: &[&str]) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k.0.iter().map(String::as_str).eq(key.iter().copied()))
            .map(|(_, v)| *v)
    }

    /// Sum of all group values.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    /// Groups ordered by key, the order charts use.
    pub fn sorted_by_key(&self) -> Vec<(GroupKey, f64)> {
        let mut out = self.entries.clone();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Groups ordered by value, highest first. Equal values keep
    /// first-appearance order.
    pub fn ranked_desc(&self) -> Vec<(GroupKey, f64)> {
        let mut out = self.entries.clone();
        out.sort_by(|a, b| b.1.total_cmp(&a.1));
        out
    }

    /// Key with the highest value; ties go to the lexicographically smallest key.
    pub fn argmax(&self) -> Option<&GroupKey> {
        self.entries
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
            .map(|(k, _)| k)
    }
}

pub fn to_bars(entries: Vec<(GroupKey, f64)>) -> Vec<Bar> {
    entries
        .into_iter()
        .map(|(key, value)| Bar {
            label: key.label(),
            value,
        })
        .collect()
}

/// Group `rows` by the values of `group_by` and reduce `measure` in each group.
///
/// Keys compare by exact string value. An empty `group_by` puts every row in a
/// single group with an empty key.
pub fn group_and_reduce<'a, I>(
    rows: I,
    group_by: &[Dimension],
    measure: Measure,
    reducer: Reducer,
) -> Grouped
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Accumulator)> = Vec::new();

    for record in rows {
        let key = GroupKey(
            group_by
                .iter()
                .map(|d| d.value(record).into_owned())
                .collect(),
        );
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = groups.len();
                index.insert(key.clone(), slot);
                groups.push((key, Accumulator::default()));
                slot
            }
        };
        groups[slot].1.push(measure.value(record));
    }

    Grouped {
        entries: groups
            .into_iter()
            .map(|(key, acc)| {
                let value = acc.finish(reducer);
                (key, value)
            })
            .collect(),
    }
}

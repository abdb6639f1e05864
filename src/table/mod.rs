// src/table/mod.rs

use std::{
    collections::{BTreeMap, HashSet},
    slice,
    sync::Arc,
};

pub mod record;

pub use record::Record;

/// The loaded, derived dataset. Built once at startup and never mutated;
/// clones share the same records.
#[derive(Debug, Clone)]
pub struct ViewingTable {
    records: Arc<[Record]>,
}

impl ViewingTable {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Row count per year, in ascending numeric year order.
    pub fn rows_per_year(&self) -> Vec<(i32, usize)> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for r in self.iter() {
            *counts.entry(r.year).or_default() += 1;
        }
        counts.into_iter().collect()
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.iter().map(|r| r.year).max()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.iter().map(|r| r.category.as_str()))
    }

    /// Distinct languages in order of first appearance.
    pub fn languages(&self) -> Vec<String> {
        distinct(self.iter().map(|r| r.language.as_str()))
    }
}

impl Default for ViewingTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Record>> for ViewingTable {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a ViewingTable {
    type Item = &'a Record;
    type IntoIter = slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Build a table from `(film, category, language, month, rate, views)` tuples.
#[cfg(test)]
pub(crate) fn table_from_rows(rows: &[(&str, &str, &str, &str, f64, u64)]) -> ViewingTable {
    use crate::{derive::parse_viewing_month, load::RawRecord};

    rows.iter()
        .map(|&(film, category, language, month, rate, views)| {
            let raw = RawRecord {
                film_name: film.into(),
                category: category.into(),
                language: language.into(),
                viewing_month: month.into(),
                viewer_rate: rate,
                number_of_views: views,
            };
            let date = parse_viewing_month(month).expect("fixture month must parse");
            Record::derive(raw, date)
        })
        .collect::<Vec<_>>()
        .into()
}

// src/filter.rs

use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, iter::Copied, slice};
use tracing::debug;

use crate::table::{Record, ViewingTable};

/// The user's current selection: one year plus the allowed categories and
/// languages. Empty sets match nothing; widening to "all values" is up to the
/// caller (see `Controls::default_filter`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub year: i32,
    pub categories: BTreeSet<String>,
    pub languages: BTreeSet<String>,
}

impl FilterSpec {
    pub fn new<C, L>(year: i32, categories: C, languages: L) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            year,
            categories: categories.into_iter().map(Into::into).collect(),
            languages: languages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.year == self.year
            && self.categories.contains(&record.category)
            && self.languages.contains(&record.language)
    }

    /// Records matching the selection, in table order.
    pub fn apply<'t>(&self, table: &'t ViewingTable) -> FilteredView<'t> {
        let rows: Vec<&Record> = table.iter().filter(|r| self.matches(r)).collect();
        debug!(year = self.year, matched = rows.len(), total = table.len(), "filter applied");
        FilteredView { rows }
    }
}

/// A borrowed subset of a `ViewingTable`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'t> {
    rows: Vec<&'t Record>,
}

impl<'t> FilteredView<'t> {
    pub fn iter(&self) -> Copied<slice::Iter<'_, &'t Record>> {
        self.rows.iter().copied()
    }

    pub fn records(&self) -> &[&'t Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a, 't> IntoIterator for &'a FilteredView<'t> {
    type Item = &'t Record;
    type IntoIter = Copied<slice::Iter<'a, &'t Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

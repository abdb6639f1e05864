use serde::Serialize;

use crate::{filter::FilterSpec, table::ViewingTable};

/// Option lists for the year selector and the two multi-selects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    /// Ascending.
    pub years: Vec<i32>,
    /// First-appearance order.
    pub categories: Vec<String>,
    /// First-appearance order.
    pub languages: Vec<String>,
}

impl Controls {
    pub fn from_table(table: &ViewingTable) -> Self {
        Self {
            years: table.years(),
            categories: table.categories(),
            languages: table.languages(),
        }
    }

    /// Initial selection: the earliest year with every category and language
    /// ticked. `None` when the table has no rows.
    pub fn default_filter(&self) -> Option<FilterSpec> {
        let year = *self.years.first()?;
        Some(FilterSpec::new(
            year,
            self.categories.iter().cloned(),
            self.languages.iter().cloned(),
        ))
    }

    /// Build a selection from user input, where an empty list means "all".
    pub fn selection(
        &self,
        year: Option<i32>,
        categories: &[String],
        languages: &[String],
    ) -> Option<FilterSpec> {
        let mut filter = self.default_filter()?;
        if let Some(year) = year {
            filter.year = year;
        }
        if !categories.is_empty() {
            filter.categories = categories.iter().cloned().collect();
        }
        if !languages.is_empty() {
            filter.languages = languages.iter().cloned().collect();
        }
        Some(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::table_from_rows;

    fn table() -> ViewingTable {
        table_from_rows(&[
            ("FilmA", "Drama", "English", "2025-06", 8.0, 100),
            ("FilmB", "Action", "Hindi", "2024-06", 5.0, 50),
        ])
    }

    #[test]
    fn test_default_filter_selects_everything_for_first_year() {
        let controls = Controls::from_table(&table());
        let filter = controls.default_filter().unwrap();
        assert_eq!(filter, FilterSpec::new(2024, ["Drama", "Action"], ["English", "Hindi"]));
    }

    #[test]
    fn test_selection_overrides() {
        let controls = Controls::from_table(&table());
        let filter = controls
            .selection(Some(2025), &["Drama".to_string()], &[])
            .unwrap();
        assert_eq!(filter, FilterSpec::new(2025, ["Drama"], ["English", "Hindi"]));
    }

    #[test]
    fn test_empty_table_has_no_default() {
        let controls = Controls::from_table(&ViewingTable::default());
        assert_eq!(controls.default_filter(), None);
    }
}

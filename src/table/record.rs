use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::load::RawRecord;

/// A validated viewing observation with its derived columns attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub film_name: String,
    pub category: String,
    pub language: String,
    pub viewing_month: NaiveDate,
    pub viewer_rate: f64,
    pub number_of_views: u64,
    /// Calendar year of `viewing_month`.
    pub year: i32,
    /// `viewer_rate * number_of_views`.
    pub popularity_score: f64,
}

impl Record {
    pub fn derive(raw: RawRecord, viewing_month: NaiveDate) -> Self {
        Self {
            year: viewing_month.year(),
            popularity_score: raw.viewer_rate * raw.number_of_views as f64,
            film_name: raw.film_name,
            category: raw.category,
            language: raw.language,
            viewing_month,
            viewer_rate: raw.viewer_rate,
            number_of_views: raw.number_of_views,
        }
    }
}

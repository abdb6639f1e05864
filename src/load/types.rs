// src/load/types.rs

use serde::{Deserialize, Serialize};

use super::LoadError;

pub const FILM_NAME: &str = "Film_Name";
pub const CATEGORY: &str = "Category";
pub const LANGUAGE: &str = "Language";
pub const VIEWING_MONTH: &str = "Viewing_Month";
pub const VIEWER_RATE: &str = "Viewer_Rate";
pub const NUMBER_OF_VIEWS: &str = "Number_of_Views";

/// Columns every source must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    FILM_NAME,
    CATEGORY,
    LANGUAGE,
    VIEWING_MONTH,
    VIEWER_RATE,
    NUMBER_OF_VIEWS,
];

/// One viewing observation exactly as read from the source, with numeric
/// columns already validated. `viewing_month` stays a string until derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub film_name: String,
    pub category: String,
    pub language: String,
    pub viewing_month: String,
    pub viewer_rate: f64,
    pub number_of_views: u64,
}

impl RawRecord {
    /// Build a record from trimmed text cells. `row` is the 1-based data row,
    /// used only for error reporting.
    pub fn from_cells(
        row: usize,
        film_name: String,
        category: String,
        language: String,
        viewing_month: String,
        viewer_rate: &str,
        number_of_views: &str,
    ) -> Result<Self, LoadError> {
        Ok(Self {
            film_name: require_text(row, FILM_NAME, film_name)?,
            category: require_text(row, CATEGORY, category)?,
            language: require_text(row, LANGUAGE, language)?,
            viewing_month: require_text(row, VIEWING_MONTH, viewing_month)?,
            viewer_rate: parse_rate(row, viewer_rate)?,
            number_of_views: parse_views(row, number_of_views)?,
        })
    }
}

/// Fail with `MissingColumns` naming every required column absent from `names`.
pub fn check_required_columns<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), LoadError> {
    let present: Vec<&str> = names.into_iter().map(str::trim).collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.contains(*col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}

fn require_text(row: usize, column: &'static str, value: String) -> Result<String, LoadError> {
    if value.trim().is_empty() {
        return Err(LoadError::InvalidValue {
            row,
            column,
            value,
            reason: "empty cell",
        });
    }
    Ok(value)
}

pub(crate) fn parse_rate(row: usize, raw: &str) -> Result<f64, LoadError> {
    let cleaned = raw.trim();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LoadError::InvalidValue {
            row,
            column: VIEWER_RATE,
            value: raw.to_string(),
            reason: "expected a finite number",
        }),
    }
}

/// Views are counts; an integral float such as `"120.0"` is accepted because
/// cleaned exports often widen integer columns.
pub(crate) fn parse_views(row: usize, raw: &str) -> Result<u64, LoadError> {
    let cleaned = raw.trim();
    if let Ok(v) = cleaned.parse::<u64>() {
        return Ok(v);
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(v as u64)
        }
        _ => Err(LoadError::InvalidValue {
            row,
            column: NUMBER_OF_VIEWS,
            value: raw.to_string(),
            reason: "expected a non-negative integer",
        }),
    }
}

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::io::Read;
use tracing::debug;

use super::{
    types::{check_required_columns, RawRecord},
    LoadError,
};

/// Row shape as it appears in the file. Columns are matched by header name,
/// so column order and extra columns do not matter. Numbers stay text here and
/// are validated by `RawRecord::from_cells` so errors can name the column.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Film_Name")]
    film_name: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Language")]
    language: String,
    #[serde(rename = "Viewing_Month")]
    viewing_month: String,
    #[serde(rename = "Viewer_Rate")]
    viewer_rate: String,
    #[serde(rename = "Number_of_Views")]
    number_of_views: String,
}

/// Parse a headed CSV stream into raw records.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawRecord>, LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    // 1) header check before touching any data row
    let headers = rdr.headers()?.clone();
    check_required_columns(headers.iter())?;
    debug!(columns = headers.len(), "csv header validated");

    // 2) typed rows
    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        records.push(RawRecord::from_cells(
            idx + 1,
            row.film_name,
            row.category,
            row.language,
            row.viewing_month,
            &row.viewer_rate,
            &row.number_of_views,
        )?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_columns_by_name() {
        let data = "Number_of_Views,Film_Name,Extra,Category,Language,Viewer_Rate,Viewing_Month\n\
                    100,FilmA,x,Action,English,8.0,2025-06\n";
        let records = read_csv(data.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![RawRecord {
                film_name: "FilmA".into(),
                category: "Action".into(),
                language: "English".into(),
                viewing_month: "2025-06".into(),
                viewer_rate: 8.0,
                number_of_views: 100,
            }]
        );
    }

    #[test]
    fn test_trims_cells_and_headers() {
        let data = " Film_Name , Category,Language,Viewing_Month,Viewer_Rate,Number_of_Views\n\
                    \" Film A \", Action , English ,2025-06-01, 7.5 , 40 \n";
        let records = read_csv(data.as_bytes()).unwrap();
        assert_eq!(records[0].film_name, "Film A");
        assert_eq!(records[0].category, "Action");
        assert_eq!(records[0].viewer_rate, 7.5);
        assert_eq!(records[0].number_of_views, 40);
    }

    #[test]
    fn test_missing_column_fails_before_rows() {
        let data = "Film_Name,Category,Viewing_Month,Viewer_Rate,Number_of_Views\n\
                    FilmA,Action,2025-06,8.0,100\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumns(cols) if cols == vec!["Language"]));
    }

    #[test]
    fn test_bad_number_reports_row_and_column() {
        let data = "Film_Name,Category,Language,Viewing_Month,Viewer_Rate,Number_of_Views\n\
                    FilmA,Action,English,2025-06,8.0,100\n\
                    FilmB,Action,English,2025-06,great,50\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidValue { row, column, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Viewer_Rate");
                assert_eq!(value, "great");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let data = "Film_Name,Category,Language,Viewing_Month,Viewer_Rate,Number_of_Views\n";
        assert!(read_csv(data.as_bytes()).unwrap().is_empty());
    }
}

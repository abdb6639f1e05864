use arrow::{
    array::{Array, ArrayRef, AsArray, StringArray},
    compute::cast,
    datatypes::{DataType, Float64Type, UInt64Type},
    record_batch::RecordBatch,
};
use parquet::{arrow::arrow_reader::ParquetRecordBatchReaderBuilder, file::reader::ChunkReader};
use tracing::debug;

use super::{
    types::{
        check_required_columns, RawRecord, CATEGORY, FILM_NAME, LANGUAGE, NUMBER_OF_VIEWS,
        VIEWER_RATE, VIEWING_MONTH,
    },
    LoadError,
};

const BATCH_SIZE: usize = 8_192;

/// Read a Parquet file carrying the viewing columns. Columns are cast to the
/// expected types, so integer ratings, `Int32` counts or `Date32` months are
/// all accepted; values that do not survive the cast are rejected.
pub fn read_parquet<R: ChunkReader + 'static>(reader: R) -> Result<Vec<RawRecord>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
    check_required_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;

    let batches = builder.with_batch_size(BATCH_SIZE).build()?;
    let mut records = Vec::new();
    for batch in batches {
        let batch = batch?;
        debug!(rows = batch.num_rows(), "parquet batch");
        append_batch(&batch, &mut records)?;
    }
    Ok(records)
}

fn column_as(batch: &RecordBatch, name: &str, ty: &DataType) -> Result<ArrayRef, LoadError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumns(vec![name.to_string()]))?;
    Ok(cast(col, ty)?)
}

/// Float view counts must hold whole numbers; the `UInt64` cast would
/// otherwise truncate them.
fn check_whole_views(batch: &RecordBatch, first_row: usize) -> Result<(), LoadError> {
    let Some(col) = batch.column_by_name(NUMBER_OF_VIEWS) else {
        return Ok(());
    };
    if !col.data_type().is_floating() {
        return Ok(());
    }
    let floats = cast(col, &DataType::Float64)?;
    let floats = floats.as_primitive::<Float64Type>();
    for i in 0..floats.len() {
        if floats.is_null(i) {
            continue;
        }
        let v = floats.value(i);
        if !v.is_finite() || v < 0.0 || v.fract() != 0.0 {
            return Err(LoadError::InvalidValue {
                row: first_row + i,
                column: NUMBER_OF_VIEWS,
                value: v.to_string(),
                reason: "expected a non-negative integer",
            });
        }
    }
    Ok(())
}

fn text_cell(
    arr: &StringArray,
    i: usize,
    row: usize,
    column: &'static str,
) -> Result<String, LoadError> {
    if arr.is_null(i) || arr.value(i).trim().is_empty() {
        return Err(LoadError::InvalidValue {
            row,
            column,
            value: String::new(),
            reason: "empty cell",
        });
    }
    Ok(arr.value(i).trim().to_string())
}

fn append_batch(batch: &RecordBatch, out: &mut Vec<RawRecord>) -> Result<(), LoadError> {
    check_whole_views(batch, out.len() + 1)?;

    let films = column_as(batch, FILM_NAME, &DataType::Utf8)?;
    let categories = column_as(batch, CATEGORY, &DataType::Utf8)?;
    let languages = column_as(batch, LANGUAGE, &DataType::Utf8)?;
    let months = column_as(batch, VIEWING_MONTH, &DataType::Utf8)?;
    let rates = column_as(batch, VIEWER_RATE, &DataType::Float64)?;
    let views = column_as(batch, NUMBER_OF_VIEWS, &DataType::UInt64)?;

    let (films, categories, languages, months) = (
        films.as_string::<i32>(),
        categories.as_string::<i32>(),
        languages.as_string::<i32>(),
        months.as_string::<i32>(),
    );
    let rates = rates.as_primitive::<Float64Type>();
    let views = views.as_primitive::<UInt64Type>();

    for i in 0..batch.num_rows() {
        let row = out.len() + 1;

        if rates.is_null(i) || !rates.value(i).is_finite() {
            return Err(LoadError::InvalidValue {
                row,
                column: VIEWER_RATE,
                value: String::new(),
                reason: "expected a finite number",
            });
        }
        if views.is_null(i) {
            return Err(LoadError::InvalidValue {
                row,
                column: NUMBER_OF_VIEWS,
                value: String::new(),
                reason: "expected a non-negative integer",
            });
        }

        out.push(RawRecord {
            film_name: text_cell(films, i, row, FILM_NAME)?,
            category: text_cell(categories, i, row, CATEGORY)?,
            language: text_cell(languages, i, row, LANGUAGE)?,
            viewing_month: text_cell(months, i, row, VIEWING_MONTH)?,
            viewer_rate: rates.value(i),
            number_of_views: views.value(i),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::{
        array::{Date32Array, Float64Array, Int64Array},
        datatypes::{Field, Schema},
    };
    use chrono::NaiveDate;
    use parquet::arrow::ArrowWriter;
    use std::{fs::File, sync::Arc};
    use tempfile::tempdir;

    fn write_fixture(path: &std::path::Path, views: Vec<i64>) -> anyhow::Result<()> {
        let n = views.len();
        write_fixture_with_views(path, n, DataType::Int64, Arc::new(Int64Array::from(views)))
    }

    fn write_fixture_with_views(
        path: &std::path::Path,
        n: usize,
        views_type: DataType,
        views: ArrayRef,
    ) -> anyhow::Result<()> {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let june = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let days = (june - epoch).num_days() as i32;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Film_Name", DataType::Utf8, false),
            Field::new("Category", DataType::Utf8, false),
            Field::new("Language", DataType::Utf8, false),
            Field::new("Viewing_Month", DataType::Date32, false),
            Field::new("Viewer_Rate", DataType::Float64, false),
            Field::new("Number_of_Views", views_type, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(
                    (0..n).map(|i| format!("Film{i}")).collect::<Vec<_>>(),
                )),
                Arc::new(StringArray::from(vec!["Drama"; n])),
                Arc::new(StringArray::from(vec!["Arabic"; n])),
                Arc::new(Date32Array::from(vec![days; n])),
                Arc::new(Float64Array::from(vec![7.0; n])),
                views,
            ],
        )?;

        let file = File::create(path)?;
        let mut writer = ArrowWriter::try_new(file, schema, None)?;
        writer.write(&batch)?;
        writer.close()?;
        Ok(())
    }

    #[test]
    fn test_read_parquet_casts_columns() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("films.parquet");
        write_fixture(&path, vec![10, 20])?;

        let records = read_parquet(File::open(&path)?)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].film_name, "Film0");
        assert_eq!(records[0].viewing_month, "2025-06-01");
        assert_eq!(records[1].number_of_views, 20);
        assert_eq!(records[1].viewer_rate, 7.0);
        Ok(())
    }

    #[test]
    fn test_negative_views_rejected() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("films.parquet");
        write_fixture(&path, vec![10, -5])?;

        let err = read_parquet(File::open(&path)?).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidValue { row: 2, column: NUMBER_OF_VIEWS, .. }
        ));
        Ok(())
    }

    #[test]
    fn test_fractional_float_views_rejected() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("films.parquet");
        let views: ArrayRef = Arc::new(Float64Array::from(vec![40.0, 12.7]));
        write_fixture_with_views(&path, 2, DataType::Float64, views)?;

        let err = read_parquet(File::open(&path)?).unwrap_err();
        match err {
            LoadError::InvalidValue { row, column, value, .. } => {
                assert_eq!((row, column, value.as_str()), (2, NUMBER_OF_VIEWS, "12.7"));
            }
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn test_whole_float_views_accepted() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("films.parquet");
        let views: ArrayRef = Arc::new(Float64Array::from(vec![40.0, 12.0]));
        write_fixture_with_views(&path, 2, DataType::Float64, views)?;

        let records = read_parquet(File::open(&path)?)?;
        let counts: Vec<u64> = records.iter().map(|r| r.number_of_views).collect();
        assert_eq!(counts, vec![40, 12]);
        Ok(())
    }

    #[test]
    fn test_missing_column() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("partial.parquet");
        let schema = Arc::new(Schema::new(vec![Field::new(
            "Film_Name",
            DataType::Utf8,
            false,
        )]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![Arc::new(StringArray::from(vec!["FilmA"]))],
        )?;
        let mut writer = ArrowWriter::try_new(File::create(&path)?, schema, None)?;
        writer.write(&batch)?;
        writer.close()?;

        let err = read_parquet(File::open(&path)?).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumns(cols) if cols.len() == 5));
        Ok(())
    }
}

use std::io::{Read, Seek};
use tracing::debug;
use zip::ZipArchive;

use super::{csv_reader::read_csv, types::RawRecord, LoadError};

/// Read the first `.csv` entry (archive order) of a ZIP archive.
pub fn read_zipped_csv<R: Read + Seek>(reader: R) -> Result<Vec<RawRecord>, LoadError> {
    let mut archive = ZipArchive::new(reader)?;

    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        let name = entry.name().to_string();
        if entry.is_file() && name.to_lowercase().ends_with(".csv") {
            debug!(entry = %name, size = entry.size(), "reading csv from archive");
            return read_csv(entry);
        }
    }

    Err(LoadError::NoCsvInArchive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::{write::FileOptions, CompressionMethod, ZipWriter};

    fn build_zip(entries: &[(&str, &str)]) -> anyhow::Result<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buf));
            for (name, content) in entries {
                let options: FileOptions<'_, ()> =
                    FileOptions::default().compression_method(CompressionMethod::Stored);
                zip.start_file(*name, options)?;
                zip.write_all(content.as_bytes())?;
            }
            zip.finish()?;
        }
        Ok(buf)
    }

    #[test]
    fn test_reads_first_csv_entry() -> anyhow::Result<()> {
        let csv = "Film_Name,Category,Language,Viewing_Month,Viewer_Rate,Number_of_Views\n\
                   FilmA,Action,English,2025-06,8.0,100\n";
        let buf = build_zip(&[("README.txt", "hello"), ("data/films.CSV", csv)])?;

        let records = read_zipped_csv(Cursor::new(buf))?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].film_name, "FilmA");
        Ok(())
    }

    #[test]
    fn test_archive_without_csv() -> anyhow::Result<()> {
        let buf = build_zip(&[("README.txt", "hello")])?;
        let err = read_zipped_csv(Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, LoadError::NoCsvInArchive));
        Ok(())
    }
}

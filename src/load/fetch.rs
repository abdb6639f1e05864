use reqwest::blocking::Client;
use std::{io::Cursor, path::Path};
use tracing::{debug, info};
use url::Url;

use super::{
    csv_reader::read_csv, parquet_reader::read_parquet, types::RawRecord,
    zip_reader::read_zipped_csv, Format, LoadError, LoadOptions,
};

/// Download `url` and parse the body according to the extension of its last
/// path segment. Non-2xx responses are errors; there are no retries.
pub fn load_url(url: &Url, options: &LoadOptions) -> Result<Vec<RawRecord>, LoadError> {
    let client = Client::builder().timeout(options.http_timeout).build()?;

    info!(%url, "downloading dataset");
    let resp = client.get(url.as_str()).send()?.error_for_status()?;
    let bytes = resp.bytes()?;
    debug!(bytes = bytes.len(), "downloaded");

    match Format::from_path(Path::new(url.path())) {
        Format::Csv => read_csv(&bytes[..]),
        Format::Parquet => read_parquet(bytes),
        Format::Zip => read_zipped_csv(Cursor::new(bytes)),
    }
}

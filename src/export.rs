//! CSV export of resolved place records.
//!
//! Fixed column order `location,latitude,longitude,type`, missing values
//! as empty fields, no index column. Export failures are the one fatal
//! error class in this tool.

use crate::geocode::PlaceRecord;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub enum ExportError {
    Io(io::Error),
    Csv(csv::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

/// Write all records as CSV, header included, to any writer.
///
/// The header is written explicitly so an empty batch still produces a
/// well-formed file.
pub fn write_csv<W: io::Write>(records: &[PlaceRecord], writer: W) -> Result<(), ExportError> {
    let mut w = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    w.write_record(["location", "latitude", "longitude", "type"])
        .map_err(ExportError::Csv)?;
    for record in records {
        w.serialize(record).map_err(ExportError::Csv)?;
    }
    w.flush().map_err(ExportError::Io)
}

/// Write all records to a file at `path`, creating or truncating it.
pub fn write_csv_file(records: &[PlaceRecord], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(ExportError::Io)?;
    write_csv(records, file)
}

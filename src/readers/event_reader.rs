use crate::error::{ProcessingError, Result};
use crate::models::{CellValue, RawTable};
use crate::utils::constants::DEFAULT_DELIMITER;
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Reads a delimited earthquake catalogue into a `RawTable`.
pub struct EventReader {
    delimiter: u8,
}

impl EventReader {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }

    pub fn with_delimiter(delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                delimiter
            )));
        }

        Ok(Self {
            delimiter: delimiter as u8,
        })
    }

    /// Read a table from a file on disk
    pub fn read_table(&self, path: &Path) -> Result<RawTable> {
        let bytes = std::fs::read(path)?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        self.parse_bytes(&bytes)
    }

    /// Read a table from any byte source
    pub fn read_from<R: Read>(&self, mut source: R) -> Result<RawTable> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        self.parse_bytes(&bytes)
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<RawTable> {
        let text = decode(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(ProcessingError::MissingData(
                "No columns to parse from input".to_string(),
            ));
        }
        let columns = dedupe_headers(headers);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;

            // Skip blank lines
            if record.len() == 1 && record[0].trim().is_empty() && columns.len() > 1 {
                continue;
            }

            if record.len() > columns.len() {
                let line = record.position().map_or(0, |p| p.line());
                return Err(ProcessingError::InvalidFormat(format!(
                    "Line {}: expected {} fields, saw {}",
                    line,
                    columns.len(),
                    record.len()
                )));
            }

            let mut cells: Vec<CellValue> = record.iter().map(CellValue::infer).collect();
            cells.resize(columns.len(), CellValue::Missing);
            rows.push(cells);
        }

        debug!("Parsed {} rows across {} columns", rows.len(), columns.len());
        RawTable::new(columns, rows)
    }
}

impl Default for EventReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode as UTF-8 (honouring a BOM), falling back to Windows-1252 for
/// legacy catalogue exports.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text;
    }

    warn!("Input is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}

/// Give blank headers a placeholder name and suffix repeats with `.1`, `.2`, ...
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(headers.len());

    for (index, header) in headers.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", index)
        } else {
            header
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while columns.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        columns.push(name);
    }

    columns
}

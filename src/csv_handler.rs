use crate::error::{CrateError, Result};
use std::path::PathBuf;

/// One name-bearing row from an input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    /// Trimmed name; `None` when the cell is empty, absent or a missing-value marker.
    pub scientific_name: Option<String>,
    pub source_file: String,
    /// Always empty. Kept so the output layout stays stable.
    pub powo_name: String,
}

impl SourceRecord {
    /// Name as it is queried and written: missing names become empty strings.
    pub fn query_name(&self) -> &str {
        self.scientific_name.as_deref().unwrap_or("")
    }
}

/// Where to read names from: a file and the column holding the name.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub name_column: String,
}

// Input tables are ISO-8859-1, where every byte is the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

// Cell values that spreadsheet and dataframe exports use for "no value".
const MISSING_VALUE_MARKERS: [&str; 19] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null", "",
];

fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if MISSING_VALUE_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Reads `spec.path` and extracts one `SourceRecord` per data row, in file order.
///
/// Rows shorter than the header are accepted and their absent cells treated as
/// missing. Rows longer than the header are rejected.
pub fn load_source(spec: &SourceSpec) -> Result<Vec<SourceRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(&spec.path)?;
    let headers = reader.byte_headers()?.clone();

    let column_index = headers
        .iter()
        .position(|h| decode_latin1(h).trim() == spec.name_column)
        .ok_or_else(|| CrateError::MissingHeader {
            column: spec.name_column.clone(),
            path: spec.path.clone(),
        })?;

    let source_file = spec.path.display().to_string();
    let mut records = Vec::new();
    for (i, result) in reader.byte_records().enumerate() {
        let row = result?;
        if row.len() > headers.len() {
            return Err(CrateError::OverlongRow {
                path: spec.path.clone(),
                row: i + 2, // +1 for header, +1 for 0-based index
                fields: row.len(),
                expected: headers.len(),
            });
        }
        let raw = row.get(column_index).map(decode_latin1).unwrap_or_default();
        records.push(SourceRecord {
            scientific_name: normalize_name(&raw),
            source_file: source_file.clone(),
            powo_name: String::new(),
        });
    }

    Ok(records)
}

/// Loads both sources and concatenates them, source A first.
pub fn load_combined(source_a: &SourceSpec, source_b: &SourceSpec) -> Result<CombinedTable> {
    let first = load_source(source_a)?;
    let second = load_source(source_b)?;
    Ok(CombinedTable::new(first, second))
}

/// Records of source A followed by those of source B. Row position is the join key.
#[derive(Debug, Clone, Default)]
pub struct CombinedTable {
    records: Vec<SourceRecord>,
    first_len: usize,
}

impl CombinedTable {
    pub fn new(first: Vec<SourceRecord>, second: Vec<SourceRecord>) -> Self {
        let first_len = first.len();
        let mut records = first;
        records.extend(second);
        Self { records, first_len }
    }

    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Row counts of source A and source B.
    pub fn source_counts(&self) -> (usize, usize) {
        (self.first_len, self.records.len() - self.first_len)
    }

    /// Ordered names for the verification request; duplicates and blanks pass through.
    pub fn name_strings(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.query_name().to_string())
            .collect()
    }

    pub fn into_records(self) -> Vec<SourceRecord> {
        self.records
    }
}

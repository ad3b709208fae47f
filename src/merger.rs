use crate::csv_handler::{CombinedTable, SourceRecord};
use crate::error::{CrateError, Result};
use crate::matcher::VerificationResult;
use crate::verifier::NameEntry;
use log::warn;
use std::path::Path;

pub const OUTPUT_HEADERS: [&str; 8] = [
    "scientificName",
    "sourceFile",
    "powoName",
    "GNVmatchType",
    "GNVmatchedCanonicalFull",
    "GNVisSynonym",
    "GNVcurrentCanonicalFull",
    "GNVdataSourceTitleShort",
];

#[derive(Debug, Clone)]
pub struct OutputRow {
    pub source: SourceRecord,
    pub result: VerificationResult,
}

/// Checks that the verifier answered every queried name at the position it was sent.
///
/// Entries that echo `suppliedInput` must echo the name queried at the same index.
/// Entries without it are accepted on position alone.
pub fn check_alignment(queried: &[String], entries: &[NameEntry]) -> Result<()> {
    if queried.len() != entries.len() {
        return Err(CrateError::ResponseCountMismatch {
            expected: queried.len(),
            actual: entries.len(),
        });
    }

    for (index, (name, entry)) in queried.iter().zip(entries).enumerate() {
        match entry.supplied_input.as_deref() {
            Some(supplied) if supplied != name => {
                return Err(CrateError::ResponseMisaligned {
                    index,
                    expected: name.clone(),
                    supplied: supplied.to_string(),
                });
            }
            Some(_) => {}
            None => warn!(
                "Verifier entry {} has no suppliedInput; trusting its position for '{}'",
                index, name
            ),
        }
    }

    Ok(())
}

/// Pairs row `i` of the table with result `i`.
pub fn merge(table: CombinedTable, results: Vec<VerificationResult>) -> Result<Vec<OutputRow>> {
    if table.len() != results.len() {
        return Err(CrateError::ResponseCountMismatch {
            expected: table.len(),
            actual: results.len(),
        });
    }

    Ok(table
        .into_records()
        .into_iter()
        .zip(results)
        .map(|(source, result)| OutputRow { source, result })
        .collect())
}

fn synonym_label(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "true",
        Some(false) => "false",
        None => "",
    }
}

/// Writes the header and all rows to `path`, replacing any existing file.
pub fn write_output(path: &Path, rows: &[OutputRow]) -> Result<()> {
    let to_write_error = |source: csv::Error| CrateError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(to_write_error)?;
    writer.write_record(OUTPUT_HEADERS).map_err(to_write_error)?;

    for row in rows {
        let result = &row.result;
        writer
            .write_record([
                row.source.query_name(),
                row.source.source_file.as_str(),
                row.source.powo_name.as_str(),
                result.match_type.as_str(),
                result.matched_canonical_full.as_deref().unwrap_or(""),
                synonym_label(result.is_synonym),
                result.current_canonical_full.as_deref().unwrap_or(""),
                result.data_source_title_short.as_deref().unwrap_or(""),
            ])
            .map_err(to_write_error)?;
    }

    writer
        .flush()
        .map_err(|e| to_write_error(csv::Error::from(e)))?;
    Ok(())
}

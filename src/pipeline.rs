//! Single-pass run: load, verify, select, merge, write.
use crate::csv_handler::{SourceSpec, load_combined};
use crate::error::Result;
use crate::matcher::{Selection, select_all};
use crate::merger::{OutputRow, check_alignment, merge, write_output};
use crate::verifier::{VerificationResponse, VerifierConfig, build_client, verify_names};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source_a: SourceSpec,
    pub source_b: SourceSpec,
    pub output: PathBuf,
    pub verifier: VerifierConfig,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub source_a_rows: usize,
    pub source_b_rows: usize,
    pub rows_written: usize,
    pub match_types: BTreeMap<String, usize>,
    pub preferred: usize,
    pub first_listed: usize,
    pub no_candidates: usize,
}

impl RunSummary {
    fn from_rows(source_counts: (usize, usize), rows: &[OutputRow]) -> Self {
        let mut summary = RunSummary {
            source_a_rows: source_counts.0,
            source_b_rows: source_counts.1,
            rows_written: rows.len(),
            ..RunSummary::default()
        };
        for row in rows {
            let label = if row.result.match_type.is_empty() {
                "(none)".to_string()
            } else {
                row.result.match_type.clone()
            };
            *summary.match_types.entry(label).or_insert(0) += 1;
            match row.result.selection {
                Selection::Preferred => summary.preferred += 1,
                Selection::FirstListed => summary.first_listed += 1,
                Selection::NoCandidates => summary.no_candidates += 1,
            }
        }
        summary
    }

    pub fn print(&self, output: &std::path::Path) {
        println!("\n--- Summary Report ---");
        println!("Names from source A: {}", self.source_a_rows);
        println!("Names from source B: {}", self.source_b_rows);
        println!("Rows written: {}", self.rows_written);
        for (match_type, count) in &self.match_types {
            println!("  matchType {}: {}", match_type, count);
        }
        println!("Matched by preferred source: {}", self.preferred);
        println!("Matched by first-listed fallback: {}", self.first_listed);
        println!("Without candidates: {}", self.no_candidates);
        println!("Output: {}", output.display());
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Runs the whole reconciliation. The output file is only touched once every
/// name has been verified and aligned.
pub async fn run(config: &RunConfig) -> Result<RunSummary> {
    info!("Loading {:?} and {:?}...", config.source_a.path, config.source_b.path);
    let table = load_combined(&config.source_a, &config.source_b)?;
    let source_counts = table.source_counts();
    info!(
        "Loaded {} names ({} from source A, {} from source B).",
        table.len(),
        source_counts.0,
        source_counts.1
    );

    let names = table.name_strings();
    let response = if names.is_empty() {
        info!("No names to verify; skipping the verifier call.");
        VerificationResponse::default()
    } else {
        let client = build_client(&config.verifier)?;
        let pb = spinner(format!("Verifying {} names...", names.len()));
        let response = verify_names(&names, &client, &config.verifier).await;
        pb.finish_and_clear();
        let response = response?;
        info!("Received {} entries from the verifier.", response.names.len());
        response
    };

    check_alignment(&names, &response.names)?;
    let results = select_all(&response.names, config.verifier.preferred_source);
    let rows = merge(table, results)?;

    write_output(&config.output, &rows)?;
    info!("Output written to {:?}", config.output);

    Ok(RunSummary::from_rows(source_counts, &rows))
}

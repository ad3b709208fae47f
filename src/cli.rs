use crate::csv_handler::SourceSpec;
use crate::pipeline::RunConfig;
use crate::verifier::{
    DEFAULT_MAIN_TAXON_THRESHOLD, DEFAULT_TIMEOUT_SECS, GNV_VERIFICATIONS_URL,
    POWO_DATA_SOURCE_ID, VerifierConfig,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// First input table (read as ISO-8859-1).
    #[arg(long, value_name = "FILE", default_value = "bgbase.csv")]
    pub source_a: PathBuf,

    /// Second input table (read as ISO-8859-1).
    #[arg(long, value_name = "FILE", default_value = "gbif.csv")]
    pub source_b: PathBuf,

    /// Name column of the first table.
    #[arg(long, default_value = "SCIENTIFIC_NAME")]
    pub column_a: String,

    /// Name column of the second table.
    #[arg(long, default_value = "verbatimScientificName")]
    pub column_b: String,

    /// Output CSV, overwritten on success.
    #[arg(short, long, value_name = "FILE", default_value = "output.csv")]
    pub output: PathBuf,

    #[arg(long, default_value = GNV_VERIFICATIONS_URL)]
    pub endpoint: String,

    /// Data source id whose match is kept when several sources answer.
    #[arg(long, default_value_t = POWO_DATA_SOURCE_ID)]
    pub preferred_source: i64,

    #[arg(long, default_value_t = DEFAULT_MAIN_TAXON_THRESHOLD)]
    pub main_taxon_threshold: f64,

    /// Seconds to wait for the verifier before giving up.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn into_run_config(self) -> RunConfig {
        RunConfig {
            source_a: SourceSpec {
                path: self.source_a,
                name_column: self.column_a,
            },
            source_b: SourceSpec {
                path: self.source_b,
                name_column: self.column_b,
            },
            output: self.output,
            verifier: VerifierConfig {
                endpoint: self.endpoint,
                preferred_source: self.preferred_source,
                main_taxon_threshold: self.main_taxon_threshold,
                timeout: Duration::from_secs(self.timeout_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = Cli::parse_from(["gnv-reconcile"]).into_run_config();
        assert_eq!(config.source_a.path, PathBuf::from("bgbase.csv"));
        assert_eq!(config.source_a.name_column, "SCIENTIFIC_NAME");
        assert_eq!(config.source_b.path, PathBuf::from("gbif.csv"));
        assert_eq!(config.source_b.name_column, "verbatimScientificName");
        assert_eq!(config.output, PathBuf::from("output.csv"));
        assert_eq!(config.verifier.endpoint, GNV_VERIFICATIONS_URL);
        assert_eq!(config.verifier.preferred_source, 197);
        assert_eq!(config.verifier.main_taxon_threshold, 0.6);
        assert_eq!(config.verifier.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_cli_overrides() {
        let args = vec![
            "gnv-reconcile",
            "--source-a",
            "herbarium.csv",
            "--column-b",
            "scientificName",
            "-o",
            "reconciled.csv",
            "--preferred-source",
            "1",
            "--timeout-secs",
            "30",
        ];
        let config = Cli::parse_from(args).into_run_config();
        assert_eq!(config.source_a.path, PathBuf::from("herbarium.csv"));
        assert_eq!(config.source_b.name_column, "scientificName");
        assert_eq!(config.output, PathBuf::from("reconciled.csv"));
        assert_eq!(config.verifier.preferred_source, 1);
        assert_eq!(config.verifier.timeout, Duration::from_secs(30));
    }

    #[test]
    #[should_panic]
    fn test_cli_rejects_non_numeric_source() {
        Cli::try_parse_from(["gnv-reconcile", "--preferred-source", "powo"]).unwrap();
    }
}

//! Batch client for the Global Names Verifier.
use crate::error::{CrateError, Result};
use log::info;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const GNV_VERIFICATIONS_URL: &str = "https://verifier.globalnames.org/api/v1/verifications";
/// Plants of the World Online.
pub const POWO_DATA_SOURCE_ID: i64 = 197;
pub const DEFAULT_MAIN_TAXON_THRESHOLD: f64 = 0.6;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const USER_AGENT: &str = concat!("gnv-reconcile/", env!("CARGO_PKG_VERSION"), " reqwest/0.12");

#[derive(Debug, Clone)]
pub struct VerifierConfig {
    pub endpoint: String,
    pub preferred_source: i64,
    pub main_taxon_threshold: f64,
    pub timeout: Duration,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            endpoint: GNV_VERIFICATIONS_URL.to_string(),
            preferred_source: POWO_DATA_SOURCE_ID,
            main_taxon_threshold: DEFAULT_MAIN_TAXON_THRESHOLD,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest<'a> {
    pub name_strings: &'a [String],
    pub with_all_matches: bool,
    pub with_capitalization: bool,
    pub with_species_group: bool,
    pub with_uninomial_fuzzy_match: bool,
    pub with_stats: bool,
    pub main_taxon_threshold: f64,
    pub preferred_sources: Vec<i64>,
}

impl<'a> VerificationRequest<'a> {
    pub fn new(name_strings: &'a [String], config: &VerifierConfig) -> Self {
        Self {
            name_strings,
            with_all_matches: true,
            with_capitalization: true,
            with_species_group: true,
            with_uninomial_fuzzy_match: false,
            with_stats: true,
            main_taxon_threshold: config.main_taxon_threshold,
            preferred_sources: vec![config.preferred_source],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationResponse {
    #[serde(default)]
    pub names: Vec<NameEntry>,
}

/// Verifier output for one queried name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameEntry {
    #[serde(default)]
    pub supplied_input: Option<String>,
    #[serde(default)]
    pub match_type: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<Candidate>>,
}

impl NameEntry {
    pub fn candidates(&self) -> &[Candidate] {
        self.results.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub data_source_id: Option<i64>,
    #[serde(default)]
    pub data_source_title_short: Option<String>,
    #[serde(default)]
    pub matched_canonical_full: Option<String>,
    #[serde(default)]
    pub is_synonym: Option<bool>,
    #[serde(default)]
    pub current_canonical_full: Option<String>,
}

pub fn build_client(config: &VerifierConfig) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout)
        .build()
        .map_err(CrateError::ApiRequestError)
}

/// Sends every name in one POST and returns the decoded envelope.
pub async fn verify_names(
    names: &[String],
    client: &Client,
    config: &VerifierConfig,
) -> Result<VerificationResponse> {
    let request = VerificationRequest::new(names, config);
    info!(
        "Posting {} names to {} (preferred source {})",
        names.len(),
        config.endpoint,
        config.preferred_source
    );

    let response = client
        .post(&config.endpoint)
        .header(reqwest::header::ACCEPT, "application/json")
        .json(&request)
        .send()
        .await
        .map_err(CrateError::ApiRequestError)?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrateError::ApiStatusError { status });
    }

    response
        .json::<VerificationResponse>()
        .await
        .map_err(CrateError::ApiJsonDecodeError)
}

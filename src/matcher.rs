use crate::verifier::{Candidate, NameEntry};

/// How the candidate behind a `VerificationResult` was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    Preferred,
    FirstListed,
    #[default]
    NoCandidates,
}

/// Flattened verifier outcome for one queried name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationResult {
    pub match_type: String,
    pub matched_canonical_full: Option<String>,
    pub is_synonym: Option<bool>,
    pub current_canonical_full: Option<String>,
    pub data_source_title_short: Option<String>,
    pub selection: Selection,
}

/// Picks the first candidate from `preferred_source`, else the first candidate listed.
pub fn select_candidate(
    candidates: &[Candidate],
    preferred_source: i64,
) -> Option<(&Candidate, Selection)> {
    candidates
        .iter()
        .find(|c| c.data_source_id == Some(preferred_source))
        .map(|c| (c, Selection::Preferred))
        .or_else(|| candidates.first().map(|c| (c, Selection::FirstListed)))
}

pub fn select_match(entry: &NameEntry, preferred_source: i64) -> VerificationResult {
    let match_type = entry.match_type.clone().unwrap_or_default();
    match select_candidate(entry.candidates(), preferred_source) {
        Some((candidate, selection)) => VerificationResult {
            match_type,
            matched_canonical_full: candidate.matched_canonical_full.clone(),
            is_synonym: candidate.is_synonym,
            current_canonical_full: candidate.current_canonical_full.clone(),
            data_source_title_short: candidate.data_source_title_short.clone(),
            selection,
        },
        None => VerificationResult {
            match_type,
            ..VerificationResult::default()
        },
    }
}

/// Applies `select_match` to every entry, preserving order.
pub fn select_all(entries: &[NameEntry], preferred_source: i64) -> Vec<VerificationResult> {
    entries
        .iter()
        .map(|entry| select_match(entry, preferred_source))
        .collect()
}

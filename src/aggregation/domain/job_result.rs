use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of a single CI job run, as published by the results store
///
/// Unrecognized outcome strings are preserved verbatim so that records
/// round-trip without loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Outcome {
    Passed,
    Failed,
    Info,
    NeedsInspection,
    Other(String),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed)
    }
}

impl From<String> for Outcome {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PASSED" => Outcome::Passed,
            "FAILED" => Outcome::Failed,
            "INFO" => Outcome::Info,
            "NEEDS_INSPECTION" => Outcome::NeedsInspection,
            _ => Outcome::Other(raw),
        }
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Passed => "PASSED".to_string(),
            Outcome::Failed => "FAILED".to_string(),
            Outcome::Info => "INFO".to_string(),
            Outcome::NeedsInspection => "NEEDS_INSPECTION".to_string(),
            Outcome::Other(raw) => raw,
        }
    }
}

/// One test result record from the results store
///
/// Only the fields the aggregation needs are modelled; everything else
/// in the record is ignored on deserialization. The `ref_url` is the
/// record's deduplication identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub ref_url: String,
    pub outcome: Outcome,
    #[serde(default)]
    pub data: JobResultData,
}

/// Free-form key data attached to a result record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobResultData {
    #[serde(default)]
    pub job_name: Vec<String>,
}

impl JobResult {
    /// The first job name embedded in the record, if any
    pub fn primary_job_name(&self) -> Option<&str> {
        self.data.job_name.first().map(String::as_str)
    }
}

/// Removes repeated records, keyed by `ref_url`, preserving first-seen order
///
/// Re-queried pages routinely repeat entries; the first occurrence wins.
pub fn dedup_by_ref_url(results: Vec<JobResult>) -> Vec<JobResult> {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|result| seen.insert(result.ref_url.clone()))
        .collect()
}

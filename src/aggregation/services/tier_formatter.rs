use crate::aggregation::domain::{
    BuildSummary, JobResult, TierReport, TierResults, TierVerdict,
};
use std::collections::BTreeMap;

/// TierFormatter reduces deduplicated per-job records into the tier verdict
///
/// The verdict is a monotonic AND-fold: `tier_tag` starts true and flips
/// false permanently on the first FAILED outcome, so bucket iteration
/// order never changes the final boolean.
pub struct TierFormatter;

impl TierFormatter {
    /// Builds the downstream-compatible report from per-job buckets
    pub fn format(
        per_job: &BTreeMap<String, Vec<JobResult>>,
        ci_tier: u32,
        nvr: &str,
    ) -> TierReport {
        let mut tier_tag = true;
        let mut job_entries = Vec::with_capacity(per_job.len());
        for (job_name, results) in per_job {
            let summaries = Self::format_job(results, &mut tier_tag);
            let mut entry = BTreeMap::new();
            entry.insert(job_name.clone(), summaries);
            job_entries.push(entry);
        }

        TierReport {
            results: TierResults {
                tier: TierVerdict {
                    ci_tier,
                    nvr: nvr.to_string(),
                    job_name: job_entries,
                    tier_tag,
                },
            },
        }
    }

    fn format_job(results: &[JobResult], tier_tag: &mut bool) -> Vec<BuildSummary> {
        results
            .iter()
            .map(|result| {
                if result.outcome.is_failed() {
                    *tier_tag = false;
                }
                BuildSummary {
                    build_url: Self::build_url(&result.ref_url),
                    build_number: Self::build_number(&result.ref_url),
                    build_status: result.outcome.clone(),
                }
            })
            .collect()
    }

    /// The reference URL truncated at the first `/console` suffix
    fn build_url(ref_url: &str) -> String {
        match ref_url.find("/console") {
            Some(index) => ref_url[..index].to_string(),
            None => ref_url.to_string(),
        }
    }

    /// Extracts the build number from the reference URL path
    ///
    /// The last path segment wins when numeric, else the second-to-last
    /// when numeric, else the literal `"unknown"`.
    fn build_number(ref_url: &str) -> String {
        let segments: Vec<&str> = ref_url.split('/').collect();
        if let [.., second_last, last] = segments.as_slice() {
            if is_numeric(last) {
                return (*last).to_string();
            }
            if is_numeric(second_last) {
                return (*second_last).to_string();
            }
        } else if let [only] = segments.as_slice() {
            if is_numeric(only) {
                return (*only).to_string();
            }
        }
        "unknown".to_string()
    }
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit())
}

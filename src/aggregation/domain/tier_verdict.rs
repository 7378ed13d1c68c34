use super::job_result::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized view of one CI build inside the tier report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub build_url: String,
    pub build_number: String,
    pub build_status: Outcome,
}

/// Pass/fail verdict for one CI tier of one component build
///
/// `tier_tag` is true iff no contained build carries a FAILED outcome;
/// an empty result set is vacuously passing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierVerdict {
    pub ci_tier: u32,
    pub nvr: String,
    pub job_name: Vec<BTreeMap<String, Vec<BuildSummary>>>,
    pub tier_tag: bool,
}

/// Wrapper matching the `{"results": {"tier": ...}}` shape consumed
/// downstream; the field set is part of the compatibility contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierReport {
    pub results: TierResults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierResults {
    pub tier: TierVerdict,
}

impl TierReport {
    pub fn all_passed(&self) -> bool {
        self.results.tier.tier_tag
    }
}

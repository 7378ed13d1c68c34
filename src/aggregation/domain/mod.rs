/// Domain model for CI metadata aggregation
pub mod component;
pub mod job_result;
pub mod query_template;
pub mod release_id;
pub mod tier_verdict;

pub use component::ComponentIdentifier;
pub use job_result::{dedup_by_ref_url, JobResult, JobResultData, Outcome};
pub use query_template::{CatalogQueryPlan, CATALOG_QUERY_TEMPLATES};
pub use release_id::release_id_from_compose;
pub use tier_verdict::{BuildSummary, TierReport, TierResults, TierVerdict};

//! nvr-verdict - CI metadata aggregation for build NVRs
//!
//! This library correlates CI and build metadata from two independent,
//! paginated, eventually-consistent REST data sources into a single
//! record for a given component NVR: a pass/fail tier verdict folded
//! from per-job results, and a catalog metadata dictionary with a
//! derived release-to-rpm-mapping index.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Aggregation Core** (`aggregation`): Domain model and pure services
//! - **Application Layer** (`application`): Use cases, the paginator and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Error types, result alias and telemetry
//!
//! # Example
//!
//! ```no_run
//! use nvr_verdict::prelude::*;
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let query_client = HttpQueryClient::new(Path::new("/etc/ssl/certs/ca-bundle.crt"))?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = PollResultsUseCase::new(query_client, progress_reporter);
//!
//! // Execute
//! let request = PollRequest::new(
//!     "https://resultsdb.example.com/api/v2.0/results".to_string(),
//!     "bash-4.4.19-8.el8".to_string(),
//!     1,
//!     vec!["ci-tier1".to_string()],
//! );
//! let report = use_case.execute(request).await?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod aggregation;
pub mod application;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::network::HttpQueryClient;
    pub use crate::aggregation::domain::{
        dedup_by_ref_url, BuildSummary, CatalogQueryPlan, ComponentIdentifier, JobResult,
        Outcome, TierReport, TierVerdict,
    };
    pub use crate::aggregation::services::{ReleaseCorrelator, TierFormatter};
    pub use crate::application::dto::{CatalogReport, CatalogRequest, PollRequest};
    pub use crate::application::services::{
        EmptyPagePolicy, FetchLimit, PageQuery, PageStyle, Paginator,
    };
    pub use crate::application::use_cases::{PollResultsUseCase, ResolveCatalogUseCase};
    pub use crate::ports::outbound::{OutputPresenter, ProgressReporter, QueryClient};
    pub use crate::shared::error::{ExitCode, VerdictError};
    pub use crate::shared::Result;
}

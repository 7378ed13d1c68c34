use crate::aggregation::domain::{dedup_by_ref_url, JobResult, TierReport};
use crate::aggregation::services::TierFormatter;
use crate::application::dto::PollRequest;
use crate::application::services::{EmptyPagePolicy, FetchLimit, PageQuery, PageStyle, Paginator};
use crate::ports::outbound::{ProgressReporter, QueryClient};
use crate::shared::error::VerdictError;
use crate::shared::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::warn;

/// Wait at most two hours for a job to publish its results
const TIMEOUT_BUDGET: Duration = Duration::from_secs(7200);

/// Sleep between re-issues of a page whose results are not yet published
const EMPTY_PAGE_WAIT: Duration = Duration::from_secs(60);

/// Page cap when polling a single named job
const JOB_PAGE_LIMIT: usize = 100;

/// Page cap for the bare nvr+tier query
const BARE_QUERY_PAGE_LIMIT: usize = 10;

/// Bucket for records which do not carry a job name
const UNKNOWN_JOB: &str = "UNKNOWN";

/// PollResultsUseCase - polls the results store and folds per-job
/// outcomes into a tier verdict
///
/// The results store is eventually consistent: a job may not have
/// published anything yet when polling starts, so empty pages are waited
/// out under a per-job timeout budget rather than treated as errors.
///
/// # Type Parameters
/// * `Q` - QueryClient implementation
/// * `PR` - ProgressReporter implementation
pub struct PollResultsUseCase<Q, PR> {
    query_client: Q,
    progress_reporter: PR,
    empty_page_wait: Duration,
    timeout_budget: Duration,
}

impl<Q, PR> PollResultsUseCase<Q, PR>
where
    Q: QueryClient,
    PR: ProgressReporter,
{
    /// Creates a new PollResultsUseCase with injected dependencies
    pub fn new(query_client: Q, progress_reporter: PR) -> Self {
        Self {
            query_client,
            progress_reporter,
            empty_page_wait: EMPTY_PAGE_WAIT,
            timeout_budget: TIMEOUT_BUDGET,
        }
    }

    /// Overrides the empty-page wait and the per-job timeout budget
    pub fn with_poll_timing(mut self, empty_page_wait: Duration, timeout_budget: Duration) -> Self {
        self.empty_page_wait = empty_page_wait;
        self.timeout_budget = timeout_budget;
        self
    }

    /// Executes the polling use case and formats the tier verdict
    pub async fn execute(&self, request: PollRequest) -> Result<TierReport> {
        self.progress_reporter.report(&format!(
            "🔍 Querying tier {} results for '{}'",
            request.test_tier, request.nvr
        ));

        let per_job = self.collect_job_results(&request).await?;

        let collected: usize = per_job.values().map(Vec::len).sum();
        self.progress_reporter.report_completion(&format!(
            "✅ Collected {} result(s) across {} job(s)",
            collected,
            per_job.len()
        ));

        Ok(TierFormatter::format(
            &per_job,
            request.test_tier,
            &request.nvr,
        ))
    }

    /// Gathers and deduplicates the per-job result buckets
    async fn collect_job_results(
        &self,
        request: &PollRequest,
    ) -> Result<BTreeMap<String, Vec<JobResult>>> {
        let mut buckets = if request.job_names.is_empty() {
            self.poll_all_jobs(request).await?
        } else {
            self.poll_named_jobs(request).await?
        };

        // re-queried pages repeat entries; dedup applies to both branches
        for results in buckets.values_mut() {
            *results = dedup_by_ref_url(std::mem::take(results));
        }
        Ok(buckets)
    }

    /// Polls each named job under a fresh timeout budget
    ///
    /// A job that never publishes within its budget is isolated: its
    /// bucket stays empty and the remaining jobs are still polled.
    async fn poll_named_jobs(
        &self,
        request: &PollRequest,
    ) -> Result<BTreeMap<String, Vec<JobResult>>> {
        let paginator = Paginator::new(&self.query_client);
        let mut buckets = BTreeMap::new();
        let total = request.job_names.len();

        for (index, job_name) in request.job_names.iter().enumerate() {
            self.progress_reporter
                .report_progress(index + 1, total, Some(job_name));

            let query = self.results_query(request, Some(job_name));
            match paginator.collect(&query).await {
                Ok(raw) => {
                    buckets.insert(job_name.clone(), parse_records(&query.base_url, raw)?);
                }
                Err(VerdictError::PollTimeout { .. }) => {
                    warn!(job_name = %job_name, "no results within the timeout budget");
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: job '{}' published no results within the timeout budget",
                        job_name
                    ));
                    buckets.insert(job_name.clone(), Vec::new());
                }
                Err(error) => return Err(error.into()),
            }
        }
        Ok(buckets)
    }

    /// Runs the bare nvr+tier query and buckets records by their
    /// embedded job name
    async fn poll_all_jobs(
        &self,
        request: &PollRequest,
    ) -> Result<BTreeMap<String, Vec<JobResult>>> {
        let paginator = Paginator::new(&self.query_client);
        let query = self.results_query(request, None);
        let raw = paginator.collect(&query).await?;
        let records = parse_records(&query.base_url, raw)?;

        let mut buckets: BTreeMap<String, Vec<JobResult>> = BTreeMap::new();
        for record in records {
            let bucket = record
                .primary_job_name()
                .unwrap_or(UNKNOWN_JOB)
                .to_string();
            buckets.entry(bucket).or_default().push(record);
        }
        Ok(buckets)
    }

    fn results_query(&self, request: &PollRequest, job_name: Option<&str>) -> PageQuery {
        let mut params = vec![
            ("item".to_string(), request.nvr.clone()),
            ("CI_tier".to_string(), request.test_tier.to_string()),
        ];
        let limit = match job_name {
            Some(name) => {
                params.push(("job_name".to_string(), name.to_string()));
                FetchLimit::Pages(JOB_PAGE_LIMIT)
            }
            None => FetchLimit::Pages(BARE_QUERY_PAGE_LIMIT),
        };

        PageQuery {
            base_url: request.resultsdb_api_url.clone(),
            params,
            style: PageStyle::Indexed,
            limit,
            empty_page: EmptyPagePolicy::WaitAndRetry {
                wait: self.empty_page_wait,
                budget: self.timeout_budget,
            },
        }
    }
}

fn parse_records(url: &str, raw: Vec<Value>) -> Result<Vec<JobResult>> {
    raw.into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|e| {
                VerdictError::MalformedRecord {
                    url: url.to_string(),
                    details: e.to_string(),
                }
                .into()
            })
        })
        .collect()
}

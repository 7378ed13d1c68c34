use crate::aggregation::domain::{CatalogQueryPlan, ComponentIdentifier};
use crate::aggregation::services::ReleaseCorrelator;
use crate::application::dto::{CatalogRequest, CatalogReport};
use crate::application::services::{EmptyPagePolicy, FetchLimit, PageQuery, PageStyle, Paginator};
use crate::ports::outbound::{ProgressReporter, QueryClient};
use crate::shared::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Record cap for one entity-type query. Historically expressed as ten
/// "pages" of twenty records; the cap is on accumulated records, not on
/// requests.
const MAX_RECORDS_PER_ENTITY: usize = 200;

/// ResolveCatalogUseCase - walks the component catalog and assembles the
/// per-entity-type metadata dictionary for one component
///
/// The component NVR is split syntactically, each entity-type query
/// template is specialized from the resulting tuple, and the paginated
/// result sets for `release-components` and `rpms` are cross-referenced
/// into the derived `rpm-mapping` entry.
///
/// # Type Parameters
/// * `Q` - QueryClient implementation
/// * `PR` - ProgressReporter implementation
pub struct ResolveCatalogUseCase<Q, PR> {
    query_client: Q,
    progress_reporter: PR,
}

impl<Q, PR> ResolveCatalogUseCase<Q, PR>
where
    Q: QueryClient,
    PR: ProgressReporter,
{
    /// Creates a new ResolveCatalogUseCase with injected dependencies
    pub fn new(query_client: Q, progress_reporter: PR) -> Self {
        Self {
            query_client,
            progress_reporter,
        }
    }

    /// Executes the catalog correlation use case
    pub async fn execute(&self, request: CatalogRequest) -> Result<CatalogReport> {
        let component = ComponentIdentifier::parse(&request.component_nvr)?;
        let plan = CatalogQueryPlan::for_component(&component)?;

        self.progress_reporter.report(&format!(
            "🔍 Querying catalog metadata for component '{}'",
            component.name()
        ));

        let buckets = self.fetch_entity_buckets(&request, &plan).await?;
        let rpm_mappings = self
            .fetch_rpm_mappings(&request, &component, &buckets)
            .await?;

        self.progress_reporter.report_completion(&format!(
            "✅ Catalog metadata collected for '{}'",
            component
        ));

        Ok(CatalogReport::new(buckets, rpm_mappings))
    }

    /// Pages through every entity-type endpoint of the plan
    async fn fetch_entity_buckets(
        &self,
        request: &CatalogRequest,
        plan: &CatalogQueryPlan,
    ) -> Result<Vec<(String, Vec<Value>)>> {
        let paginator = Paginator::new(&self.query_client);
        let base_url = request.catalog_api_url.trim_end_matches('/');
        let mut buckets = Vec::with_capacity(plan.len());
        let total = plan.len();

        for (index, (entity_type, params)) in plan.queries().enumerate() {
            self.progress_reporter
                .report_progress(index + 1, total, Some(entity_type));
            debug!(entity_type, params = ?params, "running catalog query");

            let query = PageQuery {
                base_url: format!("{}/{}/?", base_url, entity_type),
                params: params.to_vec(),
                style: PageStyle::Linked,
                limit: FetchLimit::Records(MAX_RECORDS_PER_ENTITY),
                empty_page: EmptyPagePolicy::EndOfStream,
            };
            let records = paginator.collect(&query).await?;
            buckets.push((entity_type.to_string(), records));
        }
        Ok(buckets)
    }

    /// Fetches the release-to-rpm mapping for every correlated release id
    async fn fetch_rpm_mappings(
        &self,
        request: &CatalogRequest,
        component: &ComponentIdentifier,
        buckets: &[(String, Vec<Value>)],
    ) -> Result<BTreeMap<String, Value>> {
        let release_components = bucket_records(buckets, "release-components");
        let rpms = bucket_records(buckets, "rpms");
        let release_ids = ReleaseCorrelator::matching_release_ids(release_components, rpms);
        if release_ids.is_empty() {
            // a component with no composed, registered release is a valid
            // result, not a failure
            info!(
                component = %component,
                "no release ids matched between release-components and linked composes"
            );
        }

        let base_url = request.catalog_api_url.trim_end_matches('/');
        let mut mappings = BTreeMap::new();
        for release_id in release_ids {
            let url = format!(
                "{}/releases/{}/rpm-mapping/{}/?",
                base_url,
                urlencoding::encode(&release_id),
                urlencoding::encode(component.name())
            );
            let response = self.query_client.query(&url, &[]).await?;
            mappings.insert(release_id, response);
        }
        Ok(mappings)
    }
}

fn bucket_records<'a>(buckets: &'a [(String, Vec<Value>)], entity_type: &str) -> &'a [Value] {
    buckets
        .iter()
        .find(|(name, _)| name == entity_type)
        .map(|(_, records)| records.as_slice())
        .unwrap_or(&[])
}

use crate::ports::outbound::QueryClient;
use crate::shared::error::VerdictError;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// How a paginated endpoint advances from one page to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStyle {
    /// Results-store convention: a `page` index parameter is merged into
    /// the query, entries arrive under `data`, and `next` only signals
    /// whether another page exists
    Indexed,
    /// Catalog convention: entries arrive under `results` and `next`
    /// holds the absolute URL of the following page
    Linked,
}

impl PageStyle {
    fn entries_field(self) -> &'static str {
        match self {
            PageStyle::Indexed => "data",
            PageStyle::Linked => "results",
        }
    }
}

/// Upper bound on how much a single pagination run may fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchLimit {
    /// Stop once this many pages were retrieved
    Pages(usize),
    /// Stop once at least this many records were accumulated; the last
    /// page may overshoot the cap
    Records(usize),
}

/// Behavior when a fetched page carries no entries
#[derive(Debug, Clone, Copy)]
pub enum EmptyPagePolicy {
    /// An empty page marks the end of the stream (catalog endpoints)
    EndOfStream,
    /// Results may simply not have been published yet: sleep for `wait`,
    /// charge it against `budget`, and re-issue the *same* page request
    WaitAndRetry { wait: Duration, budget: Duration },
}

/// One pagination run against a single endpoint
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub base_url: String,
    pub params: Vec<(String, String)>,
    pub style: PageStyle,
    pub limit: FetchLimit,
    pub empty_page: EmptyPagePolicy,
}

struct Page {
    entries: Vec<Value>,
    next: Option<String>,
}

/// Paginator drives the QueryClient across cursor-linked pages
///
/// The produced sequence is finite, ordered by fetch and
/// non-restartable; callers receive all accumulated entries at once.
/// Sleeps are tokio timers, so an enclosing timeout or task cancellation
/// interrupts every suspension point.
pub struct Paginator<'a, Q: QueryClient> {
    client: &'a Q,
}

impl<'a, Q: QueryClient> Paginator<'a, Q> {
    pub fn new(client: &'a Q) -> Self {
        Self { client }
    }

    /// Collects entries until the cursor is exhausted, the fetch limit is
    /// reached, or the wait budget runs out
    ///
    /// Budget exhaustion with nothing ever collected is a `PollTimeout`;
    /// exhaustion after partial collection returns the partial data as
    /// success. The asymmetry is deliberate: late pages are tolerable,
    /// a silent total absence of results is not.
    pub async fn collect(&self, query: &PageQuery) -> Result<Vec<Value>, VerdictError> {
        let (wait, mut remaining_budget) = match query.empty_page {
            EmptyPagePolicy::WaitAndRetry { wait, budget } => (wait, Some(budget)),
            EmptyPagePolicy::EndOfStream => (Duration::ZERO, None),
        };

        let mut entries: Vec<Value> = Vec::new();
        let mut pages_fetched = 0usize;
        let mut page_index = 0usize;
        let mut current_url = query.base_url.clone();

        loop {
            let within_limit = match query.limit {
                FetchLimit::Pages(pages) => pages_fetched < pages,
                FetchLimit::Records(records) => entries.len() < records,
            };
            if !within_limit {
                debug!(url = %query.base_url, fetched = pages_fetched, "fetch limit reached");
                break;
            }

            if let Some(budget) = remaining_budget {
                if budget.is_zero() {
                    if entries.is_empty() {
                        return Err(VerdictError::PollTimeout {
                            url: query.base_url.clone(),
                            params: VerdictError::describe_params(&query.params),
                        });
                    }
                    debug!(url = %query.base_url, "wait budget exhausted, returning partial data");
                    break;
                }
            }

            let page = self.fetch_page(&current_url, query, page_index).await?;

            if page.entries.is_empty() {
                match query.empty_page {
                    EmptyPagePolicy::EndOfStream => break,
                    EmptyPagePolicy::WaitAndRetry { .. } => {
                        info!(
                            url = %query.base_url,
                            "results have not been published yet, sleeping before re-issuing the same page"
                        );
                        let budget = remaining_budget
                            .as_mut()
                            .expect("WaitAndRetry always carries a budget");
                        let step = wait.min(*budget);
                        if step.is_zero() {
                            // a zero wait cannot make progress against the budget
                            *budget = Duration::ZERO;
                            continue;
                        }
                        tokio::time::sleep(step).await;
                        *budget -= step;
                        continue;
                    }
                }
            }

            entries.extend(page.entries);
            pages_fetched += 1;
            page_index += 1;

            match page.next {
                None => break,
                Some(next_url) => {
                    if query.style == PageStyle::Linked {
                        current_url = next_url;
                    }
                }
            }
        }

        Ok(entries)
    }

    async fn fetch_page(
        &self,
        url: &str,
        query: &PageQuery,
        page_index: usize,
    ) -> Result<Page, VerdictError> {
        let body = match query.style {
            PageStyle::Indexed => {
                let mut params = query.params.clone();
                params.push(("page".to_string(), page_index.to_string()));
                self.client.query(url, &params).await?
            }
            PageStyle::Linked => self.client.query(url, &query.params).await?,
        };
        parse_page(url, &body, query.style)
    }
}

fn parse_page(url: &str, body: &Value, style: PageStyle) -> Result<Page, VerdictError> {
    let entries_field = style.entries_field();
    let entries = body
        .get(entries_field)
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| VerdictError::MalformedRecord {
            url: url.to_string(),
            details: format!("response body is missing the '{}' list", entries_field),
        })?;

    let next = match body.get("next") {
        None | Some(Value::Null) => None,
        Some(Value::String(next_url)) => Some(next_url.clone()),
        // an indexed endpoint may signal continuation with a page number
        Some(other) => Some(other.to_string()),
    };

    Ok(Page { entries, next })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves queued responses per URL; repeats the last queued response
    /// once the queue drains. Records every call it sees.
    struct ScriptedClient {
        routes: Mutex<HashMap<String, Vec<Value>>>,
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl ScriptedClient {
        fn new() -> Self {
            Self {
                routes: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_responses(self, url: &str, responses: Vec<Value>) -> Self {
            self.routes
                .lock()
                .unwrap()
                .insert(url.to_string(), responses);
            self
        }

        fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QueryClient for ScriptedClient {
        async fn query(
            &self,
            url: &str,
            params: &[(String, String)],
        ) -> Result<Value, VerdictError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), params.to_vec()));
            let mut routes = self.routes.lock().unwrap();
            let responses = routes.get_mut(url).ok_or_else(|| VerdictError::QueryFailed {
                url: url.to_string(),
                params: VerdictError::describe_params(params),
                source: Box::new(VerdictError::HttpStatus {
                    url: url.to_string(),
                    status: 404,
                }),
            })?;
            let response = if responses.len() > 1 {
                responses.remove(0)
            } else {
                responses[0].clone()
            };
            Ok(response)
        }
    }

    fn indexed_query(url: &str, limit: FetchLimit, empty_page: EmptyPagePolicy) -> PageQuery {
        PageQuery {
            base_url: url.to_string(),
            params: vec![("item".to_string(), "bash-4.4.19-8.el8".to_string())],
            style: PageStyle::Indexed,
            limit,
            empty_page,
        }
    }

    const URL: &str = "https://resultsdb.example.com/api/v2.0/results";

    #[tokio::test]
    async fn test_pagination_terminates_and_preserves_fetch_order() {
        let client = ScriptedClient::new().with_responses(
            URL,
            vec![
                json!({"data": [{"id": 1}, {"id": 2}], "next": "?page=1"}),
                json!({"data": [{"id": 3}], "next": null}),
            ],
        );
        let paginator = Paginator::new(&client);

        let entries = paginator
            .collect(&indexed_query(
                URL,
                FetchLimit::Pages(100),
                EmptyPagePolicy::EndOfStream,
            ))
            .await
            .unwrap();

        let ids: Vec<i64> = entries.iter().map(|e| e["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // the page index advanced with each non-empty page
        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].1.contains(&("page".to_string(), "0".to_string())));
        assert!(calls[1].1.contains(&("page".to_string(), "1".to_string())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_page_retry_consumes_exactly_one_wait() {
        let client = ScriptedClient::new().with_responses(
            URL,
            vec![
                json!({"data": [], "next": null}),
                json!({"data": [{"id": 9}], "next": null}),
            ],
        );
        let paginator = Paginator::new(&client);
        let started = tokio::time::Instant::now();

        let entries = paginator
            .collect(&indexed_query(
                URL,
                FetchLimit::Pages(100),
                EmptyPagePolicy::WaitAndRetry {
                    wait: Duration::from_secs(60),
                    budget: Duration::from_secs(7200),
                },
            ))
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(started.elapsed(), Duration::from_secs(60));

        // the empty page was re-issued with an unchanged page index
        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].1.contains(&("page".to_string(), "0".to_string())));
        assert!(calls[1].1.contains(&("page".to_string(), "0".to_string())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_exhaustion_without_data_is_poll_timeout() {
        let client = ScriptedClient::new()
            .with_responses(URL, vec![json!({"data": [], "next": null})]);
        let paginator = Paginator::new(&client);

        let error = paginator
            .collect(&indexed_query(
                URL,
                FetchLimit::Pages(100),
                EmptyPagePolicy::WaitAndRetry {
                    wait: Duration::from_secs(60),
                    budget: Duration::from_secs(120),
                },
            ))
            .await
            .unwrap_err();

        match error {
            VerdictError::PollTimeout { url, params } => {
                assert_eq!(url, URL);
                assert!(params.contains("item=bash-4.4.19-8.el8"));
            }
            other => panic!("expected PollTimeout, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_exhaustion_after_partial_data_returns_partial() {
        let client = ScriptedClient::new().with_responses(
            URL,
            vec![
                json!({"data": [{"id": 1}], "next": 1}),
                json!({"data": [], "next": null}),
            ],
        );
        let paginator = Paginator::new(&client);

        let entries = paginator
            .collect(&indexed_query(
                URL,
                FetchLimit::Pages(100),
                EmptyPagePolicy::WaitAndRetry {
                    wait: Duration::from_secs(60),
                    budget: Duration::from_secs(120),
                },
            ))
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_page_limit_stops_the_run() {
        let client = ScriptedClient::new()
            .with_responses(URL, vec![json!({"data": [{"id": 1}], "next": 1})]);
        let paginator = Paginator::new(&client);

        let entries = paginator
            .collect(&indexed_query(
                URL,
                FetchLimit::Pages(3),
                EmptyPagePolicy::EndOfStream,
            ))
            .await
            .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(client.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_record_limit_caps_linked_pagination() {
        let catalog = "https://pdc.example.com/rest_api/v1/rpms/?";
        let second = "https://pdc.example.com/rest_api/v1/rpms/?page=2";
        let client = ScriptedClient::new()
            .with_responses(
                catalog,
                vec![json!({"results": [{"id": 1}, {"id": 2}, {"id": 3}], "next": second})],
            )
            .with_responses(
                second,
                vec![json!({"results": [{"id": 4}, {"id": 5}, {"id": 6}], "next": null})],
            );
        let paginator = Paginator::new(&client);

        let entries = paginator
            .collect(&PageQuery {
                base_url: catalog.to_string(),
                params: vec![("name".to_string(), "^bash$".to_string())],
                style: PageStyle::Linked,
                limit: FetchLimit::Records(5),
                empty_page: EmptyPagePolicy::EndOfStream,
            })
            .await
            .unwrap();

        // the cap is checked before each fetch, so the last page overshoots
        assert_eq!(entries.len(), 6);
        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0, second);
    }

    #[tokio::test]
    async fn test_linked_pagination_does_not_merge_page_param() {
        let catalog = "https://pdc.example.com/rest_api/v1/global-components/?";
        let client = ScriptedClient::new()
            .with_responses(catalog, vec![json!({"results": [], "next": null})]);
        let paginator = Paginator::new(&client);

        let entries = paginator
            .collect(&PageQuery {
                base_url: catalog.to_string(),
                params: vec![("name".to_string(), "bash".to_string())],
                style: PageStyle::Linked,
                limit: FetchLimit::Records(200),
                empty_page: EmptyPagePolicy::EndOfStream,
            })
            .await
            .unwrap();

        assert!(entries.is_empty());
        let calls = client.calls();
        assert_eq!(
            calls[0].1,
            vec![("name".to_string(), "bash".to_string())]
        );
    }

    #[tokio::test]
    async fn test_missing_entries_field_is_malformed() {
        let client =
            ScriptedClient::new().with_responses(URL, vec![json!({"unexpected": true})]);
        let paginator = Paginator::new(&client);

        let error = paginator
            .collect(&indexed_query(
                URL,
                FetchLimit::Pages(10),
                EmptyPagePolicy::EndOfStream,
            ))
            .await
            .unwrap_err();

        match error {
            VerdictError::MalformedRecord { details, .. } => {
                assert!(details.contains("'data'"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_query_errors_propagate() {
        let client = ScriptedClient::new();
        let paginator = Paginator::new(&client);

        let error = paginator
            .collect(&indexed_query(
                "https://resultsdb.example.com/api/v2.0/unroutable",
                FetchLimit::Pages(10),
                EmptyPagePolicy::EndOfStream,
            ))
            .await
            .unwrap_err();

        assert!(matches!(error, VerdictError::QueryFailed { .. }));
    }
}

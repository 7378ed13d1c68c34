use async_trait::async_trait;
use nvr_verdict::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One query observed by the mock, in call order
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub params: Vec<(String, String)>,
}

/// Mock QueryClient serving scripted JSON pages
///
/// Routes are keyed by URL; queries carrying a `job_name` parameter are
/// keyed by `url#job_name` so per-job page sequences can be scripted
/// against the single results-store endpoint. Queued pages are served in
/// order and the last one repeats, which mirrors an endpoint that keeps
/// answering the same final page.
#[derive(Clone)]
pub struct MockQueryClient {
    routes: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    fallback: Option<Value>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockQueryClient {
    pub fn new() -> Self {
        Self {
            routes: Arc::new(Mutex::new(HashMap::new())),
            fallback: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serves `response` for any route without scripted pages
    pub fn with_fallback(mut self, response: Value) -> Self {
        self.fallback = Some(response);
        self
    }

    /// Scripts a page sequence for a URL
    pub fn with_pages(self, url: &str, pages: Vec<Value>) -> Self {
        self.routes.lock().unwrap().insert(url.to_string(), pages);
        self
    }

    /// Scripts a single response for a URL
    pub fn with_response(self, url: &str, response: Value) -> Self {
        self.with_pages(url, vec![response])
    }

    /// Scripts a page sequence for one job name on a results endpoint
    pub fn with_job_pages(self, url: &str, job_name: &str, pages: Vec<Value>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(format!("{}#{}", url, job_name), pages);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn route_key(url: &str, params: &[(String, String)]) -> String {
        match params.iter().find(|(name, _)| name == "job_name") {
            Some((_, job_name)) => format!("{}#{}", url, job_name),
            None => url.to_string(),
        }
    }
}

impl Default for MockQueryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryClient for MockQueryClient {
    async fn query(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> std::result::Result<Value, VerdictError> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            params: params.to_vec(),
        });

        let key = Self::route_key(url, params);
        let mut routes = self.routes.lock().unwrap();
        if let Some(pages) = routes.get_mut(&key) {
            if !pages.is_empty() {
                let page = if pages.len() > 1 {
                    pages.remove(0)
                } else {
                    pages[0].clone()
                };
                return Ok(page);
            }
        }

        if let Some(fallback) = &self.fallback {
            return Ok(fallback.clone());
        }

        Err(VerdictError::QueryFailed {
            url: url.to_string(),
            params: VerdictError::describe_params(params),
            source: Box::new(VerdictError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        })
    }
}

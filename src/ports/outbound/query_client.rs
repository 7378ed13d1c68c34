use crate::shared::error::VerdictError;
use async_trait::async_trait;
use serde_json::Value;

/// QueryClient port for parameterized GET queries against JSON REST APIs
///
/// This port abstracts the HTTP transport used by the paginator and the
/// aggregation engines, so both can be driven by scripted responses in
/// tests.
///
/// # Async Support
/// All methods are async; implementations must be `Send + Sync`.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Issues a single GET request and returns the parsed JSON body
    ///
    /// # Arguments
    /// * `url` - The endpoint URL to query
    /// * `params` - Query-string parameters merged into the request
    ///
    /// # Errors
    /// Returns `VerdictError::QueryFailed` once the implementation's
    /// bounded retry policy is exhausted; the error carries the URL and
    /// the parameters of the failing query.
    async fn query(&self, url: &str, params: &[(String, String)])
        -> Result<Value, VerdictError>;
}

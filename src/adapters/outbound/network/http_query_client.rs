use crate::ports::outbound::QueryClient;
use crate::shared::error::VerdictError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::Certificate;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{error, warn};

/// Number of additional attempts after the first failed query
const MAX_RETRIES: u32 = 3;

/// Delay before each retried query
const RETRY_DELAY: Duration = Duration::from_secs(60);

/// Timeout for a single GET request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HttpQueryClient adapter for querying JSON REST APIs over TLS
///
/// Implements the QueryClient port with reqwest. Certificate
/// verification is mandatory: the client trusts exactly the CA bundle it
/// was built with. Failed attempts are retried a bounded number of
/// times; a body obtained on a late attempt is returned to the original
/// caller like any first-attempt success.
#[derive(Debug)]
pub struct HttpQueryClient {
    client: reqwest::Client,
    retry_delay: Duration,
}

impl HttpQueryClient {
    /// Creates a client that verifies server certificates against the
    /// PEM bundle at `ca_bundle`
    pub fn new(ca_bundle: &Path) -> Result<Self> {
        let pem = fs::read(ca_bundle).map_err(|e| VerdictError::CaBundle {
            path: ca_bundle.to_path_buf(),
            details: e.to_string(),
        })?;
        let certificates =
            Certificate::from_pem_bundle(&pem).map_err(|e| VerdictError::CaBundle {
                path: ca_bundle.to_path_buf(),
                details: e.to_string(),
            })?;

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("nvr-verdict/{}", version);
        let mut builder = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent);
        for certificate in certificates {
            builder = builder.add_root_certificate(certificate);
        }

        Ok(Self {
            client: builder.build()?,
            retry_delay: RETRY_DELAY,
        })
    }

    /// Overrides the delay between retried queries
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    #[cfg(test)]
    fn without_ca_bundle() -> Self {
        Self {
            client: reqwest::Client::new(),
            retry_delay: Duration::ZERO,
        }
    }

    /// Issues one GET and classifies the response
    async fn fetch(&self, url: &str, params: &[(String, String)]) -> std::result::Result<Value, VerdictError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| VerdictError::Transport {
                url: url.to_string(),
                details: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status >= 300 {
            return Err(VerdictError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| VerdictError::MalformedRecord {
                url: url.to_string(),
                details: e.to_string(),
            })
    }
}

#[async_trait]
impl QueryClient for HttpQueryClient {
    async fn query(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> std::result::Result<Value, VerdictError> {
        let mut last_error = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                warn!(
                    url,
                    attempt, "an exception occurred while querying, trying again after delay"
                );
                tokio::time::sleep(self.retry_delay).await;
            }
            match self.fetch(url, params).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    warn!(url, params = %VerdictError::describe_params(params), %e, "query attempt failed");
                    last_error = Some(e);
                }
            }
        }

        let params_description = VerdictError::describe_params(params);
        error!(url, params = %params_description, "unable to access url with given options");
        Err(VerdictError::QueryFailed {
            url: url.to_string(),
            params: params_description,
            source: Box::new(last_error.expect("at least one attempt always runs")),
        })
    }
}

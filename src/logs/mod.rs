//! Raw CI log retrieval.
//!
//! Not part of the conversation flow; reachable through `ci-triage fetch-logs`.

use tracing::debug;

use crate::error::{Result, TriageError};
use crate::provider::http::shared_client;

/// Prow job page prefix rewritten by [`convert_to_raw_logs_url`].
pub const PROW_JOB_PREFIX: &str = "https://prow.ci.openshift.org/job/";
/// Artifact storage prefix substituted for [`PROW_JOB_PREFIX`].
pub const LOG_STORE_PREFIX: &str = "https://storage.googleapis.com/ci-op-logs/";
/// Path appended to reach the raw build log.
pub const RAW_LOG_SUFFIX: &str = "/artifacts/latest/logs.txt";

/// Map a job URL to its raw log URL.
///
/// Pure string substitution; the result is not checked against the real
/// artifact layout of the CI system.
pub fn convert_to_raw_logs_url(job_url: &str) -> String {
    let mut url = job_url.replace(PROW_JOB_PREFIX, LOG_STORE_PREFIX);
    url.push_str(RAW_LOG_SUFFIX);
    url
}

/// Fetches raw CI logs over HTTP.
#[derive(Debug, Clone)]
pub struct LogFetcher {
    client: reqwest::Client,
}

impl Default for LogFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFetcher {
    pub fn new() -> Self {
        Self {
            client: shared_client().clone(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch the raw log for `job_url`.
    pub async fn fetch(&self, job_url: &str) -> Result<String> {
        let url = convert_to_raw_logs_url(job_url);
        debug!(job_url, url = %url, "fetching CI logs");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(TriageError::Network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TriageError::Http {
                status: status.as_u16(),
                url,
            });
        }

        resp.text().await.map_err(TriageError::Network)
    }
}

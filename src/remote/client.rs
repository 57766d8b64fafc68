use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::error::{MigrateError, Result};
use super::{ExecOutcome, SqlBackend};

pub const DEFAULT_RPC_FUNCTION: &str = "exec";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Everything needed to talk to one hosted project.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub project_url: Url,
    pub service_key: String,
    /// Name of the RPC function that executes raw SQL
    pub rpc_function: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(project_url: &str, service_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            project_url: normalize_project_url(project_url)?,
            service_key: service_key.into(),
            rpc_function: DEFAULT_RPC_FUNCTION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_rpc_function(mut self, rpc_function: impl Into<String>) -> Self {
        self.rpc_function = rpc_function.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn rpc_url(&self, function: &str) -> Result<Url> {
        Ok(self.project_url.join(&format!("rest/v1/rpc/{}", function))?)
    }

    pub fn table_url(&self, table: &str) -> Result<Url> {
        let mut url = self.project_url.join(&format!("rest/v1/{}", table))?;
        url.query_pairs_mut()
            .append_pair("select", "count")
            .append_pair("limit", "1");
        Ok(url)
    }
}

/// Parse the project URL and make sure it ends in `/` so joins append.
fn normalize_project_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(MigrateError::InvalidProjectUrl(format!(
            "unsupported scheme '{}' in {}", url.scheme(), raw
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[derive(Serialize)]
struct ExecSqlPayload<'a> {
    sql: &'a str,
}

/// HTTP client for the hosted project's REST/RPC surface.
///
/// Constructed explicitly and handed to the commands that need it.
#[derive(Clone)]
pub struct RestClient {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl RestClient {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_key))
            .map_err(|_| MigrateError::Configuration("service key contains invalid characters".to_string()))?;
        let apikey = HeaderValue::from_str(&config.service_key)
            .map_err(|_| MigrateError::Configuration("service key contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("apikey", apikey);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|source| MigrateError::Http {
                url: config.project_url.to_string(),
                source,
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &Url) -> Result<ExecOutcome> {
        let response = request.send().await.map_err(|source| MigrateError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        trace!(url = %url, status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok(ExecOutcome::Success);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => format!("<failed to read response body: {}>", e),
        };
        debug!(url = %url, status = status.as_u16(), body = %body, "request rejected");

        Ok(ExecOutcome::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

impl SqlBackend for RestClient {
    async fn exec_sql(&self, sql: &str) -> Result<ExecOutcome> {
        let url = self.config.rpc_url(&self.config.rpc_function)?;
        let request = self.client.post(url.clone()).json(&ExecSqlPayload { sql });
        self.send(request, &url).await
    }

    async fn probe_table(&self, table: &str) -> Result<ExecOutcome> {
        let url = self.config.table_url(table)?;
        let request = self.client.get(url.clone());
        self.send(request, &url).await
    }

    async fn call_function(&self, name: &str) -> Result<ExecOutcome> {
        let url = self.config.rpc_url(name)?;
        let request = self.client.post(url.clone()).json(&serde_json::json!({}));
        self.send(request, &url).await
    }
}

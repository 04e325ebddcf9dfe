//! HTTP implementation of [`SearchBackend`] over reqwest

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::SearchBackend;
use super::errors::{BackendError, BackendResult};
use super::types::{
    HEALTH_PATH, HealthStatus, INTEGRATE_PATH, INTEGRATE_TREE_PATH, IntegrateRequest,
    IntegrationResponse, SEARCH_PATH, SUMMARIZE_PATH, SearchRequest, SearchResponse,
    SummarizeRequest, SummarizeResponse, TreeIntegrationRequest,
};
use crate::config::ExplorerConfig;
use crate::tree::SearchPayload;

/// Backend client talking JSON over HTTP
///
/// Cheap to clone: the reqwest `Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Build a client for the backend described by `config`
    ///
    /// # Errors
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be built.
    pub fn new(config: &ExplorerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build HTTP client")?;
        Self::with_client(client, config.backend_url())
    }

    /// Use an existing client against `base_url`
    ///
    /// # Errors
    ///
    /// Fails if `base_url` is not a valid URL.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("Invalid backend URL '{base_url}'"))?;
        // Endpoint paths are joined relative to the base, which needs a trailing slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> BackendResult<Url> {
        self.base_url.join(path).map_err(|e| BackendError::Transport {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> BackendResult<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                warn!(endpoint = path, error = %e, "Backend request failed");
                BackendError::from_reqwest(path, &e)
            })?;

        response
            .json::<Resp>()
            .await
            .map_err(|e| BackendError::Decode {
                endpoint: path.to_string(),
                message: e.to_string(),
            })
    }
}

impl SearchBackend for HttpBackend {
    async fn search(&self, request: SearchRequest) -> BackendResult<SearchPayload> {
        self.post_json::<_, SearchResponse>(SEARCH_PATH, &request)
            .await?
            .into_payload()
    }

    async fn summarize(&self, request: SummarizeRequest) -> BackendResult<String> {
        self.post_json::<_, SummarizeResponse>(SUMMARIZE_PATH, &request)
            .await?
            .into_summary()
    }

    async fn integrate(&self, request: IntegrateRequest) -> BackendResult<String> {
        self.post_json::<_, IntegrationResponse>(INTEGRATE_PATH, &request)
            .await?
            .into_text()
    }

    async fn integrate_tree(&self, request: TreeIntegrationRequest) -> BackendResult<String> {
        self.post_json::<_, IntegrationResponse>(INTEGRATE_TREE_PATH, &request)
            .await?
            .into_text()
    }

    async fn health(&self) -> BackendResult<HealthStatus> {
        let url = self.endpoint(HEALTH_PATH)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| BackendError::from_reqwest(HEALTH_PATH, &e))?;

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| BackendError::Decode {
                endpoint: HEALTH_PATH.to_string(),
                message: e.to_string(),
            })
    }
}

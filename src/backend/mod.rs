//! Client side of the search backend
//!
//! The backend runs the actual web/forum search, generates follow-up
//! keywords, and summarizes or merges content. The session only talks to it
//! through [`SearchBackend`], so tests can swap in a scripted double.

mod errors;
mod http;
mod types;

pub use errors::{BackendError, BackendResult};
pub use http::HttpBackend;
pub use types::{
    HEALTH_PATH, HealthStatus, INTEGRATE_PATH, INTEGRATE_TREE_PATH, IntegrateRequest,
    IntegrationContent, IntegrationResponse, SEARCH_PATH, SUMMARIZE_PATH, SearchRequest,
    SearchResponse, SummarizeRequest, SummarizeResponse, TreeIntegrationNode,
    TreeIntegrationRequest,
};

use std::future::Future;

use crate::tree::SearchPayload;

/// Operations the session needs from the backend
///
/// Application-level failures (`success: false`) come back as
/// [`BackendError::Rejected`] carrying the backend's message.
pub trait SearchBackend: Send + Sync {
    /// Search a keyword and generate follow-up keywords
    fn search(
        &self,
        request: SearchRequest,
    ) -> impl Future<Output = BackendResult<SearchPayload>> + Send;

    /// Summarize one piece of content
    fn summarize(
        &self,
        request: SummarizeRequest,
    ) -> impl Future<Output = BackendResult<String>> + Send;

    /// Merge collected items into one text
    fn integrate(
        &self,
        request: IntegrateRequest,
    ) -> impl Future<Output = BackendResult<String>> + Send;

    /// Merge the results of a whole tree into one text
    fn integrate_tree(
        &self,
        request: TreeIntegrationRequest,
    ) -> impl Future<Output = BackendResult<String>> + Send;

    /// Liveness probe
    fn health(&self) -> impl Future<Output = BackendResult<HealthStatus>> + Send;
}

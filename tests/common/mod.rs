//! Test utilities and helper functions for the searchtree test suite

use kodegen_tools_searchtree::backend::{
    BackendError, BackendResult, HealthStatus, IntegrateRequest, SearchBackend, SearchRequest,
    SummarizeRequest, TreeIntegrationRequest,
};
use kodegen_tools_searchtree::{
    ExplorerConfig, SearchNode, SearchPayload, SearchResult, SearchSession, SearchSource,
};
use mockito::{Mock, Server};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Config pointing at a backend that is never contacted
#[allow(dead_code)]
pub fn test_config() -> ExplorerConfig {
    ExplorerConfig::builder()
        .backend_url("http://localhost:8000")
        .build()
        .unwrap()
}

/// Build a payload from `(title, snippet, url)` triples and follow-up keywords
#[allow(dead_code)]
pub fn payload(results: &[(&str, &str, &str)], keywords: &[&str]) -> SearchPayload {
    SearchPayload::new(
        results
            .iter()
            .map(|(title, snippet, url)| SearchResult::new(*title, *snippet, *url))
            .collect(),
        keywords.iter().map(|k| (*k).to_string()).collect(),
    )
}

/// A ready node with one result named after its keyword
#[allow(dead_code)]
pub fn leaf(keyword: &str) -> SearchNode {
    SearchNode::new(
        keyword,
        SearchSource::Baidu,
        payload(
            &[(keyword, "snippet", "https://example.com")],
            &[&format!("{keyword} more")],
        ),
    )
}

/// Transport-level failure as the HTTP client would report it
#[allow(dead_code)]
pub fn network_error() -> BackendError {
    BackendError::Transport {
        endpoint: "search".to_string(),
        message: "connection refused".to_string(),
    }
}

/// Application-level failure with a backend message
#[allow(dead_code)]
pub fn rejected(message: &str) -> BackendError {
    BackendError::Rejected {
        message: message.to_string(),
    }
}

struct Step {
    result: BackendResult<SearchPayload>,
    gate: Option<oneshot::Receiver<()>>,
}

/// In-process backend replaying scripted replies, keyed by keyword
///
/// Unscripted searches fail with a transport error. Every request is logged.
#[derive(Default)]
pub struct ScriptedBackend {
    searches: Mutex<HashMap<String, VecDeque<Step>>>,
    text_replies: Mutex<VecDeque<BackendResult<String>>>,
    search_log: Mutex<Vec<SearchRequest>>,
    summarize_log: Mutex<Vec<SummarizeRequest>>,
    integrate_log: Mutex<Vec<IntegrateRequest>>,
    tree_log: Mutex<Vec<TreeIntegrationRequest>>,
}

#[allow(dead_code)]
impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue the reply for the next search of `keyword`
    pub fn on_search(&self, keyword: &str, result: BackendResult<SearchPayload>) {
        self.push_step(keyword, Step { result, gate: None });
    }

    /// Queue a reply that is held back until the returned sender fires
    pub fn on_search_gated(
        &self,
        keyword: &str,
        result: BackendResult<SearchPayload>,
    ) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.push_step(
            keyword,
            Step {
                result,
                gate: Some(gate),
            },
        );
        release
    }

    /// Queue the reply for the next summarize/integrate call
    pub fn on_text(&self, result: BackendResult<String>) {
        self.text_replies.lock().unwrap().push_back(result);
    }

    pub fn searches(&self) -> Vec<SearchRequest> {
        self.search_log.lock().unwrap().clone()
    }

    pub fn summaries(&self) -> Vec<SummarizeRequest> {
        self.summarize_log.lock().unwrap().clone()
    }

    pub fn integrations(&self) -> Vec<IntegrateRequest> {
        self.integrate_log.lock().unwrap().clone()
    }

    pub fn tree_integrations(&self) -> Vec<TreeIntegrationRequest> {
        self.tree_log.lock().unwrap().clone()
    }

    fn push_step(&self, keyword: &str, step: Step) {
        self.searches
            .lock()
            .unwrap()
            .entry(keyword.to_string())
            .or_default()
            .push_back(step);
    }

    fn next_text(&self) -> BackendResult<String> {
        let reply = self.text_replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Err(rejected("no scripted reply")))
    }
}

impl SearchBackend for ScriptedBackend {
    async fn search(&self, request: SearchRequest) -> BackendResult<SearchPayload> {
        self.search_log.lock().unwrap().push(request.clone());
        let step = self
            .searches
            .lock()
            .unwrap()
            .get_mut(&request.keyword)
            .and_then(VecDeque::pop_front);

        let Some(step) = step else {
            return Err(BackendError::Transport {
                endpoint: "search".to_string(),
                message: format!("no scripted reply for '{}'", request.keyword),
            });
        };
        if let Some(gate) = step.gate {
            let _ = gate.await;
        }
        step.result
    }

    async fn summarize(&self, request: SummarizeRequest) -> BackendResult<String> {
        self.summarize_log.lock().unwrap().push(request);
        self.next_text()
    }

    async fn integrate(&self, request: IntegrateRequest) -> BackendResult<String> {
        self.integrate_log.lock().unwrap().push(request);
        self.next_text()
    }

    async fn integrate_tree(&self, request: TreeIntegrationRequest) -> BackendResult<String> {
        self.tree_log.lock().unwrap().push(request);
        self.next_text()
    }

    async fn health(&self) -> BackendResult<HealthStatus> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            message: "scripted".to_string(),
        })
    }
}

/// Session over a shared scripted backend
#[allow(dead_code)]
pub fn scripted_session() -> (SearchSession<ScriptedBackend>, Arc<ScriptedBackend>) {
    let backend = ScriptedBackend::new();
    let session = SearchSession::with_shared_backend(Arc::clone(&backend), test_config());
    (session, backend)
}

/// Creates a mock endpoint that answers a POST with a JSON body
#[allow(dead_code)]
pub async fn create_json_mock(server: &mut Server, path: &str, body: &str) -> Mock {
    server
        .mock("POST", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

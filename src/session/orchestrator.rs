//! Session orchestrator: turns user actions into backend calls and tree edits
//!
//! # Request discipline
//! - At most one refresh/expand per node at a time. A second request against a
//!   busy node is rejected with [`SessionError::NodeBusy`].
//! - Requests against different nodes run concurrently; each completion
//!   re-reads the latest forest before editing it.
//! - The busy status is cleared on success and on failure.
//! - A failed initial search leaves no node behind; a failed refresh keeps
//!   the node's previous results.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};

use super::errors::{SessionError, SessionResult};
use super::state::SessionState;
use crate::backend::{
    BackendError, HealthStatus, IntegrateRequest, IntegrationContent, SearchBackend,
    SearchRequest, SummarizeRequest, TreeIntegrationNode, TreeIntegrationRequest,
};
use crate::collection::{CollectedItem, CollectionId, CollectionLedger};
use crate::config::ExplorerConfig;
use crate::events::{SessionAction, SessionEvent, SessionEventBus};
use crate::tree::{Forest, Level, NodeId, NodeStatus, SearchNode, SearchSource, project};
use crate::utils::MAX_KEYWORD_LENGTH;

/// One user's exploration session over a search backend
pub struct SearchSession<B> {
    backend: Arc<B>,
    config: Arc<ExplorerConfig>,
    state: Arc<Mutex<SessionState>>,
    events: SessionEventBus,
}

impl<B> Clone for SearchSession<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
            events: self.events.clone(),
        }
    }
}

impl<B: SearchBackend> SearchSession<B> {
    #[must_use]
    pub fn new(backend: B, config: ExplorerConfig) -> Self {
        Self::with_shared_backend(Arc::new(backend), config)
    }

    #[must_use]
    pub fn with_shared_backend(backend: Arc<B>, config: ExplorerConfig) -> Self {
        let events = SessionEventBus::new(config.event_capacity());
        Self {
            backend,
            config: Arc::new(config),
            state: Arc::new(Mutex::new(SessionState::default())),
            events,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Run `f` against the state under the session lock
    ///
    /// The only write path into the state. Keep `f` synchronous and short.
    pub async fn apply<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self.state.lock().await;
        f(&mut state)
    }

    // =========================================================================
    // Read-only snapshots
    // =========================================================================

    pub async fn forest(&self) -> Forest {
        self.apply(|state| state.forest.clone()).await
    }

    /// Tiers of the current forest, recomputed on every call
    pub async fn levels(&self) -> Vec<Level> {
        let forest = self.forest().await;
        project(&forest)
    }

    pub async fn ledger(&self) -> CollectionLedger {
        self.apply(|state| state.ledger.clone()).await
    }

    pub async fn node(&self, id: &NodeId) -> Option<Arc<SearchNode>> {
        self.apply(|state| state.forest.find(id).cloned()).await
    }

    // =========================================================================
    // Tree actions
    // =========================================================================

    /// Start a new root exploration using the configured default source
    pub async fn search(&self, keyword: &str) -> SessionResult<NodeId> {
        self.initial_search(keyword, self.config.default_source()).await
    }

    /// Start a new root exploration
    ///
    /// The node is only added once the backend answers successfully.
    pub async fn initial_search(
        &self,
        keyword: &str,
        source: SearchSource,
    ) -> SessionResult<NodeId> {
        let keyword = validate_keyword(keyword)?;
        let request = SearchRequest::new(
            keyword.clone(),
            self.config.initial_max_results(),
            self.config.initial_keyword_count(),
            source,
        );
        info!(keyword = %keyword, source = %source, "Starting initial search");

        let payload = match self.backend.search(request).await {
            Ok(payload) => payload,
            Err(source) => return Err(self.fail(SessionAction::InitialSearch, None, source)),
        };

        let node = SearchNode::new(keyword.clone(), source, payload);
        let node_id = node.id.clone();
        self.apply(|state| state.forest = state.forest.with_root(node))
            .await;

        info!(node_id = %node_id, keyword = %keyword, "Root added");
        self.events.publish(SessionEvent::RootAdded {
            node_id: node_id.clone(),
            keyword,
            timestamp: Utc::now(),
        });
        Ok(node_id)
    }

    /// Search `keyword` as a child exploration of `node_id`
    ///
    /// Returns the new child's id, or `None` when `node_id` is not (or no
    /// longer) in the forest.
    pub async fn expand(&self, node_id: &NodeId, keyword: &str) -> SessionResult<Option<NodeId>> {
        let keyword = validate_keyword(keyword)?;
        let Some(parent) = self
            .apply(|state| state.claim(node_id, NodeStatus::Expanding))
            .await?
        else {
            debug!(node_id = %node_id, "Expand target not in forest, ignoring");
            return Ok(None);
        };

        let source = parent.search_source;
        let request = SearchRequest::new(
            keyword.clone(),
            self.config.expand_max_results(),
            self.config.expand_keyword_count(),
            source,
        );
        info!(node_id = %node_id, keyword = %keyword, "Expanding node");

        match self.backend.search(request).await {
            Ok(payload) => {
                let child = SearchNode::new(keyword.clone(), source, payload);
                let child_id = child.id.clone();
                let appended = self
                    .apply(|state| {
                        state.release(node_id);
                        state.replace_node(node_id, |node| node.with_child(child).settled())
                    })
                    .await;

                if !appended {
                    debug!(node_id = %node_id, "Parent left the forest, child dropped");
                    return Ok(None);
                }

                self.events.publish(SessionEvent::ChildAppended {
                    parent_id: node_id.clone(),
                    node_id: child_id.clone(),
                    keyword,
                    timestamp: Utc::now(),
                });
                Ok(Some(child_id))
            }
            Err(source) => {
                self.settle(node_id).await;
                Err(self.fail(SessionAction::Expand, Some(node_id.clone()), source))
            }
        }
    }

    /// Re-run the search for `node_id` and replace its results in place
    ///
    /// Returns `false` when `node_id` is not in the forest. On failure the
    /// node keeps its previous results.
    pub async fn refresh(&self, node_id: &NodeId, keyword: &str) -> SessionResult<bool> {
        let keyword = validate_keyword(keyword)?;
        let Some(node) = self
            .apply(|state| state.claim(node_id, NodeStatus::Refreshing))
            .await?
        else {
            debug!(node_id = %node_id, "Refresh target not in forest, ignoring");
            return Ok(false);
        };

        self.events.publish(SessionEvent::RefreshStarted {
            node_id: node_id.clone(),
            timestamp: Utc::now(),
        });

        let request = SearchRequest::new(
            keyword.clone(),
            self.config.initial_max_results(),
            self.config.initial_keyword_count(),
            node.search_source,
        );
        info!(node_id = %node_id, keyword = %keyword, "Refreshing node");

        match self.backend.search(request).await {
            Ok(payload) => {
                let result_count = payload.results.len();
                let now = Utc::now();
                let found = self
                    .apply(|state| {
                        state.release(node_id);
                        state.replace_node(node_id, |node| node.refreshed(payload, now))
                    })
                    .await;

                if found {
                    self.events.publish(SessionEvent::RefreshCompleted {
                        node_id: node_id.clone(),
                        result_count,
                        timestamp: now,
                    });
                }
                Ok(found)
            }
            Err(source) => {
                self.settle(node_id).await;
                Err(self.fail(SessionAction::Refresh, Some(node_id.clone()), source))
            }
        }
    }

    /// Show or hide the full result list of a node
    ///
    /// Returns the new visibility, or `None` for an unknown node.
    pub async fn toggle_view(&self, node_id: &NodeId) -> Option<bool> {
        let expanded = self
            .apply(|state| {
                let mut expanded = None;
                state.replace_node(node_id, |node| {
                    let next = node.toggled();
                    expanded = Some(next.is_expanded);
                    next
                });
                expanded
            })
            .await?;

        self.events.publish(SessionEvent::ViewToggled {
            node_id: node_id.clone(),
            expanded,
            timestamp: Utc::now(),
        });
        Some(expanded)
    }

    /// Drop every root; returns how many were removed
    ///
    /// Requests still in flight complete as no-ops.
    pub async fn clear(&self) -> usize {
        let removed_roots = self
            .apply(|state| std::mem::take(&mut state.forest).len())
            .await;
        info!(removed_roots, "Forest cleared");
        self.events.publish(SessionEvent::ForestCleared {
            removed_roots,
            timestamp: Utc::now(),
        });
        removed_roots
    }

    // =========================================================================
    // Collection actions
    // =========================================================================

    /// Snapshot result `result_index` of `node_id` into the ledger
    ///
    /// Collecting an already-collected result is a no-op that still returns
    /// its id. `None` when the node or the result does not exist.
    pub async fn collect(&self, node_id: &NodeId, result_index: usize) -> Option<CollectionId> {
        let now = Utc::now();
        let (id, added) = self
            .apply(|state| collect_in(state, node_id, result_index, now))
            .await?;

        if added {
            self.events.publish(SessionEvent::ItemCollected {
                id: id.clone(),
                timestamp: now,
            });
        }
        Some(id)
    }

    /// Remove an item from the ledger; false if it was not there
    pub async fn uncollect(&self, id: &CollectionId) -> bool {
        let removed = self.apply(|state| uncollect_in(state, id)).await;
        if removed {
            self.events.publish(SessionEvent::ItemUncollected {
                id: id.clone(),
                timestamp: Utc::now(),
            });
        }
        removed
    }

    /// Collect the result if it is not collected yet, otherwise uncollect it
    ///
    /// Returns whether the result is collected afterwards, or `None` when it
    /// was not collected and its origin no longer exists.
    pub async fn toggle_collect(&self, node_id: &NodeId, result_index: usize) -> Option<bool> {
        let id = CollectionId::derive(node_id, result_index);
        let now = Utc::now();
        let collected = self
            .apply(|state| {
                if uncollect_in(state, &id) {
                    Some(false)
                } else {
                    collect_in(state, node_id, result_index, now).map(|_| true)
                }
            })
            .await?;

        let event = if collected {
            SessionEvent::ItemCollected { id, timestamp: now }
        } else {
            SessionEvent::ItemUncollected { id, timestamp: now }
        };
        self.events.publish(event);
        Some(collected)
    }

    // =========================================================================
    // Summaries and integration
    // =========================================================================

    /// Merge every collected item into one text about `main_keyword`
    pub async fn integrate_collections(&self, main_keyword: &str) -> SessionResult<String> {
        let main_keyword = validate_keyword(main_keyword)?;
        let contents = self
            .apply(|state| state.ledger.to_integration_contents())
            .await;
        if contents.is_empty() {
            return Err(SessionError::EmptyCollection);
        }

        info!(items = contents.len(), keyword = %main_keyword, "Integrating collected items");
        self.backend
            .integrate(IntegrateRequest {
                contents,
                keyword: main_keyword,
            })
            .await
            .map_err(|source| self.fail(SessionAction::IntegrateCollections, None, source))
    }

    /// Merge the results of every node, tier by tier, into one text
    pub async fn integrate_tree(&self, main_keyword: &str) -> SessionResult<String> {
        let main_keyword = validate_keyword(main_keyword)?;
        let levels = self.levels().await;
        if levels.is_empty() {
            return Err(SessionError::EmptyForest);
        }

        let nodes: Vec<TreeIntegrationNode> = levels
            .iter()
            .flat_map(|level| level.items.iter())
            .map(|item| TreeIntegrationNode {
                keyword: item.node.keyword.clone(),
                results: item
                    .node
                    .search_results
                    .iter()
                    .map(|result| IntegrationContent {
                        title: result.title.clone(),
                        content: result.snippet.clone(),
                    })
                    .collect(),
            })
            .collect();

        info!(nodes = nodes.len(), keyword = %main_keyword, "Integrating search tree");
        self.backend
            .integrate_tree(TreeIntegrationRequest {
                nodes,
                main_keyword,
            })
            .await
            .map_err(|source| self.fail(SessionAction::IntegrateTree, None, source))
    }

    /// Summarize a piece of result content for the detail view
    pub async fn summarize(&self, content: &str) -> SessionResult<String> {
        if content.trim().is_empty() {
            return Err(SessionError::EmptyContent);
        }
        self.backend
            .summarize(SummarizeRequest {
                content: content.to_string(),
                max_length: self.config.summary_max_length(),
            })
            .await
            .map_err(|source| self.fail(SessionAction::Summarize, None, source))
    }

    /// Probe the backend
    pub async fn health(&self) -> Result<HealthStatus, BackendError> {
        self.backend.health().await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Release the reservation on `node_id` and clear its busy status
    async fn settle(&self, node_id: &NodeId) {
        self.apply(|state| {
            state.release(node_id);
            state.replace_node(node_id, SearchNode::settled);
        })
        .await;
    }

    fn fail(
        &self,
        action: SessionAction,
        node_id: Option<NodeId>,
        source: BackendError,
    ) -> SessionError {
        let error = SessionError::Backend { action, source };
        warn!(action = ?action, error = %error, "Session action failed");
        self.events.publish(SessionEvent::ActionFailed {
            action,
            node_id,
            message: error.user_message(),
            timestamp: Utc::now(),
        });
        error
    }
}

fn collect_in(
    state: &mut SessionState,
    node_id: &NodeId,
    result_index: usize,
    now: chrono::DateTime<Utc>,
) -> Option<(CollectionId, bool)> {
    let item = CollectedItem::from_node(state.forest.find(node_id)?, result_index, now)?;
    let id = item.id.clone();
    let added = !state.ledger.contains(&id);
    state.ledger = std::mem::take(&mut state.ledger).collect(item);
    Some((id, added))
}

fn uncollect_in(state: &mut SessionState, id: &CollectionId) -> bool {
    if !state.ledger.contains(id) {
        return false;
    }
    state.ledger = std::mem::take(&mut state.ledger).uncollect(id);
    true
}

fn validate_keyword(keyword: &str) -> SessionResult<String> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Err(SessionError::InvalidKeyword(
            "keyword cannot be empty or whitespace-only".to_string(),
        ));
    }
    let length = trimmed.chars().count();
    if length > MAX_KEYWORD_LENGTH {
        return Err(SessionError::InvalidKeyword(format!(
            "keyword is too long ({length} characters, maximum {MAX_KEYWORD_LENGTH})"
        )));
    }
    Ok(trimmed.to_string())
}

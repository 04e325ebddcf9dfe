//! Event type definitions for the session event stream

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::CollectionId;
use crate::tree::NodeId;

/// Which user action an event or failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    InitialSearch,
    Expand,
    Refresh,
    IntegrateCollections,
    IntegrateTree,
    Summarize,
}

impl SessionAction {
    /// Label used in user notifications
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SessionAction::InitialSearch => "Search",
            SessionAction::Expand => "Expanding node",
            SessionAction::Refresh => "Refreshing search",
            SessionAction::IntegrateCollections => "Integrating collection",
            SessionAction::IntegrateTree => "Integrating tree",
            SessionAction::Summarize => "Summarizing",
        }
    }
}

/// Events emitted as the session state changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new root was added by an initial search
    RootAdded {
        node_id: NodeId,
        keyword: String,
        timestamp: DateTime<Utc>,
    },
    /// A child search completed and was appended under its parent
    ChildAppended {
        parent_id: NodeId,
        node_id: NodeId,
        keyword: String,
        timestamp: DateTime<Utc>,
    },
    /// A refresh request was issued; the node now shows as loading
    RefreshStarted {
        node_id: NodeId,
        timestamp: DateTime<Utc>,
    },
    /// A refresh replaced the node's results
    RefreshCompleted {
        node_id: NodeId,
        result_count: usize,
        timestamp: DateTime<Utc>,
    },
    /// An action failed; `message` is what the user is shown
    ActionFailed {
        action: SessionAction,
        node_id: Option<NodeId>,
        message: String,
        timestamp: DateTime<Utc>,
    },
    /// The result list of a node was shown or hidden
    ViewToggled {
        node_id: NodeId,
        expanded: bool,
        timestamp: DateTime<Utc>,
    },
    ItemCollected {
        id: CollectionId,
        timestamp: DateTime<Utc>,
    },
    ItemUncollected {
        id: CollectionId,
        timestamp: DateTime<Utc>,
    },
    /// Every root was dropped
    ForestCleared {
        removed_roots: usize,
        timestamp: DateTime<Utc>,
    },
}

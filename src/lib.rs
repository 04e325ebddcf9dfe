pub mod backend;
pub mod cli;
pub mod collection;
pub mod config;
pub mod events;
pub mod session;
pub mod tree;
pub mod utils;

pub use backend::{BackendError, HttpBackend, SearchBackend};
pub use collection::{CollectedItem, CollectionId, CollectionLedger};
pub use config::ExplorerConfig;
pub use events::{SessionAction, SessionEvent, SessionEventBus};
pub use session::{SearchSession, SessionError, SessionState};
pub use tree::{
    Forest, Level, LevelItem, NodeId, NodeStatus, SearchNode, SearchPayload, SearchResult,
    SearchSource, locate_and_replace, project,
};

/// Connect to the backend described by `config` and open an empty session
///
/// # Errors
///
/// Fails if the HTTP client cannot be built for the configured URL.
pub fn connect(config: ExplorerConfig) -> anyhow::Result<SearchSession<HttpBackend>> {
    let backend = HttpBackend::new(&config)?;
    Ok(SearchSession::new(backend, config))
}

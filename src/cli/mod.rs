//! Interactive line shell over a [`SearchSession`]
//!
//! Parsing and rendering live here so the binary stays a thin loop.

mod commands;
mod render;

pub use commands::{Command, KeywordArg, NodeRef};
pub use render::{HELP, render_ledger, render_levels};

use tokio::sync::broadcast::{self, error::RecvError};

use crate::backend::SearchBackend;
use crate::events::SessionEvent;
use crate::session::SearchSession;
use crate::tree::SearchSource;
use crate::utils::LEDGER_PREVIEW_LIMIT;

/// What the shell should do after a command ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text
    Output(String),
    /// Use this source for subsequent root searches
    SetSource(SearchSource),
    Quit,
}

/// Run one command against `session`
///
/// Failures are reported as output text; the shell keeps going.
pub async fn execute<B: SearchBackend>(
    session: &SearchSession<B>,
    source: SearchSource,
    command: Command,
) -> Outcome {
    let text = match command {
        Command::Search { keyword } => match session.initial_search(&keyword, source).await {
            Ok(_) => render_levels(&session.levels().await),
            Err(e) => format!("! {}", e.user_message()),
        },
        Command::Source(source) => return Outcome::SetSource(source),
        Command::Expand { node, keyword } => {
            let levels = session.levels().await;
            let Some(target) = node.resolve(&levels) else {
                return unknown_node();
            };
            let Some(keyword) = keyword.resolve(&target) else {
                return Outcome::Output(format!("! '{}' has no such follow-up", target.keyword));
            };
            match session.expand(&target.id, &keyword).await {
                Ok(Some(_)) => render_levels(&session.levels().await),
                Ok(None) => "Node is gone, nothing expanded.".to_string(),
                Err(e) => format!("! {}", e.user_message()),
            }
        }
        Command::Refresh { node } => {
            let Some(target) = node.resolve(&session.levels().await) else {
                return unknown_node();
            };
            match session.refresh(&target.id, &target.keyword).await {
                Ok(true) => render_levels(&session.levels().await),
                Ok(false) => "Node is gone, nothing refreshed.".to_string(),
                Err(e) => format!("! {}", e.user_message()),
            }
        }
        Command::View { node } => {
            let Some(target) = node.resolve(&session.levels().await) else {
                return unknown_node();
            };
            match session.toggle_view(&target.id).await {
                Some(_) => render_levels(&session.levels().await),
                None => "Node is gone.".to_string(),
            }
        }
        Command::Collect { node, result } => {
            let Some(target) = node.resolve(&session.levels().await) else {
                return unknown_node();
            };
            match session.toggle_collect(&target.id, result).await {
                Some(true) => format!("Collected result {} of '{}'.", result + 1, target.keyword),
                Some(false) => format!(
                    "Removed result {} of '{}' from the collection.",
                    result + 1,
                    target.keyword
                ),
                None => format!("! '{}' has no result {}", target.keyword, result + 1),
            }
        }
        Command::Collected => render_ledger(&session.ledger().await, LEDGER_PREVIEW_LIMIT),
        Command::Summarize { node, result } => {
            let Some(target) = node.resolve(&session.levels().await) else {
                return unknown_node();
            };
            let Some(item) = target.result(result) else {
                return Outcome::Output(format!(
                    "! '{}' has no result {}",
                    target.keyword,
                    result + 1
                ));
            };
            match session.summarize(&item.snippet).await {
                Ok(summary) => format!("Summary of '{}':\n{summary}", item.title),
                Err(e) => format!("! {}", e.user_message()),
            }
        }
        Command::Integrate { keyword } => match session.integrate_collections(&keyword).await {
            Ok(text) => text,
            Err(e) => format!("! {}", e.user_message()),
        },
        Command::IntegrateTree { keyword } => match session.integrate_tree(&keyword).await {
            Ok(text) => text,
            Err(e) => format!("! {}", e.user_message()),
        },
        Command::Tree => render_levels(&session.levels().await),
        Command::Json => match serde_json::to_string_pretty(&session.forest().await) {
            Ok(json) => json,
            Err(e) => format!("! Failed to serialize tree: {e}"),
        },
        Command::Clear => format!("Cleared {} root search(es).", session.clear().await),
        Command::Health => match session.health().await {
            Ok(status) if status.is_healthy() => format!("Backend healthy: {}", status.message),
            Ok(status) => format!("! Backend reports '{}': {}", status.status, status.message),
            Err(e) => format!("! Backend unreachable: {e}"),
        },
        Command::Help => HELP.to_string(),
        Command::Quit => return Outcome::Quit,
    };
    Outcome::Output(text)
}

fn unknown_node() -> Outcome {
    Outcome::Output("! No such node, use 'tree' to see positions".to_string())
}

/// Counts from one run of [`watch_events`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventTally {
    pub received: u64,
    /// Events lost because the listener fell behind
    pub skipped: u64,
}

/// Trace session events until the bus closes
///
/// Falling behind the bus is logged and the listener carries on.
pub async fn watch_events(mut events: broadcast::Receiver<SessionEvent>) -> EventTally {
    let mut tally = EventTally::default();
    loop {
        match events.recv().await {
            Ok(event) => {
                tally.received += 1;
                if let SessionEvent::RefreshStarted { node_id, .. } = event {
                    tracing::debug!(node_id = %node_id, "Refresh in flight");
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tally.skipped += skipped;
                tracing::debug!(skipped, "Event listener lagged");
            }
            Err(RecvError::Closed) => return tally,
        }
    }
}

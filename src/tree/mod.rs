//! In-memory exploration forest
//!
//! - [`node`]: the recursive node model
//! - [`forest`]: ordered roots and pre-order traversal
//! - [`mutator`]: copy-on-path edits by node identity
//! - [`levels`]: depth-grouped projection for tiered display

pub mod forest;
pub mod levels;
pub mod mutator;
pub mod node;

pub use forest::{Forest, Visit, Walk};
pub use levels::{Level, LevelItem, project};
pub use mutator::{locate_and_replace, locate_and_replace_reporting};
pub use node::{
    NodeId, NodeStatus, SearchNode, SearchPayload, SearchResult, SearchSource, UnknownSource,
};

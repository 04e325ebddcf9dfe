//! Collection ledger: results the user marked to keep, independent of the tree

mod ledger;
mod types;

pub use ledger::{CollectionLedger, LedgerPreview};
pub use types::{CollectedItem, CollectionId};

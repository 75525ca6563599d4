//! Entity model: identity projection and the local event ledger.

mod base;
mod feed;
mod ledger;

pub use base::{BusinessEntity, EntityBase};
pub use feed::{LedgerChange, LedgerFeed, LedgerNotification};
pub use ledger::{EventLedger, LedgerSink, LocalEvent};

//! Transfer handling module
//!
//! The Transfer Coordinator and its command/outcome types. The handler
//! orchestrates the wallet and ledger stores inside one transactional
//! boundary; nothing else in the crate writes balances.

mod commands;
mod transfer_handler;

pub use commands::{TransferCommand, TransferOutcome, TransferStatus};
pub use transfer_handler::TransferHandler;

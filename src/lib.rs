//! wallet-ledger Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod domain;
pub mod handlers;
pub mod interest;
pub mod ledger;
pub mod wallet;

// Private modules (used only by main.rs binary)
pub mod config;
pub mod db;
mod error;

pub use config::Config;
pub use domain::{Amount, AmountError, TransferError};
pub use error::{AppError, AppResult};

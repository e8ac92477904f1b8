//! Account Ledger
//!
//! An in-process stand-in for the account model native programs run against.
//!
//! ## Model
//!
//! - Every record lives in its own account, keyed by a `Pubkey` (usually a PDA
//!   derived from a seed prefix, a seed tuple and the owning program).
//! - Accounts carry lamports, an owner program and borsh-encoded data.
//! - Creating an account charges its rent deposit to the transaction payer;
//!   closing it hands the lamports to a recipient.
//!
//! ## Transactions
//!
//! `Ledger::transact` declares the accounts a transaction touches, locks them
//! in ascending key order, stages copies and commits accounts and program logs
//! only if the transaction body succeeds.

pub mod account;
pub mod error;
pub mod ledger;
pub mod signer;

pub use solana_program;

// Re-export for external use
pub use account::{Account, AccountState};
pub use error::LedgerError;
pub use ledger::{AccountSet, Ledger, LogEntry};
pub use signer::Signer;

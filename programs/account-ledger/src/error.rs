//! Error definitions for the account ledger.

use solana_program::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account {0} was not declared by the transaction")]
    AccountNotLocked(Pubkey),

    #[error("Account not initialized")]
    AccountNotInitialized,

    #[error("Account already initialized")]
    AccountAlreadyInitialized,

    #[error("Invalid account discriminator")]
    InvalidDiscriminator,

    #[error("Invalid account owner")]
    InvalidAccountOwner,

    #[error("Missing required signature for {0}")]
    MissingRequiredSignature(Pubkey),

    #[error("Insufficient funds: needed {needed} lamports, available {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    #[error("Account lock poisoned")]
    LockPoisoned,
}

impl LedgerError {
    /// Stable numeric code, in the range runtimes use for account errors.
    pub fn error_code(&self) -> u32 {
        match self {
            LedgerError::AccountNotLocked(_) => 3000,
            LedgerError::AccountNotInitialized => 3001,
            LedgerError::AccountAlreadyInitialized => 3002,
            LedgerError::InvalidDiscriminator => 3003,
            LedgerError::InvalidAccountOwner => 3004,
            LedgerError::MissingRequiredSignature(_) => 3005,
            LedgerError::InsufficientFunds { .. } => 3006,
            LedgerError::ArithmeticOverflow => 3007,
            LedgerError::InvalidAccountData(_) => 3008,
            LedgerError::LockPoisoned => 3009,
        }
    }
}

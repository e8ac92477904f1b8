//! Raw accounts and the typed state trait.
//!
//! ## Discriminator Pattern
//!
//! Each state type serializes a unique `discriminator` byte as its first field.
//! `AccountState::unpack` checks the owner program and the discriminator before
//! trusting the remaining bytes, so one record type can never be read as another.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::error::LedgerError;

/// A single ledger account.
///
/// An account exists while it holds lamports or data. Closing zeroes both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    /// Balance, including the rent deposit for `data`
    pub lamports: u64,
    /// Program allowed to write `data` (default pubkey = plain wallet)
    pub owner: Pubkey,
    /// Borsh-encoded program state
    pub data: Vec<u8>,
}

impl Account {
    pub fn exists(&self) -> bool {
        self.lamports > 0 || !self.data.is_empty()
    }

    pub fn data_is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Typed program state stored in an account.
pub trait AccountState: BorshSerialize + BorshDeserialize {
    const DISCRIMINATOR: u8;

    /// Decode the state after verifying owner and discriminator.
    fn unpack(account: &Account, program_id: &Pubkey) -> Result<Self, LedgerError> {
        if account.data_is_empty() {
            return Err(LedgerError::AccountNotInitialized);
        }
        if account.owner != *program_id {
            return Err(LedgerError::InvalidAccountOwner);
        }
        if account.data[0] != Self::DISCRIMINATOR {
            return Err(LedgerError::InvalidDiscriminator);
        }
        Self::try_from_slice(&account.data)
            .map_err(|e| LedgerError::InvalidAccountData(e.to_string()))
    }

    fn pack(&self) -> Result<Vec<u8>, LedgerError> {
        self.try_to_vec().map_err(|e| LedgerError::InvalidAccountData(e.to_string()))
    }
}

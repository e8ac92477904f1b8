//! Peer registry primitives shared by adapters.
//!
//! A peer is the adapter contract deployed on a remote chain. Inbound
//! messages are only accepted from the registered peer of their source chain,
//! and a peer, once set, can never be changed.

use account_ledger::AccountState;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;
use thiserror::Error;

use crate::address::UniversalAddress;

/// PDA seed prefix for peer accounts, under the adapter program.
pub const PEER_SEED: &[u8] = b"peer";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerError {
    #[error("Chain id cannot be zero")]
    InvalidChain,

    #[error("Peer address cannot be zero")]
    ZeroAddress,

    #[error("Peer is already set for this chain")]
    AlreadySet,

    #[error("Message does not come from the registered peer")]
    UnknownPeer,
}

/// Registered peer for one remote chain.
/// PDA seeds: ["peer", chain (u16 BE)]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    pub discriminator: u8,
    /// Remote chain id
    pub chain: u16,
    /// Adapter contract on the remote chain
    pub contract: UniversalAddress,
    pub bump: u8,
}

impl AccountState for Peer {
    const DISCRIMINATOR: u8 = 2;
}

impl Peer {
    pub const SIZE: usize = 1 + 2 + 32 + 1; // 36 bytes

    pub fn new(chain: u16, contract: UniversalAddress, bump: u8) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            chain,
            contract,
            bump,
        }
    }

    /// Check an inbound emitter against this peer.
    pub fn verify_emitter(&self, emitter: &UniversalAddress) -> Result<(), PeerError> {
        if self.contract != *emitter {
            return Err(PeerError::UnknownPeer);
        }
        Ok(())
    }
}

pub fn find_peer_address(chain: u16, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[PEER_SEED, &chain.to_be_bytes()], program_id)
}

/// Validate a new peer registration. `existing` is whether the peer account
/// for `chain` already holds data.
pub fn validate_new_peer(
    chain: u16,
    contract: &UniversalAddress,
    existing: bool,
) -> Result<(), PeerError> {
    if chain == 0 {
        return Err(PeerError::InvalidChain);
    }
    if contract.is_zero() {
        return Err(PeerError::ZeroAddress);
    }
    if existing {
        return Err(PeerError::AlreadySet);
    }
    Ok(())
}

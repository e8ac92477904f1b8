//! State definitions for the guardian adapter program.
//!
//! Discriminators: Config = 1, Peer = 2 (shared peer layout), PostedMessage = 3,
//! EmitterSequence = 4.

use account_ledger::{AccountState, LedgerError};
use borsh::{BorshDeserialize, BorshSerialize};
use messaging_endpoint::governance::AdminState;
use solana_program::pubkey::Pubkey;

pub use messaging_endpoint::peer::Peer;

/// How long the guardians wait before observing a posted message.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyLevel {
    Confirmed,
    Finalized,
}

impl ConsistencyLevel {
    /// Value carried on the guardian network.
    pub fn as_u8(&self) -> u8 {
        match self {
            ConsistencyLevel::Confirmed => 1,
            ConsistencyLevel::Finalized => 32,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "confirmed" => Some(ConsistencyLevel::Confirmed),
            "finalized" => Some(ConsistencyLevel::Finalized),
            _ => None,
        }
    }
}

/// Adapter configuration.
/// PDA seeds: ["config"]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub discriminator: u8,
    pub admin: AdminState,
    /// Endpoint program this adapter picks up from and attests to
    pub endpoint_program: Pubkey,
    /// Program whose verified VAAs are accepted
    pub guardian_program: Pubkey,
    pub chain_id: u16,
    pub consistency_level: ConsistencyLevel,
    /// Lamports charged per posted message
    pub message_fee: u64,
    pub bump: u8,
}

impl AccountState for Config {
    const DISCRIMINATOR: u8 = 1;
}

impl Config {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        admin: AdminState,
        endpoint_program: Pubkey,
        guardian_program: Pubkey,
        chain_id: u16,
        consistency_level: ConsistencyLevel,
        message_fee: u64,
        bump: u8,
    ) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            admin,
            endpoint_program,
            guardian_program,
            chain_id,
            consistency_level,
            message_fee,
            bump,
        }
    }
}

/// A message posted for the guardians to observe.
/// PDA seeds: ["message", integrator, sequence (u64 BE)]
///
/// Keyed by the endpoint message rather than the outbox account, since an
/// integrator may reuse an outbox keypair once the outbox has closed.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub discriminator: u8,
    /// Emitter PDA the guardians attribute the message to
    pub emitter: Pubkey,
    /// Emitter sequence on the guardian network
    pub sequence: u64,
    pub consistency_level: ConsistencyLevel,
    /// Encoded `GuardianMessage`
    pub payload: Vec<u8>,
    pub bump: u8,
}

impl AccountState for PostedMessage {
    const DISCRIMINATOR: u8 = 3;
}

impl PostedMessage {
    pub fn new(
        emitter: Pubkey,
        sequence: u64,
        consistency_level: ConsistencyLevel,
        payload: Vec<u8>,
        bump: u8,
    ) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            emitter,
            sequence,
            consistency_level,
            payload,
            bump,
        }
    }
}

/// Next guardian-network sequence of an emitter.
/// PDA seeds: ["sequence", emitter]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct EmitterSequence {
    pub discriminator: u8,
    pub sequence: u64,
    pub bump: u8,
}

impl AccountState for EmitterSequence {
    const DISCRIMINATOR: u8 = 4;
}

impl EmitterSequence {
    pub const SIZE: usize = 1 + 8 + 1; // 10 bytes

    pub fn new(bump: u8) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            sequence: 0,
            bump,
        }
    }

    /// Take the current sequence and advance.
    pub fn next(&mut self) -> Result<u64, LedgerError> {
        let current = self.sequence;
        self.sequence = current.checked_add(1).ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(current)
    }
}

/// Seeds for PDA derivation
pub mod seeds {
    pub const CONFIG_SEED: &[u8] = b"config";
    pub use messaging_endpoint::peer::PEER_SEED;
    pub const MESSAGE_SEED: &[u8] = b"message";
    pub const SEQUENCE_SEED: &[u8] = b"sequence";
    pub const EMITTER_SEED: &[u8] = b"emitter";
    pub const FEE_COLLECTOR_SEED: &[u8] = b"fee_collector";
    pub use messaging_endpoint::seeds::ADAPTER_SIGNER_SEED;
}

pub use messaging_endpoint::peer::find_peer_address;

pub fn find_config_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::CONFIG_SEED], program_id)
}

pub fn find_posted_message_address(
    integrator: &Pubkey,
    sequence: u64,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[seeds::MESSAGE_SEED, integrator.as_ref(), &sequence.to_be_bytes()],
        program_id,
    )
}

pub fn find_emitter_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::EMITTER_SEED], program_id)
}

pub fn find_emitter_sequence_address(emitter: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::SEQUENCE_SEED, emitter.as_ref()], program_id)
}

pub fn find_fee_collector_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::FEE_COLLECTOR_SEED], program_id)
}

//! State definitions for the messaging endpoint program.
//!
//! ## Discriminator Pattern
//!
//! Each account type has a unique `discriminator` byte as its first field:
//! - EndpointConfig = 1, IntegratorConfig = 2, AdapterInfo = 3,
//!   IntegratorChainConfig = 4, SequenceTracker = 5, OutboxMessage = 6,
//!   AttestationInfo = 7.
//! - On load the ledger verifies owner and discriminator before trusting data.

use account_ledger::AccountState;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::address::UniversalAddress;
use crate::bitmap::{Bitmap, MAX_ADAPTERS};
use crate::error::EndpointError;
use crate::governance::AdminState;
use crate::message::Message;

/// Endpoint-wide configuration.
/// PDA seeds: ["config"]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub discriminator: u8,
    /// This chain's id; inbound messages must be addressed to it
    pub chain_id: u16,
    /// Quorum given to chain configs when they are first created
    pub default_recv_threshold: u8,
    pub bump: u8,
}

impl AccountState for EndpointConfig {
    const DISCRIMINATOR: u8 = 1;
}

impl EndpointConfig {
    pub const SIZE: usize = 1 + 2 + 1 + 1; // 5 bytes

    pub fn new(chain_id: u16, default_recv_threshold: u8, bump: u8) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            chain_id,
            default_recv_threshold,
            bump,
        }
    }
}

/// Registry of one integrator: its admin and the ordered list of adapters.
/// PDA seeds: ["integrator_config", integrator_program_id]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct IntegratorConfig {
    pub discriminator: u8,
    pub integrator_program_id: Pubkey,
    pub admin: AdminState,
    /// AdapterInfo accounts in registration order; position == adapter index
    pub adapter_infos: Vec<Pubkey>,
    pub bump: u8,
}

impl AccountState for IntegratorConfig {
    const DISCRIMINATOR: u8 = 2;
}

impl IntegratorConfig {
    pub fn new(integrator_program_id: Pubkey, admin: AdminState, bump: u8) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            integrator_program_id,
            admin,
            adapter_infos: Vec::new(),
            bump,
        }
    }

    /// Append an adapter and return its index.
    pub fn push_adapter(&mut self, adapter_info: Pubkey) -> Result<u8, EndpointError> {
        if self.adapter_infos.len() >= MAX_ADAPTERS {
            return Err(EndpointError::MaxAdaptersReached);
        }
        let index = self.adapter_infos.len() as u8;
        self.adapter_infos.push(adapter_info);
        Ok(index)
    }
}

/// One registered adapter of one integrator. Immutable once created.
/// PDA seeds: ["adapter_info", integrator_program_id, adapter_program_id]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdapterInfo {
    pub discriminator: u8,
    pub integrator_program_id: Pubkey,
    pub adapter_program_id: Pubkey,
    /// Bit position in every bitmap of this integrator
    pub index: u8,
    pub bump: u8,
}

impl AccountState for AdapterInfo {
    const DISCRIMINATOR: u8 = 3;
}

impl AdapterInfo {
    pub const SIZE: usize = 1 + 32 + 32 + 1 + 1; // 67 bytes

    pub fn new(integrator_program_id: Pubkey, adapter_program_id: Pubkey, index: u8, bump: u8) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            integrator_program_id,
            adapter_program_id,
            index,
            bump,
        }
    }
}

/// Enabled adapters and quorum of one integrator for one remote chain.
/// PDA seeds: ["integrator_chain_config", integrator_program_id, chain_id (u16 BE)]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct IntegratorChainConfig {
    pub discriminator: u8,
    pub integrator_program_id: Pubkey,
    pub chain_id: u16,
    pub send_adapter_bitmap: Bitmap,
    pub recv_adapter_bitmap: Bitmap,
    /// Attestations from enabled receive adapters needed before execution
    pub recv_threshold: u8,
    pub bump: u8,
}

impl AccountState for IntegratorChainConfig {
    const DISCRIMINATOR: u8 = 4;
}

impl IntegratorChainConfig {
    pub const SIZE: usize = 1 + 32 + 2 + 16 + 16 + 1 + 1; // 69 bytes

    pub fn new(integrator_program_id: Pubkey, chain_id: u16, recv_threshold: u8, bump: u8) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            integrator_program_id,
            chain_id,
            send_adapter_bitmap: Bitmap::new(),
            recv_adapter_bitmap: Bitmap::new(),
            recv_threshold,
            bump,
        }
    }

    /// Whether `attested` satisfies the quorum, counting only adapters that
    /// are currently receive-enabled.
    pub fn quorum_met(&self, attested: &Bitmap) -> bool {
        self.recv_adapter_bitmap.intersection(attested).count_ones() >= u32::from(self.recv_threshold)
    }
}

/// Outbound sequence counter of one integrator.
/// PDA seeds: ["sequence_tracker", integrator_program_id]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SequenceTracker {
    pub discriminator: u8,
    pub integrator_program_id: Pubkey,
    /// Sequence the next send will use
    pub sequence: u64,
    pub bump: u8,
}

impl AccountState for SequenceTracker {
    const DISCRIMINATOR: u8 = 5;
}

impl SequenceTracker {
    pub const SIZE: usize = 1 + 32 + 8 + 1; // 42 bytes

    pub fn new(integrator_program_id: Pubkey, bump: u8) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            integrator_program_id,
            sequence: 0,
            bump,
        }
    }

    /// Take the current sequence and advance the counter.
    pub fn next(&mut self) -> Result<u64, EndpointError> {
        let current = self.sequence;
        self.sequence = current
            .checked_add(1)
            .ok_or(EndpointError::ArithmeticOverflow)?;
        Ok(current)
    }
}

/// An outbound message waiting for its send adapters.
/// Address: a fresh keypair chosen by the sender (must sign the send).
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct OutboxMessage {
    pub discriminator: u8,
    pub src_addr: UniversalAddress,
    pub sequence: u64,
    pub dst_chain: u16,
    pub dst_addr: UniversalAddress,
    pub payload_hash: [u8; 32],
    /// Adapters that have not picked the message up yet
    pub outstanding_adapters: Bitmap,
    /// Receives the rent deposit when the last adapter picks up
    pub refund_recipient: Pubkey,
}

impl AccountState for OutboxMessage {
    const DISCRIMINATOR: u8 = 6;
}

impl OutboxMessage {
    pub const SIZE: usize = 1 + 32 + 8 + 2 + 32 + 32 + 16 + 32; // 155 bytes

    pub fn new(
        src_addr: UniversalAddress,
        sequence: u64,
        dst_chain: u16,
        dst_addr: UniversalAddress,
        payload_hash: [u8; 32],
        outstanding_adapters: Bitmap,
        refund_recipient: Pubkey,
    ) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            src_addr,
            sequence,
            dst_chain,
            dst_addr,
            payload_hash,
            outstanding_adapters,
            refund_recipient,
        }
    }

    /// The message as seen by the destination, given this chain's id.
    pub fn to_message(&self, src_chain: u16) -> Message {
        Message {
            src_chain,
            src_addr: self.src_addr,
            sequence: self.sequence,
            dst_chain: self.dst_chain,
            dst_addr: self.dst_addr,
            payload_hash: self.payload_hash,
        }
    }
}

/// Attestations collected for one inbound message.
/// PDA seeds: ["attestation_info", message_hash]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct AttestationInfo {
    pub discriminator: u8,
    pub message_hash: [u8; 32],
    pub src_chain: u16,
    pub src_addr: UniversalAddress,
    pub sequence: u64,
    pub dst_chain: u16,
    pub dst_addr: UniversalAddress,
    pub payload_hash: [u8; 32],
    /// Set once by `exec_message`, never cleared
    pub executed: bool,
    pub attested_adapters: Bitmap,
    pub bump: u8,
}

impl AccountState for AttestationInfo {
    const DISCRIMINATOR: u8 = 7;
}

impl AttestationInfo {
    pub const SIZE: usize = 1 + 32 + 2 + 32 + 8 + 2 + 32 + 32 + 1 + 16 + 1; // 159 bytes

    pub fn new(message: &Message, bump: u8) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            message_hash: message.hash(),
            src_chain: message.src_chain,
            src_addr: message.src_addr,
            sequence: message.sequence,
            dst_chain: message.dst_chain,
            dst_addr: message.dst_addr,
            payload_hash: message.payload_hash,
            executed: false,
            attested_adapters: Bitmap::new(),
            bump,
        }
    }

    /// The message recorded in this account.
    pub fn message(&self) -> Message {
        Message {
            src_chain: self.src_chain,
            src_addr: self.src_addr,
            sequence: self.sequence,
            dst_chain: self.dst_chain,
            dst_addr: self.dst_addr,
            payload_hash: self.payload_hash,
        }
    }
}

/// Seeds for PDA derivation
pub mod seeds {
    pub const CONFIG_SEED: &[u8] = b"config";
    pub const INTEGRATOR_CONFIG_SEED: &[u8] = b"integrator_config";
    pub const ADAPTER_INFO_SEED: &[u8] = b"adapter_info";
    pub const INTEGRATOR_CHAIN_CONFIG_SEED: &[u8] = b"integrator_chain_config";
    pub const SEQUENCE_TRACKER_SEED: &[u8] = b"sequence_tracker";
    pub const ATTESTATION_INFO_SEED: &[u8] = b"attestation_info";

    /// Signer seed an integrator program uses to call the endpoint
    pub const INTEGRATOR_SIGNER_SEED: &[u8] = b"endpoint_integrator";
    /// Signer seed an adapter program uses to call the endpoint
    pub const ADAPTER_SIGNER_SEED: &[u8] = b"adapter_pda";
}

pub fn find_config_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::CONFIG_SEED], program_id)
}

pub fn find_integrator_config_address(integrator: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::INTEGRATOR_CONFIG_SEED, integrator.as_ref()], program_id)
}

pub fn find_adapter_info_address(
    integrator: &Pubkey,
    adapter: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[seeds::ADAPTER_INFO_SEED, integrator.as_ref(), adapter.as_ref()],
        program_id,
    )
}

pub fn find_integrator_chain_config_address(
    integrator: &Pubkey,
    chain_id: u16,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            seeds::INTEGRATOR_CHAIN_CONFIG_SEED,
            integrator.as_ref(),
            &chain_id.to_be_bytes(),
        ],
        program_id,
    )
}

pub fn find_sequence_tracker_address(integrator: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::SEQUENCE_TRACKER_SEED, integrator.as_ref()], program_id)
}

pub fn find_attestation_info_address(message_hash: &[u8; 32], program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::ATTESTATION_INFO_SEED, message_hash], program_id)
}

/// Address an integrator program signs as when calling the endpoint.
pub fn integrator_signer_address(integrator: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[seeds::INTEGRATOR_SIGNER_SEED], integrator).0
}

/// Address an adapter program signs as when calling the endpoint.
pub fn adapter_signer_address(adapter: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[seeds::ADAPTER_SIGNER_SEED], adapter).0
}

//! Event definitions for the guardian adapter program.

use account_ledger::{AccountSet, LedgerError};
use borsh::{BorshDeserialize, BorshSerialize};
use messaging_endpoint::UniversalAddress;
use solana_program::pubkey::Pubkey;
use tracing::info;

use crate::state::ConsistencyLevel;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum GuardianAdapterEvent {
    AdminUpdated {
        old_admin: Pubkey,
        new_admin: Pubkey,
    },
    AdminUpdateRequested {
        current_admin: Pubkey,
        proposed_admin: Pubkey,
    },
    AdminDiscarded {
        admin: Pubkey,
    },
    PeerAdded {
        chain: u16,
        peer_contract: UniversalAddress,
    },
    MessagePosted {
        outbox_message: Pubkey,
        emitter: Pubkey,
        sequence: u64,
        consistency_level: ConsistencyLevel,
        payload: Vec<u8>,
    },
}

pub fn emit_admin_updated(
    set: &mut AccountSet,
    program_id: &Pubkey,
    old_admin: &Pubkey,
    new_admin: &Pubkey,
) -> Result<(), LedgerError> {
    info!("AdminUpdated: old_admin={}, new_admin={}", old_admin, new_admin);
    set.emit(
        program_id,
        &GuardianAdapterEvent::AdminUpdated {
            old_admin: *old_admin,
            new_admin: *new_admin,
        },
    )
}

pub fn emit_admin_update_requested(
    set: &mut AccountSet,
    program_id: &Pubkey,
    current_admin: &Pubkey,
    proposed_admin: &Pubkey,
) -> Result<(), LedgerError> {
    info!(
        "AdminUpdateRequested: current_admin={}, proposed_admin={}",
        current_admin, proposed_admin
    );
    set.emit(
        program_id,
        &GuardianAdapterEvent::AdminUpdateRequested {
            current_admin: *current_admin,
            proposed_admin: *proposed_admin,
        },
    )
}

pub fn emit_admin_discarded(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
) -> Result<(), LedgerError> {
    info!("AdminDiscarded: admin={}", admin);
    set.emit(program_id, &GuardianAdapterEvent::AdminDiscarded { admin: *admin })
}

pub fn emit_peer_added(
    set: &mut AccountSet,
    program_id: &Pubkey,
    chain: u16,
    peer_contract: &UniversalAddress,
) -> Result<(), LedgerError> {
    info!("PeerAdded: chain={}, peer_contract={}", chain, peer_contract);
    set.emit(
        program_id,
        &GuardianAdapterEvent::PeerAdded {
            chain,
            peer_contract: *peer_contract,
        },
    )
}

pub fn emit_message_posted(
    set: &mut AccountSet,
    program_id: &Pubkey,
    outbox_message: &Pubkey,
    emitter: &Pubkey,
    sequence: u64,
    consistency_level: ConsistencyLevel,
    payload: &[u8],
) -> Result<(), LedgerError> {
    info!(
        "MessagePosted: outbox={}, emitter={}, sequence={}, payload=0x{}",
        outbox_message,
        emitter,
        sequence,
        hex::encode(payload)
    );
    set.emit(
        program_id,
        &GuardianAdapterEvent::MessagePosted {
            outbox_message: *outbox_message,
            emitter: *emitter,
            sequence,
            consistency_level,
            payload: payload.to_vec(),
        },
    )
}

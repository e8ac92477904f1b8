//! Event definitions for the messaging endpoint program.
//!
//! Events are borsh-encoded into the ledger's program log when the transaction
//! commits, and traced at `info` as they are emitted.

use account_ledger::{AccountSet, LedgerError};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;
use tracing::info;

use crate::address::UniversalAddress;
use crate::bitmap::Bitmap;
use crate::message::Message;
use crate::state::OutboxMessage;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum EndpointEvent {
    IntegratorRegistered {
        integrator: Pubkey,
        admin: Pubkey,
    },
    AdapterAdded {
        integrator: Pubkey,
        adapter: Pubkey,
        adapters_num: u8,
    },
    AdminUpdateRequested {
        integrator: Pubkey,
        old_admin: Pubkey,
        new_admin: Pubkey,
    },
    AdminUpdated {
        integrator: Pubkey,
        old_admin: Pubkey,
        new_admin: Pubkey,
    },
    AdminDiscarded {
        integrator: Pubkey,
    },
    SendAdapterEnabledForChain {
        integrator: Pubkey,
        chain: u16,
        adapter: Pubkey,
    },
    SendAdapterDisabledForChain {
        integrator: Pubkey,
        chain: u16,
        adapter: Pubkey,
    },
    RecvAdapterEnabledForChain {
        integrator: Pubkey,
        chain: u16,
        adapter: Pubkey,
    },
    RecvAdapterDisabledForChain {
        integrator: Pubkey,
        chain: u16,
        adapter: Pubkey,
    },
    RecvThresholdUpdated {
        integrator: Pubkey,
        chain: u16,
        threshold: u8,
    },
    MessageSent {
        sender: UniversalAddress,
        sequence: u64,
        recipient: UniversalAddress,
        recipient_chain: u16,
        payload_digest: [u8; 32],
    },
    MessagePickedUp {
        src_addr: UniversalAddress,
        sequence: u64,
        dst_chain: u16,
        dst_addr: UniversalAddress,
        payload_hash: [u8; 32],
        adapter: Pubkey,
        remaining_adapters: Bitmap,
    },
    MessageAttestedTo {
        message_hash: [u8; 32],
        message: Message,
        attested_bitmap: Bitmap,
        attesting_adapter: UniversalAddress,
    },
    MessageReceived {
        message_hash: [u8; 32],
        message: Message,
        enabled_bitmap: Bitmap,
        attested_bitmap: Bitmap,
    },
    MessageExecuted {
        message_hash: [u8; 32],
        message: Message,
    },
}

/// Which direction an adapter toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Send,
    Recv,
}

pub fn emit_integrator_registered(
    set: &mut AccountSet,
    program_id: &Pubkey,
    integrator: &Pubkey,
    admin: &Pubkey,
) -> Result<(), LedgerError> {
    info!("IntegratorRegistered: integrator={}, admin={}", integrator, admin);
    set.emit(
        program_id,
        &EndpointEvent::IntegratorRegistered {
            integrator: *integrator,
            admin: *admin,
        },
    )
}

pub fn emit_adapter_added(
    set: &mut AccountSet,
    program_id: &Pubkey,
    integrator: &Pubkey,
    adapter: &Pubkey,
    adapters_num: u8,
) -> Result<(), LedgerError> {
    info!(
        "AdapterAdded: integrator={}, adapter={}, adapters_num={}",
        integrator, adapter, adapters_num
    );
    set.emit(
        program_id,
        &EndpointEvent::AdapterAdded {
            integrator: *integrator,
            adapter: *adapter,
            adapters_num,
        },
    )
}

pub fn emit_admin_update_requested(
    set: &mut AccountSet,
    program_id: &Pubkey,
    integrator: &Pubkey,
    old_admin: &Pubkey,
    new_admin: &Pubkey,
) -> Result<(), LedgerError> {
    info!(
        "AdminUpdateRequested: integrator={}, old_admin={}, new_admin={}",
        integrator, old_admin, new_admin
    );
    set.emit(
        program_id,
        &EndpointEvent::AdminUpdateRequested {
            integrator: *integrator,
            old_admin: *old_admin,
            new_admin: *new_admin,
        },
    )
}

pub fn emit_admin_updated(
    set: &mut AccountSet,
    program_id: &Pubkey,
    integrator: &Pubkey,
    old_admin: &Pubkey,
    new_admin: &Pubkey,
) -> Result<(), LedgerError> {
    info!(
        "AdminUpdated: integrator={}, old_admin={}, new_admin={}",
        integrator, old_admin, new_admin
    );
    set.emit(
        program_id,
        &EndpointEvent::AdminUpdated {
            integrator: *integrator,
            old_admin: *old_admin,
            new_admin: *new_admin,
        },
    )
}

pub fn emit_admin_discarded(
    set: &mut AccountSet,
    program_id: &Pubkey,
    integrator: &Pubkey,
) -> Result<(), LedgerError> {
    info!("AdminDiscarded: integrator={}", integrator);
    set.emit(
        program_id,
        &EndpointEvent::AdminDiscarded {
            integrator: *integrator,
        },
    )
}

pub fn emit_adapter_toggled(
    set: &mut AccountSet,
    program_id: &Pubkey,
    direction: Direction,
    enabled: bool,
    integrator: &Pubkey,
    chain: u16,
    adapter: &Pubkey,
) -> Result<(), LedgerError> {
    let (integrator, adapter) = (*integrator, *adapter);
    let event = match (direction, enabled) {
        (Direction::Send, true) => EndpointEvent::SendAdapterEnabledForChain { integrator, chain, adapter },
        (Direction::Send, false) => EndpointEvent::SendAdapterDisabledForChain { integrator, chain, adapter },
        (Direction::Recv, true) => EndpointEvent::RecvAdapterEnabledForChain { integrator, chain, adapter },
        (Direction::Recv, false) => EndpointEvent::RecvAdapterDisabledForChain { integrator, chain, adapter },
    };
    info!(
        "{:?}Adapter{}ForChain: integrator={}, chain={}, adapter={}",
        direction,
        if enabled { "Enabled" } else { "Disabled" },
        integrator,
        chain,
        adapter
    );
    set.emit(program_id, &event)
}

pub fn emit_recv_threshold_updated(
    set: &mut AccountSet,
    program_id: &Pubkey,
    integrator: &Pubkey,
    chain: u16,
    threshold: u8,
) -> Result<(), LedgerError> {
    info!(
        "RecvThresholdUpdated: integrator={}, chain={}, threshold={}",
        integrator, chain, threshold
    );
    set.emit(
        program_id,
        &EndpointEvent::RecvThresholdUpdated {
            integrator: *integrator,
            chain,
            threshold,
        },
    )
}

pub fn emit_message_sent(
    set: &mut AccountSet,
    program_id: &Pubkey,
    outbox: &OutboxMessage,
) -> Result<(), LedgerError> {
    info!(
        "MessageSent: sender={}, sequence={}, recipient={}, recipient_chain={}, payload_digest={}",
        outbox.src_addr,
        outbox.sequence,
        outbox.dst_addr,
        outbox.dst_chain,
        hex::encode(outbox.payload_hash)
    );
    set.emit(
        program_id,
        &EndpointEvent::MessageSent {
            sender: outbox.src_addr,
            sequence: outbox.sequence,
            recipient: outbox.dst_addr,
            recipient_chain: outbox.dst_chain,
            payload_digest: outbox.payload_hash,
        },
    )
}

pub fn emit_message_picked_up(
    set: &mut AccountSet,
    program_id: &Pubkey,
    outbox: &OutboxMessage,
    adapter: &Pubkey,
) -> Result<(), LedgerError> {
    info!(
        "MessagePickedUp: src_addr={}, sequence={}, adapter={}, remaining_adapters={:#b}",
        outbox.src_addr,
        outbox.sequence,
        adapter,
        outbox.outstanding_adapters.as_value()
    );
    set.emit(
        program_id,
        &EndpointEvent::MessagePickedUp {
            src_addr: outbox.src_addr,
            sequence: outbox.sequence,
            dst_chain: outbox.dst_chain,
            dst_addr: outbox.dst_addr,
            payload_hash: outbox.payload_hash,
            adapter: *adapter,
            remaining_adapters: outbox.outstanding_adapters,
        },
    )
}

pub fn emit_message_attested_to(
    set: &mut AccountSet,
    program_id: &Pubkey,
    message_hash: &[u8; 32],
    message: &Message,
    attested_bitmap: Bitmap,
    attesting_adapter: &Pubkey,
) -> Result<(), LedgerError> {
    info!(
        "MessageAttestedTo: message_hash={}, src_chain={}, sequence={}, adapter={}, attested_bitmap={:#b}",
        hex::encode(message_hash),
        message.src_chain,
        message.sequence,
        attesting_adapter,
        attested_bitmap.as_value()
    );
    set.emit(
        program_id,
        &EndpointEvent::MessageAttestedTo {
            message_hash: *message_hash,
            message: *message,
            attested_bitmap,
            attesting_adapter: UniversalAddress::from(attesting_adapter),
        },
    )
}

pub fn emit_message_received(
    set: &mut AccountSet,
    program_id: &Pubkey,
    message_hash: &[u8; 32],
    message: &Message,
    enabled_bitmap: Bitmap,
    attested_bitmap: Bitmap,
) -> Result<(), LedgerError> {
    info!(
        "MessageReceived: message_hash={}, enabled_bitmap={:#b}, attested_bitmap={:#b}",
        hex::encode(message_hash),
        enabled_bitmap.as_value(),
        attested_bitmap.as_value()
    );
    set.emit(
        program_id,
        &EndpointEvent::MessageReceived {
            message_hash: *message_hash,
            message: *message,
            enabled_bitmap,
            attested_bitmap,
        },
    )
}

pub fn emit_message_executed(
    set: &mut AccountSet,
    program_id: &Pubkey,
    message_hash: &[u8; 32],
    message: &Message,
) -> Result<(), LedgerError> {
    info!(
        "MessageExecuted: message_hash={}, src_chain={}, sequence={}",
        hex::encode(message_hash),
        message.src_chain,
        message.sequence
    );
    set.emit(
        program_id,
        &EndpointEvent::MessageExecuted {
            message_hash: *message_hash,
            message: *message,
        },
    )
}

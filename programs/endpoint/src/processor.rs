//! Instruction processor for the messaging endpoint program.
//!
//! `process_instruction` runs one instruction as its own ledger transaction.
//! The `process_*` functions operate on an already locked `AccountSet`, so an
//! adapter program can call into the endpoint from inside its own transaction.

use account_ledger::{AccountSet, Ledger, LedgerError, Signer};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;
use tracing::{info, warn};

use crate::address::UniversalAddress;
use crate::bitmap::{Bitmap, MAX_ADAPTERS};
use crate::error::EndpointError;
use crate::events::{self, Direction};
use crate::governance::AdminState;
use crate::instruction::{AdapterChainArgs, EndpointInstruction};
use crate::message::Message;
use crate::state::{
    adapter_signer_address, find_adapter_info_address, find_attestation_info_address,
    find_config_address, find_integrator_chain_config_address, find_integrator_config_address,
    find_sequence_tracker_address, integrator_signer_address, AdapterInfo, AttestationInfo,
    EndpointConfig, IntegratorChainConfig, IntegratorConfig, OutboxMessage, SequenceTracker,
};

/// Program entrypoint processor. Returns the instruction's return data, if any.
pub fn process_instruction(
    ledger: &Ledger,
    program_id: &Pubkey,
    payer: &Signer,
    signers: &[Signer],
    instruction_data: &[u8],
) -> Result<Option<Vec<u8>>, EndpointError> {
    let instruction = EndpointInstruction::try_from_slice(instruction_data)
        .map_err(|_| EndpointError::InvalidInstructionData)?;
    let accounts = instruction.accounts(program_id);

    ledger.transact(payer, signers, &accounts, |set| {
        dispatch(set, program_id, instruction)
    })
}

/// Run a decoded instruction against the locked accounts.
pub fn dispatch(
    set: &mut AccountSet,
    program_id: &Pubkey,
    instruction: EndpointInstruction,
) -> Result<Option<Vec<u8>>, EndpointError> {
    match instruction {
        EndpointInstruction::Initialize {
            chain_id,
            default_recv_threshold,
        } => {
            info!("Instruction: Initialize");
            process_initialize(set, program_id, chain_id, default_recv_threshold)?;
            Ok(None)
        }
        EndpointInstruction::Register {
            integrator_program_id,
            admin,
        } => {
            info!("Instruction: Register");
            process_register(set, program_id, &integrator_program_id, admin)?;
            Ok(None)
        }
        EndpointInstruction::AddAdapter {
            admin,
            integrator_program_id,
            adapter_program_id,
        } => {
            info!("Instruction: AddAdapter");
            let index =
                process_add_adapter(set, program_id, &admin, &integrator_program_id, &adapter_program_id)?;
            return_data(&index)
        }
        EndpointInstruction::EnableSendAdapter(args) => {
            info!("Instruction: EnableSendAdapter");
            process_set_adapter_enabled(set, program_id, &args, Direction::Send, true)?;
            Ok(None)
        }
        EndpointInstruction::DisableSendAdapter(args) => {
            info!("Instruction: DisableSendAdapter");
            process_set_adapter_enabled(set, program_id, &args, Direction::Send, false)?;
            Ok(None)
        }
        EndpointInstruction::EnableRecvAdapter(args) => {
            info!("Instruction: EnableRecvAdapter");
            process_set_adapter_enabled(set, program_id, &args, Direction::Recv, true)?;
            Ok(None)
        }
        EndpointInstruction::DisableRecvAdapter(args) => {
            info!("Instruction: DisableRecvAdapter");
            process_set_adapter_enabled(set, program_id, &args, Direction::Recv, false)?;
            Ok(None)
        }
        EndpointInstruction::SetRecvThreshold {
            admin,
            integrator_program_id,
            chain_id,
            threshold,
        } => {
            info!("Instruction: SetRecvThreshold");
            process_set_recv_threshold(set, program_id, &admin, &integrator_program_id, chain_id, threshold)?;
            Ok(None)
        }
        EndpointInstruction::TransferAdmin {
            admin,
            integrator_program_id,
            new_admin,
        } => {
            info!("Instruction: TransferAdmin");
            process_transfer_admin(set, program_id, &admin, &integrator_program_id, new_admin)?;
            Ok(None)
        }
        EndpointInstruction::ClaimAdmin {
            new_admin,
            integrator_program_id,
        } => {
            info!("Instruction: ClaimAdmin");
            process_claim_admin(set, program_id, &new_admin, &integrator_program_id)?;
            Ok(None)
        }
        EndpointInstruction::UpdateAdmin {
            admin,
            integrator_program_id,
            new_admin,
        } => {
            info!("Instruction: UpdateAdmin");
            process_update_admin(set, program_id, &admin, &integrator_program_id, new_admin)?;
            Ok(None)
        }
        EndpointInstruction::DiscardAdmin {
            admin,
            integrator_program_id,
        } => {
            info!("Instruction: DiscardAdmin");
            process_discard_admin(set, program_id, &admin, &integrator_program_id)?;
            Ok(None)
        }
        EndpointInstruction::CancelAdminTransfer {
            admin,
            integrator_program_id,
        } => {
            info!("Instruction: CancelAdminTransfer");
            process_cancel_admin_transfer(set, program_id, &admin, &integrator_program_id)?;
            Ok(None)
        }
        EndpointInstruction::SendMessage {
            integrator_program_id,
            outbox_message,
            dst_chain,
            dst_addr,
            payload_hash,
        } => {
            info!("Instruction: SendMessage");
            let sequence = process_send_message(
                set,
                program_id,
                &integrator_program_id,
                &outbox_message,
                dst_chain,
                dst_addr,
                payload_hash,
            )?;
            return_data(&sequence)
        }
        EndpointInstruction::PickUpMessage {
            outbox_message,
            adapter_program_id,
            integrator_program_id: _,
            refund_recipient,
        } => {
            info!("Instruction: PickUpMessage");
            let outbox = process_pick_up_message(
                set,
                program_id,
                &outbox_message,
                &adapter_program_id,
                &refund_recipient,
            )?;
            return_data(&outbox)
        }
        EndpointInstruction::AttestMessage {
            adapter_program_id,
            message,
        } => {
            info!("Instruction: AttestMessage");
            let attested = process_attest_message(set, program_id, &adapter_program_id, &message)?;
            return_data(&attested)
        }
        EndpointInstruction::RecvMessage { message } => {
            info!("Instruction: RecvMessage");
            let bitmaps = process_recv_message(set, program_id, &message)?;
            return_data(&bitmaps)
        }
        EndpointInstruction::ExecMessage { message } => {
            info!("Instruction: ExecMessage");
            process_exec_message(set, program_id, &message)?;
            Ok(None)
        }
    }
}

fn return_data<T: BorshSerialize>(value: &T) -> Result<Option<Vec<u8>>, EndpointError> {
    let data = value
        .try_to_vec()
        .map_err(|e| LedgerError::InvalidAccountData(e.to_string()))?;
    Ok(Some(data))
}

// ============================================================================
// AUTHORIZATION
// ============================================================================

fn require_integrator_signer(set: &AccountSet, integrator: &Pubkey) -> Result<(), EndpointError> {
    if !set.is_signer(&integrator_signer_address(integrator)) {
        warn!("Rejected: missing integrator signer for {}", integrator);
        return Err(EndpointError::CallerNotAuthorized);
    }
    Ok(())
}

fn require_adapter_signer(set: &AccountSet, adapter: &Pubkey) -> Result<(), EndpointError> {
    if !set.is_signer(&adapter_signer_address(adapter)) {
        warn!("Rejected: missing adapter signer for {}", adapter);
        return Err(EndpointError::CallerNotAuthorized);
    }
    Ok(())
}

/// Load the integrator config and check that `admin` signed and is its admin
/// with no transfer in flight.
fn load_as_admin(
    set: &AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
    integrator: &Pubkey,
) -> Result<(Pubkey, IntegratorConfig), EndpointError> {
    set.require_signer(admin)?;
    let (config_key, _) = find_integrator_config_address(integrator, program_id);
    let config: IntegratorConfig = set.load(&config_key, program_id)?;
    config.admin.require_settled_admin(admin)?;
    Ok((config_key, config))
}

// ============================================================================
// SETUP
// ============================================================================

/// Create the endpoint configuration.
pub fn process_initialize(
    set: &mut AccountSet,
    program_id: &Pubkey,
    chain_id: u16,
    default_recv_threshold: u8,
) -> Result<(), EndpointError> {
    if chain_id == 0 {
        return Err(EndpointError::InvalidChainId);
    }
    validate_threshold(default_recv_threshold)?;

    let (config_key, bump) = find_config_address(program_id);
    let config = EndpointConfig::new(chain_id, default_recv_threshold, bump);
    set.init(&config_key, program_id, &config)?;

    info!(
        "Endpoint initialized: chain_id={}, default_recv_threshold={}",
        chain_id, default_recv_threshold
    );
    Ok(())
}

/// Register an integrator, creating its registry and sequence tracker.
pub fn process_register(
    set: &mut AccountSet,
    program_id: &Pubkey,
    integrator: &Pubkey,
    admin: Pubkey,
) -> Result<(), EndpointError> {
    require_integrator_signer(set, integrator)?;
    let admin_state = AdminState::new(admin)?;

    let (config_key, config_bump) = find_integrator_config_address(integrator, program_id);
    set.init(
        &config_key,
        program_id,
        &IntegratorConfig::new(*integrator, admin_state, config_bump),
    )?;

    let (tracker_key, tracker_bump) = find_sequence_tracker_address(integrator, program_id);
    set.init(
        &tracker_key,
        program_id,
        &SequenceTracker::new(*integrator, tracker_bump),
    )?;

    events::emit_integrator_registered(set, program_id, integrator, &admin)?;
    Ok(())
}

// ============================================================================
// ADAPTER REGISTRY
// ============================================================================

/// Register an adapter and return its index.
pub fn process_add_adapter(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
    integrator: &Pubkey,
    adapter: &Pubkey,
) -> Result<u8, EndpointError> {
    let (config_key, mut config) = load_as_admin(set, program_id, admin, integrator)?;

    let (info_key, info_bump) = find_adapter_info_address(integrator, adapter, program_id);
    if !set.account(&info_key)?.data_is_empty() {
        return Err(EndpointError::AdapterAlreadyRegistered);
    }

    let index = config.push_adapter(info_key)?;
    set.init(
        &info_key,
        program_id,
        &AdapterInfo::new(*integrator, *adapter, index, info_bump),
    )?;
    set.store(&config_key, program_id, &config)?;

    events::emit_adapter_added(
        set,
        program_id,
        integrator,
        adapter,
        config.adapter_infos.len() as u8,
    )?;
    Ok(index)
}

/// Load the chain config for (integrator, chain), or a fresh one with the
/// endpoint's default threshold. The bool tells whether it already existed.
fn load_or_new_chain_config(
    set: &AccountSet,
    program_id: &Pubkey,
    integrator: &Pubkey,
    chain_id: u16,
) -> Result<(Pubkey, IntegratorChainConfig, bool), EndpointError> {
    let (key, bump) = find_integrator_chain_config_address(integrator, chain_id, program_id);
    match set.load_if_exists::<IntegratorChainConfig>(&key, program_id)? {
        Some(chain_config) => Ok((key, chain_config, true)),
        None => {
            let (endpoint_config_key, _) = find_config_address(program_id);
            let endpoint_config: EndpointConfig = set.load(&endpoint_config_key, program_id)?;
            let chain_config = IntegratorChainConfig::new(
                *integrator,
                chain_id,
                endpoint_config.default_recv_threshold,
                bump,
            );
            Ok((key, chain_config, false))
        }
    }
}

fn save_chain_config(
    set: &mut AccountSet,
    program_id: &Pubkey,
    key: &Pubkey,
    chain_config: &IntegratorChainConfig,
    existed: bool,
) -> Result<(), EndpointError> {
    if existed {
        set.store(key, program_id, chain_config)?;
    } else {
        set.init(key, program_id, chain_config)?;
    }
    Ok(())
}

/// Set or clear an adapter's send or receive bit for one chain.
pub fn process_set_adapter_enabled(
    set: &mut AccountSet,
    program_id: &Pubkey,
    args: &AdapterChainArgs,
    direction: Direction,
    enabled: bool,
) -> Result<(), EndpointError> {
    let integrator = &args.integrator_program_id;
    let adapter = &args.adapter_program_id;
    load_as_admin(set, program_id, &args.admin, integrator)?;

    if args.chain_id == 0 {
        return Err(EndpointError::InvalidChainId);
    }

    let (info_key, _) = find_adapter_info_address(integrator, adapter, program_id);
    let adapter_info: AdapterInfo = set
        .load_if_exists(&info_key, program_id)?
        .ok_or(EndpointError::AdapterNotRegistered)?;

    let (key, mut chain_config, existed) =
        load_or_new_chain_config(set, program_id, integrator, args.chain_id)?;
    if !enabled && !existed {
        return Err(EndpointError::AdapterAlreadyDisabled);
    }

    let bitmap = match direction {
        Direction::Send => &mut chain_config.send_adapter_bitmap,
        Direction::Recv => &mut chain_config.recv_adapter_bitmap,
    };
    if bitmap.get(adapter_info.index)? == enabled {
        return Err(if enabled {
            EndpointError::AdapterAlreadyEnabled
        } else {
            EndpointError::AdapterAlreadyDisabled
        });
    }
    bitmap.set(adapter_info.index, enabled)?;

    save_chain_config(set, program_id, &key, &chain_config, existed)?;
    events::emit_adapter_toggled(set, program_id, direction, enabled, integrator, args.chain_id, adapter)?;
    Ok(())
}

fn validate_threshold(threshold: u8) -> Result<(), EndpointError> {
    if threshold == 0 || usize::from(threshold) > MAX_ADAPTERS {
        return Err(EndpointError::InvalidThreshold);
    }
    Ok(())
}

/// Set the receive quorum for one chain.
pub fn process_set_recv_threshold(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
    integrator: &Pubkey,
    chain_id: u16,
    threshold: u8,
) -> Result<(), EndpointError> {
    load_as_admin(set, program_id, admin, integrator)?;
    if chain_id == 0 {
        return Err(EndpointError::InvalidChainId);
    }
    validate_threshold(threshold)?;

    let (key, mut chain_config, existed) =
        load_or_new_chain_config(set, program_id, integrator, chain_id)?;
    chain_config.recv_threshold = threshold;
    save_chain_config(set, program_id, &key, &chain_config, existed)?;

    events::emit_recv_threshold_updated(set, program_id, integrator, chain_id, threshold)?;
    Ok(())
}

// ============================================================================
// ADMIN GOVERNANCE
// ============================================================================

fn load_integrator_config(
    set: &AccountSet,
    program_id: &Pubkey,
    integrator: &Pubkey,
) -> Result<(Pubkey, IntegratorConfig), EndpointError> {
    let (key, _) = find_integrator_config_address(integrator, program_id);
    let config = set.load(&key, program_id)?;
    Ok((key, config))
}

pub fn process_transfer_admin(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
    integrator: &Pubkey,
    new_admin: Pubkey,
) -> Result<(), EndpointError> {
    set.require_signer(admin)?;
    let (key, mut config) = load_integrator_config(set, program_id, integrator)?;
    let change = config.admin.transfer_admin(admin, new_admin)?;
    set.store(&key, program_id, &config)?;

    events::emit_admin_update_requested(set, program_id, integrator, &change.old_admin, &new_admin)?;
    Ok(())
}

pub fn process_claim_admin(
    set: &mut AccountSet,
    program_id: &Pubkey,
    new_admin: &Pubkey,
    integrator: &Pubkey,
) -> Result<(), EndpointError> {
    set.require_signer(new_admin)?;
    let (key, mut config) = load_integrator_config(set, program_id, integrator)?;
    let change = config.admin.claim_admin(new_admin)?;
    set.store(&key, program_id, &config)?;

    events::emit_admin_updated(set, program_id, integrator, &change.old_admin, new_admin)?;
    Ok(())
}

pub fn process_update_admin(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
    integrator: &Pubkey,
    new_admin: Pubkey,
) -> Result<(), EndpointError> {
    set.require_signer(admin)?;
    let (key, mut config) = load_integrator_config(set, program_id, integrator)?;
    let change = config.admin.update_admin(admin, new_admin)?;
    set.store(&key, program_id, &config)?;

    events::emit_admin_updated(set, program_id, integrator, &change.old_admin, &new_admin)?;
    Ok(())
}

pub fn process_discard_admin(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
    integrator: &Pubkey,
) -> Result<(), EndpointError> {
    set.require_signer(admin)?;
    let (key, mut config) = load_integrator_config(set, program_id, integrator)?;
    config.admin.discard_admin(admin)?;
    set.store(&key, program_id, &config)?;

    events::emit_admin_discarded(set, program_id, integrator)?;
    Ok(())
}

pub fn process_cancel_admin_transfer(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
    integrator: &Pubkey,
) -> Result<(), EndpointError> {
    set.require_signer(admin)?;
    let (key, mut config) = load_integrator_config(set, program_id, integrator)?;
    let change = config.admin.cancel_admin_transfer(admin)?;
    set.store(&key, program_id, &config)?;

    events::emit_admin_updated(set, program_id, integrator, &change.old_admin, admin)?;
    Ok(())
}

// ============================================================================
// SEND PATH
// ============================================================================

/// Queue an outbound message and return its sequence.
pub fn process_send_message(
    set: &mut AccountSet,
    program_id: &Pubkey,
    integrator: &Pubkey,
    outbox_key: &Pubkey,
    dst_chain: u16,
    dst_addr: UniversalAddress,
    payload_hash: [u8; 32],
) -> Result<u64, EndpointError> {
    require_integrator_signer(set, integrator)?;
    set.require_signer(outbox_key)?;

    let (chain_config_key, _) = find_integrator_chain_config_address(integrator, dst_chain, program_id);
    let send_bitmap = set
        .load_if_exists::<IntegratorChainConfig>(&chain_config_key, program_id)?
        .map(|chain_config| chain_config.send_adapter_bitmap)
        .unwrap_or_default();
    if send_bitmap.is_empty() {
        return Err(EndpointError::AdapterNotEnabled);
    }

    let (tracker_key, _) = find_sequence_tracker_address(integrator, program_id);
    let mut tracker: SequenceTracker = set.load(&tracker_key, program_id)?;
    let sequence = tracker.next()?;
    set.store(&tracker_key, program_id, &tracker)?;

    let outbox = OutboxMessage::new(
        UniversalAddress::from(integrator),
        sequence,
        dst_chain,
        dst_addr,
        payload_hash,
        send_bitmap,
        *set.payer(),
    );
    set.init(outbox_key, program_id, &outbox)?;

    events::emit_message_sent(set, program_id, &outbox)?;
    Ok(sequence)
}

/// Clear the adapter's outstanding bit. The outbox is closed and its deposit
/// refunded once no adapter is left. Returns the outbox as of this pickup.
pub fn process_pick_up_message(
    set: &mut AccountSet,
    program_id: &Pubkey,
    outbox_key: &Pubkey,
    adapter: &Pubkey,
    refund_recipient: &Pubkey,
) -> Result<OutboxMessage, EndpointError> {
    require_adapter_signer(set, adapter)?;

    // A closed outbox means every adapter, this one included, already picked it up
    let mut outbox: OutboxMessage = set
        .load_if_exists(outbox_key, program_id)?
        .ok_or(EndpointError::MessageAlreadyPickedUp)?;
    if outbox.refund_recipient != *refund_recipient {
        return Err(EndpointError::InvalidRefundRecipient);
    }

    let (info_key, _) = find_adapter_info_address(&outbox.src_addr.to_pubkey(), adapter, program_id);
    let adapter_info: AdapterInfo = set
        .load_if_exists(&info_key, program_id)?
        .ok_or(EndpointError::AdapterNotRegistered)?;

    if !outbox.outstanding_adapters.get(adapter_info.index)? {
        return Err(EndpointError::MessageAlreadyPickedUp);
    }
    outbox.outstanding_adapters.set(adapter_info.index, false)?;
    events::emit_message_picked_up(set, program_id, &outbox, adapter)?;

    if outbox.outstanding_adapters.is_empty() {
        let refunded = set.close(outbox_key, refund_recipient)?;
        info!(
            "Outbox closed: outbox={}, refunded {} lamports to {}",
            outbox_key, refunded, refund_recipient
        );
    } else {
        set.store(outbox_key, program_id, &outbox)?;
    }
    Ok(outbox)
}

// ============================================================================
// RECEIVE PATH
// ============================================================================

fn require_local_destination(
    set: &AccountSet,
    program_id: &Pubkey,
    message: &Message,
) -> Result<(), EndpointError> {
    let (config_key, _) = find_config_address(program_id);
    let config: EndpointConfig = set.load(&config_key, program_id)?;
    if message.dst_chain != config.chain_id {
        warn!(
            "Rejected: message for chain {} delivered to chain {}",
            message.dst_chain, config.chain_id
        );
        return Err(EndpointError::InvalidDestinationChain);
    }
    Ok(())
}

/// Record the adapter's attestation and return the updated attested bitmap.
pub fn process_attest_message(
    set: &mut AccountSet,
    program_id: &Pubkey,
    adapter: &Pubkey,
    message: &Message,
) -> Result<Bitmap, EndpointError> {
    require_adapter_signer(set, adapter)?;
    require_local_destination(set, program_id, message)?;

    let integrator = message.dst_addr.to_pubkey();
    let (info_key, _) = find_adapter_info_address(&integrator, adapter, program_id);
    let (chain_config_key, _) =
        find_integrator_chain_config_address(&integrator, message.src_chain, program_id);
    let adapter_info = set.load_if_exists::<AdapterInfo>(&info_key, program_id)?;
    let chain_config = set.load_if_exists::<IntegratorChainConfig>(&chain_config_key, program_id)?;
    let index = match (adapter_info, chain_config) {
        (Some(info), Some(chain_config)) if chain_config.recv_adapter_bitmap.get(info.index)? => info.index,
        _ => {
            warn!(
                "Rejected: adapter {} is not receive-enabled for chain {}",
                adapter, message.src_chain
            );
            return Err(EndpointError::AdapterNotEnabled);
        }
    };

    let message_hash = message.hash();
    let (attestation_key, bump) = find_attestation_info_address(&message_hash, program_id);
    let existing = set.load_if_exists::<AttestationInfo>(&attestation_key, program_id)?;
    let existed = existing.is_some();
    let mut attestation = existing.unwrap_or_else(|| AttestationInfo::new(message, bump));

    if attestation.attested_adapters.get(index)? {
        warn!(
            "Rejected: duplicate attestation by {} for {}",
            adapter,
            hex::encode(message_hash)
        );
        return Err(EndpointError::DuplicateMessageAttestation);
    }
    attestation.attested_adapters.set(index, true)?;

    if existed {
        set.store(&attestation_key, program_id, &attestation)?;
    } else {
        set.init(&attestation_key, program_id, &attestation)?;
    }

    events::emit_message_attested_to(
        set,
        program_id,
        &message_hash,
        message,
        attestation.attested_adapters,
        adapter,
    )?;
    Ok(attestation.attested_adapters)
}

/// Shared validation of `recv_message` and `exec_message`.
fn check_deliverable(
    set: &AccountSet,
    program_id: &Pubkey,
    message: &Message,
) -> Result<(Pubkey, AttestationInfo, Bitmap), EndpointError> {
    let integrator = message.dst_addr.to_pubkey();
    require_integrator_signer(set, &integrator)?;

    require_local_destination(set, program_id, message)?;

    let message_hash = message.hash();
    let (attestation_key, _) = find_attestation_info_address(&message_hash, program_id);
    let attestation: AttestationInfo = set
        .load_if_exists(&attestation_key, program_id)?
        .ok_or(EndpointError::UnknownMessageAttestation)?;
    if attestation.message_hash != message_hash || attestation.message() != *message {
        return Err(EndpointError::InvalidMessageHash);
    }
    if attestation.executed {
        return Err(EndpointError::AlreadyExecuted);
    }

    let (_, chain_config, _) =
        load_or_new_chain_config(set, program_id, &integrator, message.src_chain)?;
    if !chain_config.quorum_met(&attestation.attested_adapters) {
        return Err(EndpointError::InsufficientAttestations);
    }
    Ok((attestation_key, attestation, chain_config.recv_adapter_bitmap))
}

/// Report whether the message can be executed. Returns (enabled, attested).
pub fn process_recv_message(
    set: &mut AccountSet,
    program_id: &Pubkey,
    message: &Message,
) -> Result<(Bitmap, Bitmap), EndpointError> {
    let (_, attestation, enabled) = check_deliverable(set, program_id, message)?;
    events::emit_message_received(
        set,
        program_id,
        &attestation.message_hash,
        message,
        enabled,
        attestation.attested_adapters,
    )?;
    Ok((enabled, attestation.attested_adapters))
}

/// Latch the message as executed.
pub fn process_exec_message(
    set: &mut AccountSet,
    program_id: &Pubkey,
    message: &Message,
) -> Result<(), EndpointError> {
    let (attestation_key, mut attestation, _) = check_deliverable(set, program_id, message)?;
    attestation.executed = true;
    set.store(&attestation_key, program_id, &attestation)?;

    events::emit_message_executed(set, program_id, &attestation.message_hash, message)?;
    Ok(())
}

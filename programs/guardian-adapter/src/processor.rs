//! Instruction processor for the guardian adapter program.
//!
//! Pickup and receive run the endpoint's processor inside the same ledger
//! transaction, signing as the adapter's ["adapter_pda"], so the endpoint
//! update and the adapter's own writes commit or fail together.

use account_ledger::{AccountSet, Ledger, Signer};
use borsh::BorshDeserialize;
use messaging_endpoint::governance::AdminState;
use messaging_endpoint::peer::validate_new_peer;
use messaging_endpoint::processor as endpoint;
use messaging_endpoint::{OutboxMessage, UniversalAddress};
use solana_program::pubkey::Pubkey;
use tracing::{info, warn};

use crate::error::GuardianAdapterError;
use crate::events;
use crate::instruction::GuardianAdapterInstruction;
use crate::message::{GuardianMessage, PostedVaa};
use crate::state::{
    find_config_address, find_emitter_address, find_emitter_sequence_address,
    find_fee_collector_address, find_peer_address, find_posted_message_address, seeds, Config,
    ConsistencyLevel, EmitterSequence, Peer, PostedMessage,
};

/// Program entrypoint processor.
pub fn process_instruction(
    ledger: &Ledger,
    program_id: &Pubkey,
    payer: &Signer,
    signers: &[Signer],
    instruction_data: &[u8],
) -> Result<(), GuardianAdapterError> {
    let instruction = GuardianAdapterInstruction::try_from_slice(instruction_data)
        .map_err(|_| GuardianAdapterError::InvalidInstructionData)?;
    let accounts = instruction.accounts(program_id);

    ledger.transact(payer, signers, &accounts, |set| {
        dispatch(set, program_id, instruction)
    })
}

fn dispatch(
    set: &mut AccountSet,
    program_id: &Pubkey,
    instruction: GuardianAdapterInstruction,
) -> Result<(), GuardianAdapterError> {
    match instruction {
        GuardianAdapterInstruction::Initialize {
            admin,
            endpoint_program,
            guardian_program,
            chain_id,
            consistency_level,
            message_fee,
        } => {
            info!("Instruction: Initialize");
            process_initialize(
                set,
                program_id,
                admin,
                endpoint_program,
                guardian_program,
                chain_id,
                consistency_level,
                message_fee,
            )
        }
        GuardianAdapterInstruction::TransferAdmin { admin, new_admin } => {
            info!("Instruction: TransferAdmin");
            process_transfer_admin(set, program_id, &admin, new_admin)
        }
        GuardianAdapterInstruction::ClaimAdmin { new_admin } => {
            info!("Instruction: ClaimAdmin");
            process_claim_admin(set, program_id, &new_admin)
        }
        GuardianAdapterInstruction::UpdateAdmin { admin, new_admin } => {
            info!("Instruction: UpdateAdmin");
            process_update_admin(set, program_id, &admin, new_admin)
        }
        GuardianAdapterInstruction::DiscardAdmin { admin } => {
            info!("Instruction: DiscardAdmin");
            process_discard_admin(set, program_id, &admin)
        }
        GuardianAdapterInstruction::CancelAdminTransfer { admin } => {
            info!("Instruction: CancelAdminTransfer");
            process_cancel_admin_transfer(set, program_id, &admin)
        }
        GuardianAdapterInstruction::SetPeer {
            admin,
            chain,
            contract,
        } => {
            info!("Instruction: SetPeer");
            process_set_peer(set, program_id, &admin, chain, contract)
        }
        GuardianAdapterInstruction::PickUpMessage {
            endpoint_program,
            outbox_message,
            integrator_program_id,
            sequence,
            refund_recipient,
        } => {
            info!("Instruction: PickUpMessage");
            process_pick_up_message(
                set,
                program_id,
                &endpoint_program,
                &outbox_message,
                &integrator_program_id,
                sequence,
                &refund_recipient,
            )
        }
        GuardianAdapterInstruction::ReceiveMessage {
            endpoint_program,
            vaa,
        } => {
            info!("Instruction: ReceiveMessage");
            process_receive_message(set, program_id, &endpoint_program, &vaa)
        }
    }
}

fn load_config(set: &AccountSet, program_id: &Pubkey) -> Result<(Pubkey, Config), GuardianAdapterError> {
    let (key, _) = find_config_address(program_id);
    let config = set.load(&key, program_id)?;
    Ok((key, config))
}

fn require_endpoint(config: &Config, endpoint_program: &Pubkey) -> Result<(), GuardianAdapterError> {
    if config.endpoint_program != *endpoint_program {
        warn!(
            "Rejected: endpoint {} is not the configured endpoint {}",
            endpoint_program, config.endpoint_program
        );
        return Err(GuardianAdapterError::InvalidEndpointProgram);
    }
    Ok(())
}

// ============================================================================
// SETUP AND ADMIN
// ============================================================================

#[allow(clippy::too_many_arguments)]
pub fn process_initialize(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: Pubkey,
    endpoint_program: Pubkey,
    guardian_program: Pubkey,
    chain_id: u16,
    consistency_level: ConsistencyLevel,
    message_fee: u64,
) -> Result<(), GuardianAdapterError> {
    let admin_state = AdminState::new(admin)?;
    if chain_id == 0 {
        return Err(GuardianAdapterError::InvalidChain);
    }

    let (config_key, bump) = find_config_address(program_id);
    let config = Config::new(
        admin_state,
        endpoint_program,
        guardian_program,
        chain_id,
        consistency_level,
        message_fee,
        bump,
    );
    set.init(&config_key, program_id, &config)?;

    info!(
        "Adapter initialized: chain_id={}, endpoint={}, admin={}",
        chain_id, endpoint_program, admin
    );
    Ok(())
}

pub fn process_transfer_admin(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
    new_admin: Pubkey,
) -> Result<(), GuardianAdapterError> {
    set.require_signer(admin)?;
    let (key, mut config) = load_config(set, program_id)?;
    let change = config.admin.transfer_admin(admin, new_admin)?;
    set.store(&key, program_id, &config)?;

    events::emit_admin_update_requested(set, program_id, &change.old_admin, &new_admin)?;
    Ok(())
}

pub fn process_claim_admin(
    set: &mut AccountSet,
    program_id: &Pubkey,
    new_admin: &Pubkey,
) -> Result<(), GuardianAdapterError> {
    set.require_signer(new_admin)?;
    let (key, mut config) = load_config(set, program_id)?;
    let change = config.admin.claim_admin(new_admin)?;
    set.store(&key, program_id, &config)?;

    events::emit_admin_updated(set, program_id, &change.old_admin, new_admin)?;
    Ok(())
}

pub fn process_update_admin(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
    new_admin: Pubkey,
) -> Result<(), GuardianAdapterError> {
    set.require_signer(admin)?;
    let (key, mut config) = load_config(set, program_id)?;
    let change = config.admin.update_admin(admin, new_admin)?;
    set.store(&key, program_id, &config)?;

    events::emit_admin_updated(set, program_id, &change.old_admin, &new_admin)?;
    Ok(())
}

pub fn process_discard_admin(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
) -> Result<(), GuardianAdapterError> {
    set.require_signer(admin)?;
    let (key, mut config) = load_config(set, program_id)?;
    let change = config.admin.discard_admin(admin)?;
    set.store(&key, program_id, &config)?;

    events::emit_admin_discarded(set, program_id, &change.old_admin)?;
    Ok(())
}

pub fn process_cancel_admin_transfer(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
) -> Result<(), GuardianAdapterError> {
    set.require_signer(admin)?;
    let (key, mut config) = load_config(set, program_id)?;
    let change = config.admin.cancel_admin_transfer(admin)?;
    set.store(&key, program_id, &config)?;

    events::emit_admin_updated(set, program_id, &change.old_admin, admin)?;
    Ok(())
}

// ============================================================================
// PEERS
// ============================================================================

pub fn process_set_peer(
    set: &mut AccountSet,
    program_id: &Pubkey,
    admin: &Pubkey,
    chain: u16,
    contract: UniversalAddress,
) -> Result<(), GuardianAdapterError> {
    set.require_signer(admin)?;
    let (_, config) = load_config(set, program_id)?;
    config.admin.require_settled_admin(admin)?;

    let (peer_key, bump) = find_peer_address(chain, program_id);
    let existing = !set.account(&peer_key)?.data_is_empty();
    validate_new_peer(chain, &contract, existing)?;

    set.init(&peer_key, program_id, &Peer::new(chain, contract, bump))?;
    events::emit_peer_added(set, program_id, chain, &contract)?;
    Ok(())
}

// ============================================================================
// MESSAGING
// ============================================================================

/// Pick up an outbox message from the endpoint, charge the delivery fee and
/// post the encoded message under the adapter's emitter.
///
/// `integrator` and `sequence` name the outbox's message and must match it.
#[allow(clippy::too_many_arguments)]
pub fn process_pick_up_message(
    set: &mut AccountSet,
    program_id: &Pubkey,
    endpoint_program: &Pubkey,
    outbox_key: &Pubkey,
    integrator: &Pubkey,
    sequence: u64,
    refund_recipient: &Pubkey,
) -> Result<(), GuardianAdapterError> {
    let (_, config) = load_config(set, program_id)?;
    require_endpoint(&config, endpoint_program)?;

    // A closed outbox is left to the endpoint to reject
    if let Some(outbox) = set.load_if_exists::<OutboxMessage>(outbox_key, endpoint_program)? {
        if outbox.src_addr != UniversalAddress::from(integrator) || outbox.sequence != sequence {
            warn!(
                "Rejected: outbox {} holds {}#{}, declared {}#{}",
                outbox_key, outbox.src_addr, outbox.sequence, integrator, sequence
            );
            return Err(GuardianAdapterError::InvalidOutboxMessage);
        }
    }

    set.sign_as_program(&[seeds::ADAPTER_SIGNER_SEED], program_id);
    let outbox = endpoint::process_pick_up_message(
        set,
        endpoint_program,
        outbox_key,
        program_id,
        refund_recipient,
    )?;

    if config.message_fee > 0 {
        let payer = *set.payer();
        let (fee_collector, _) = find_fee_collector_address(program_id);
        set.transfer(&payer, &fee_collector, config.message_fee)?;
    }

    let (emitter, _) = find_emitter_address(program_id);
    let (sequence_key, sequence_bump) = find_emitter_sequence_address(&emitter, program_id);
    let (mut emitter_sequence, existed) =
        match set.load_if_exists::<EmitterSequence>(&sequence_key, program_id)? {
            Some(emitter_sequence) => (emitter_sequence, true),
            None => (EmitterSequence::new(sequence_bump), false),
        };
    let posted_sequence = emitter_sequence.next()?;
    if existed {
        set.store(&sequence_key, program_id, &emitter_sequence)?;
    } else {
        set.init(&sequence_key, program_id, &emitter_sequence)?;
    }

    let payload = GuardianMessage::from(&outbox).encode();
    let (message_key, message_bump) = find_posted_message_address(integrator, sequence, program_id);
    let posted = PostedMessage::new(
        emitter,
        posted_sequence,
        config.consistency_level,
        payload,
        message_bump,
    );
    set.init(&message_key, program_id, &posted)?;

    events::emit_message_posted(
        set,
        program_id,
        outbox_key,
        &emitter,
        posted_sequence,
        config.consistency_level,
        &posted.payload,
    )?;
    Ok(())
}

/// Check a verified VAA against the registered peer and attest its message
/// to the endpoint.
pub fn process_receive_message(
    set: &mut AccountSet,
    program_id: &Pubkey,
    endpoint_program: &Pubkey,
    vaa: &PostedVaa,
) -> Result<(), GuardianAdapterError> {
    let (_, config) = load_config(set, program_id)?;
    require_endpoint(&config, endpoint_program)?;

    if vaa.verified_by != config.guardian_program {
        warn!("Rejected: VAA verified by unknown program {}", vaa.verified_by);
        return Err(GuardianAdapterError::InvalidVaa);
    }
    let message = GuardianMessage::decode(&vaa.payload)?;

    let (peer_key, _) = find_peer_address(vaa.emitter_chain, program_id);
    let peer = set.load_if_exists::<Peer>(&peer_key, program_id)?;
    let trusted = match peer {
        Some(peer) => peer.verify_emitter(&vaa.emitter_address).is_ok(),
        None => false,
    };
    if !trusted {
        warn!(
            "Rejected: emitter {} is not the peer for chain {}",
            vaa.emitter_address, vaa.emitter_chain
        );
        return Err(GuardianAdapterError::InvalidPeer);
    }

    if message.dst_chain != config.chain_id {
        return Err(GuardianAdapterError::InvalidChain);
    }

    set.sign_as_program(&[seeds::ADAPTER_SIGNER_SEED], program_id);
    let endpoint_message = message.to_endpoint_message(vaa.emitter_chain);
    endpoint::process_attest_message(set, endpoint_program, program_id, &endpoint_message)?;

    info!(
        "VAA attested: emitter_chain={}, vaa_sequence={}, message_sequence={}",
        vaa.emitter_chain, vaa.sequence, message.sequence
    );
    Ok(())
}

//! Read-only views over endpoint state. No authorization required.

use account_ledger::Ledger;
use solana_program::pubkey::Pubkey;

use crate::error::EndpointError;
use crate::message::Message;
use crate::state::{
    find_attestation_info_address, find_config_address, find_integrator_chain_config_address,
    find_integrator_config_address, find_sequence_tracker_address, AdapterInfo, AttestationInfo,
    EndpointConfig, IntegratorChainConfig, IntegratorConfig, OutboxMessage, SequenceTracker,
};

pub fn get_endpoint_config(
    ledger: &Ledger,
    program_id: &Pubkey,
) -> Result<Option<EndpointConfig>, EndpointError> {
    let (key, _) = find_config_address(program_id);
    Ok(ledger.read_state(&key, program_id)?)
}

pub fn get_integrator_config(
    ledger: &Ledger,
    program_id: &Pubkey,
    integrator: &Pubkey,
) -> Result<Option<IntegratorConfig>, EndpointError> {
    let (key, _) = find_integrator_config_address(integrator, program_id);
    Ok(ledger.read_state(&key, program_id)?)
}

/// Registered adapters of an integrator, in index order.
pub fn get_adapters(
    ledger: &Ledger,
    program_id: &Pubkey,
    integrator: &Pubkey,
) -> Result<Vec<AdapterInfo>, EndpointError> {
    let Some(config) = get_integrator_config(ledger, program_id, integrator)? else {
        return Ok(Vec::new());
    };
    let mut adapters = Vec::with_capacity(config.adapter_infos.len());
    for key in &config.adapter_infos {
        if let Some(info) = ledger.read_state::<AdapterInfo>(key, program_id)? {
            adapters.push(info);
        }
    }
    Ok(adapters)
}

pub fn get_chain_config(
    ledger: &Ledger,
    program_id: &Pubkey,
    integrator: &Pubkey,
    chain_id: u16,
) -> Result<Option<IntegratorChainConfig>, EndpointError> {
    let (key, _) = find_integrator_chain_config_address(integrator, chain_id, program_id);
    Ok(ledger.read_state(&key, program_id)?)
}

/// Sequence the integrator's next send will use.
pub fn get_next_sequence(
    ledger: &Ledger,
    program_id: &Pubkey,
    integrator: &Pubkey,
) -> Result<Option<u64>, EndpointError> {
    let (key, _) = find_sequence_tracker_address(integrator, program_id);
    Ok(ledger
        .read_state::<SequenceTracker>(&key, program_id)?
        .map(|tracker| tracker.sequence))
}

pub fn get_outbox_message(
    ledger: &Ledger,
    program_id: &Pubkey,
    outbox: &Pubkey,
) -> Result<Option<OutboxMessage>, EndpointError> {
    Ok(ledger.read_state(outbox, program_id)?)
}

pub fn get_attestation_info(
    ledger: &Ledger,
    program_id: &Pubkey,
    message: &Message,
) -> Result<Option<AttestationInfo>, EndpointError> {
    let (key, _) = find_attestation_info_address(&message.hash(), program_id);
    Ok(ledger.read_state(&key, program_id)?)
}

//! Read-only views over adapter state.

use account_ledger::{AccountState, Ledger, LedgerError};
use solana_program::pubkey::Pubkey;

use crate::error::GuardianAdapterError;
use crate::state::{
    find_config_address, find_peer_address, find_posted_message_address, Config,
    ConsistencyLevel, Peer, PostedMessage,
};

pub const ADAPTER_TYPE: &str = "guardian";

pub fn get_config(ledger: &Ledger, program_id: &Pubkey) -> Result<Option<Config>, GuardianAdapterError> {
    let (key, _) = find_config_address(program_id);
    Ok(ledger.read_state(&key, program_id)?)
}

fn require_config(ledger: &Ledger, program_id: &Pubkey) -> Result<Config, GuardianAdapterError> {
    let (key, _) = find_config_address(program_id);
    Ok(ledger
        .read_state(&key, program_id)?
        .ok_or(LedgerError::AccountNotInitialized)?)
}

pub fn get_peer(
    ledger: &Ledger,
    program_id: &Pubkey,
    chain: u16,
) -> Result<Option<Peer>, GuardianAdapterError> {
    let (key, _) = find_peer_address(chain, program_id);
    Ok(ledger.read_state(&key, program_id)?)
}

/// Every registered peer, ordered by chain.
pub fn get_peers(ledger: &Ledger, program_id: &Pubkey) -> Result<Vec<Peer>, GuardianAdapterError> {
    let mut peers = Vec::new();
    for (_, account) in ledger.program_accounts(program_id)? {
        if account.data.first() == Some(&Peer::DISCRIMINATOR) {
            peers.push(Peer::unpack(&account, program_id)?);
        }
    }
    peers.sort_by_key(|peer| peer.chain);
    Ok(peers)
}

/// The message posted for `integrator`'s outbound message `sequence`.
pub fn get_posted_message(
    ledger: &Ledger,
    program_id: &Pubkey,
    integrator: &Pubkey,
    sequence: u64,
) -> Result<Option<PostedMessage>, GuardianAdapterError> {
    let (key, _) = find_posted_message_address(integrator, sequence, program_id);
    Ok(ledger.read_state(&key, program_id)?)
}

pub fn our_chain(ledger: &Ledger, program_id: &Pubkey) -> Result<u16, GuardianAdapterError> {
    Ok(require_config(ledger, program_id)?.chain_id)
}

pub fn consistency_level(
    ledger: &Ledger,
    program_id: &Pubkey,
) -> Result<ConsistencyLevel, GuardianAdapterError> {
    Ok(require_config(ledger, program_id)?.consistency_level)
}

/// Price of delivering one message to `chain`. The fee is flat across chains.
pub fn quote_delivery_price(
    ledger: &Ledger,
    program_id: &Pubkey,
    chain: u16,
) -> Result<u64, GuardianAdapterError> {
    if chain == 0 {
        return Err(GuardianAdapterError::InvalidChain);
    }
    Ok(require_config(ledger, program_id)?.message_fee)
}

pub fn adapter_type() -> &'static str {
    ADAPTER_TYPE
}

pub fn version_string() -> String {
    format!("GuardianAdapter-{}", env!("CARGO_PKG_VERSION"))
}

pub fn get_admin(ledger: &Ledger, program_id: &Pubkey) -> Result<Option<Pubkey>, GuardianAdapterError> {
    Ok(require_config(ledger, program_id)?.admin.admin)
}

pub fn get_pending_admin(
    ledger: &Ledger,
    program_id: &Pubkey,
) -> Result<Option<Pubkey>, GuardianAdapterError> {
    Ok(require_config(ledger, program_id)?.admin.pending_admin)
}

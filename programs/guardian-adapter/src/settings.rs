//! Adapter deployment from the shared endpoint settings file.

use anyhow::Context;
use messaging_endpoint::config::EndpointSettings;
use solana_program::pubkey::Pubkey;

use crate::instruction::GuardianAdapterInstruction;
use crate::state::ConsistencyLevel;

/// The adapter `Initialize` instruction for the `[guardian_adapter]` section.
pub fn initialize_instruction(
    settings: &EndpointSettings,
    admin: Pubkey,
    endpoint_program: Pubkey,
    guardian_program: Pubkey,
) -> anyhow::Result<GuardianAdapterInstruction> {
    let section = settings
        .guardian_adapter
        .as_ref()
        .context("Configuration error: [guardian_adapter] section is missing")?;
    let consistency_level = ConsistencyLevel::from_name(&section.consistency_level).with_context(|| {
        format!(
            "Configuration error: unknown guardian_adapter.consistency_level '{}'",
            section.consistency_level
        )
    })?;

    Ok(GuardianAdapterInstruction::Initialize {
        admin,
        endpoint_program,
        guardian_program,
        chain_id: section.chain_id,
        consistency_level,
        message_fee: section.message_fee,
    })
}

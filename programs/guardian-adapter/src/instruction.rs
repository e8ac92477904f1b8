//! Instruction definitions for the guardian adapter program.

use borsh::{BorshDeserialize, BorshSerialize};
use messaging_endpoint::{EndpointInstruction, UniversalAddress};
use solana_program::pubkey::Pubkey;

use crate::message::{GuardianMessage, PostedVaa};
use crate::state::{
    find_config_address, find_emitter_address, find_emitter_sequence_address,
    find_fee_collector_address, find_peer_address, find_posted_message_address, ConsistencyLevel,
};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum GuardianAdapterInstruction {
    /// Create the adapter configuration.
    ///
    /// Accounts:
    /// 0. `[writable]` Config (PDA: ["config"])
    Initialize {
        admin: Pubkey,
        endpoint_program: Pubkey,
        guardian_program: Pubkey,
        chain_id: u16,
        consistency_level: ConsistencyLevel,
        message_fee: u64,
    },

    /// Start a two-step admin transfer. `admin` must sign.
    ///
    /// Accounts:
    /// 0. `[writable]` Config
    TransferAdmin { admin: Pubkey, new_admin: Pubkey },

    /// Complete a pending transfer. `new_admin` must sign.
    ClaimAdmin { new_admin: Pubkey },

    /// Replace the admin in one step. `admin` must sign.
    UpdateAdmin { admin: Pubkey, new_admin: Pubkey },

    /// Give up the admin role for good. `admin` must sign.
    DiscardAdmin { admin: Pubkey },

    /// Abort a pending transfer. `admin` must sign.
    CancelAdminTransfer { admin: Pubkey },

    /// Register the adapter contract on a remote chain. `admin` must sign.
    ///
    /// Accounts:
    /// 0. `[]` Config
    /// 1. `[writable]` Peer (PDA: ["peer", chain BE])
    SetPeer {
        admin: Pubkey,
        chain: u16,
        contract: UniversalAddress,
    },

    /// Pick a message up from the endpoint outbox and post it for the guardians.
    ///
    /// Accounts:
    /// 0. `[]` Config
    /// 1. `[writable]` Fee collector (PDA: ["fee_collector"])
    /// 2. `[writable]` Posted message (PDA: ["message", integrator, sequence])
    /// 3. `[writable]` Emitter sequence (PDA: ["sequence", emitter])
    /// 4.. The endpoint's `PickUpMessage` accounts
    PickUpMessage {
        endpoint_program: Pubkey,
        outbox_message: Pubkey,
        /// Sender of the outbox message
        integrator_program_id: Pubkey,
        /// Sequence of the outbox message
        sequence: u64,
        refund_recipient: Pubkey,
    },

    /// Attest a guardian-verified message to the endpoint.
    ///
    /// Accounts:
    /// 0. `[]` Config
    /// 1. `[]` Peer for the VAA's emitter chain
    /// 2.. The endpoint's `AttestMessage` accounts (when the payload decodes)
    ReceiveMessage {
        endpoint_program: Pubkey,
        vaa: PostedVaa,
    },
}

impl GuardianAdapterInstruction {
    /// Account keys the instruction locks, including the endpoint accounts it
    /// calls into.
    pub fn accounts(&self, program_id: &Pubkey) -> Vec<Pubkey> {
        let config = find_config_address(program_id).0;

        match self {
            GuardianAdapterInstruction::Initialize { .. }
            | GuardianAdapterInstruction::TransferAdmin { .. }
            | GuardianAdapterInstruction::ClaimAdmin { .. }
            | GuardianAdapterInstruction::UpdateAdmin { .. }
            | GuardianAdapterInstruction::DiscardAdmin { .. }
            | GuardianAdapterInstruction::CancelAdminTransfer { .. } => vec![config],
            GuardianAdapterInstruction::SetPeer { chain, .. } => {
                vec![config, find_peer_address(*chain, program_id).0]
            }
            GuardianAdapterInstruction::PickUpMessage {
                endpoint_program,
                outbox_message,
                integrator_program_id,
                sequence,
                refund_recipient,
            } => {
                let emitter = find_emitter_address(program_id).0;
                let mut keys = vec![
                    config,
                    find_fee_collector_address(program_id).0,
                    find_posted_message_address(integrator_program_id, *sequence, program_id).0,
                    find_emitter_sequence_address(&emitter, program_id).0,
                ];
                keys.extend(
                    EndpointInstruction::PickUpMessage {
                        outbox_message: *outbox_message,
                        adapter_program_id: *program_id,
                        integrator_program_id: *integrator_program_id,
                        refund_recipient: *refund_recipient,
                    }
                    .accounts(endpoint_program),
                );
                keys
            }
            GuardianAdapterInstruction::ReceiveMessage {
                endpoint_program,
                vaa,
            } => {
                let mut keys = vec![config, find_peer_address(vaa.emitter_chain, program_id).0];
                if let Ok(message) = GuardianMessage::decode(&vaa.payload) {
                    keys.extend(
                        EndpointInstruction::AttestMessage {
                            adapter_program_id: *program_id,
                            message: message.to_endpoint_message(vaa.emitter_chain),
                        }
                        .accounts(endpoint_program),
                    );
                }
                keys
            }
        }
    }
}

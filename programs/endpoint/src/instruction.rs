//! Instruction definitions for the messaging endpoint program.
//!
//! Every variant documents the accounts it touches. `accounts` derives the
//! same list so callers can declare the transaction's account set.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::address::UniversalAddress;
use crate::message::Message;
use crate::state::{
    find_adapter_info_address, find_attestation_info_address, find_config_address,
    find_integrator_chain_config_address, find_integrator_config_address,
    find_sequence_tracker_address,
};

/// Arguments shared by the four adapter enable/disable instructions.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdapterChainArgs {
    /// Integrator admin (must sign)
    pub admin: Pubkey,
    pub integrator_program_id: Pubkey,
    pub adapter_program_id: Pubkey,
    pub chain_id: u16,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum EndpointInstruction {
    /// Create the endpoint configuration.
    ///
    /// Accounts:
    /// 0. `[writable]` Config (PDA: ["config"])
    Initialize {
        /// This chain's id
        chain_id: u16,
        /// Quorum for chain configs created from now on
        default_recv_threshold: u8,
    },

    /// Register an integrator program.
    ///
    /// Signer: the integrator PDA ["endpoint_integrator"].
    ///
    /// Accounts:
    /// 0. `[writable]` Integrator config (PDA: ["integrator_config", integrator])
    /// 1. `[writable]` Sequence tracker (PDA: ["sequence_tracker", integrator])
    Register {
        integrator_program_id: Pubkey,
        admin: Pubkey,
    },

    /// Register an adapter for an integrator, assigning it the next index.
    ///
    /// Accounts:
    /// 0. `[writable]` Integrator config
    /// 1. `[writable]` Adapter info (PDA: ["adapter_info", integrator, adapter])
    AddAdapter {
        admin: Pubkey,
        integrator_program_id: Pubkey,
        adapter_program_id: Pubkey,
    },

    /// Accounts:
    /// 0. `[]` Config
    /// 1. `[]` Integrator config
    /// 2. `[]` Adapter info
    /// 3. `[writable]` Integrator chain config
    ///    (PDA: ["integrator_chain_config", integrator, chain_id])
    EnableSendAdapter(AdapterChainArgs),

    /// Accounts: as `EnableSendAdapter`.
    DisableSendAdapter(AdapterChainArgs),

    /// Accounts: as `EnableSendAdapter`.
    EnableRecvAdapter(AdapterChainArgs),

    /// Accounts: as `EnableSendAdapter`.
    DisableRecvAdapter(AdapterChainArgs),

    /// Set how many enabled receive adapters must attest before execution.
    ///
    /// Accounts:
    /// 0. `[]` Config
    /// 1. `[]` Integrator config
    /// 2. `[writable]` Integrator chain config
    SetRecvThreshold {
        admin: Pubkey,
        integrator_program_id: Pubkey,
        chain_id: u16,
        threshold: u8,
    },

    /// Start a two-step admin transfer.
    ///
    /// Accounts:
    /// 0. `[writable]` Integrator config
    TransferAdmin {
        admin: Pubkey,
        integrator_program_id: Pubkey,
        new_admin: Pubkey,
    },

    /// Complete a pending transfer. `new_admin` must be the pending admin and sign.
    ///
    /// Accounts:
    /// 0. `[writable]` Integrator config
    ClaimAdmin {
        new_admin: Pubkey,
        integrator_program_id: Pubkey,
    },

    /// Replace the admin in one step.
    ///
    /// Accounts:
    /// 0. `[writable]` Integrator config
    UpdateAdmin {
        admin: Pubkey,
        integrator_program_id: Pubkey,
        new_admin: Pubkey,
    },

    /// Remove the admin for good.
    ///
    /// Accounts:
    /// 0. `[writable]` Integrator config
    DiscardAdmin {
        admin: Pubkey,
        integrator_program_id: Pubkey,
    },

    /// Abort a pending transfer.
    ///
    /// Accounts:
    /// 0. `[writable]` Integrator config
    CancelAdminTransfer {
        admin: Pubkey,
        integrator_program_id: Pubkey,
    },

    /// Queue an outbound message for every enabled send adapter.
    ///
    /// Signers: the integrator PDA ["endpoint_integrator"] and `outbox_message`.
    /// Returns the sequence as borsh `u64`.
    ///
    /// Accounts:
    /// 0. `[]` Integrator chain config for `dst_chain`
    /// 1. `[writable]` Sequence tracker
    /// 2. `[writable]` Outbox message (fresh keypair)
    SendMessage {
        integrator_program_id: Pubkey,
        outbox_message: Pubkey,
        dst_chain: u16,
        dst_addr: UniversalAddress,
        payload_hash: [u8; 32],
    },

    /// Clear the calling adapter's bit on an outbox message, closing it when
    /// no adapter is left. Returns the outbox message as borsh.
    ///
    /// Signer: the adapter PDA ["adapter_pda"].
    ///
    /// Accounts:
    /// 0. `[writable]` Outbox message
    /// 1. `[]` Adapter info for (outbox src_addr, adapter)
    /// 2. `[writable]` Refund recipient
    PickUpMessage {
        outbox_message: Pubkey,
        adapter_program_id: Pubkey,
        /// Sender of the outbox message, used to locate the adapter info
        integrator_program_id: Pubkey,
        refund_recipient: Pubkey,
    },

    /// Record an adapter's attestation to an inbound message.
    ///
    /// Signer: the adapter PDA ["adapter_pda"].
    ///
    /// Accounts:
    /// 0. `[]` Config
    /// 1. `[]` Adapter info for (dst_addr, adapter)
    /// 2. `[]` Integrator chain config for (dst_addr, src_chain)
    /// 3. `[writable]` Attestation info (PDA: ["attestation_info", message_hash])
    AttestMessage {
        adapter_program_id: Pubkey,
        message: Message,
    },

    /// Check that an inbound message is ready for execution. Returns the
    /// (enabled, attested) bitmaps as borsh.
    ///
    /// Signer: the integrator PDA of `message.dst_addr`.
    ///
    /// Accounts:
    /// 0. `[]` Config
    /// 1. `[]` Integrator chain config for (dst_addr, src_chain)
    /// 2. `[]` Attestation info
    RecvMessage { message: Message },

    /// Mark an inbound message executed.
    ///
    /// Accounts: as `RecvMessage`, attestation info writable.
    ExecMessage { message: Message },
}

impl EndpointInstruction {
    /// The accounts this instruction touches under the endpoint `program_id`.
    pub fn accounts(&self, program_id: &Pubkey) -> Vec<Pubkey> {
        let config = || find_config_address(program_id).0;
        let integrator_config = |integrator: &Pubkey| find_integrator_config_address(integrator, program_id).0;
        let chain_config = |integrator: &Pubkey, chain_id: u16| {
            find_integrator_chain_config_address(integrator, chain_id, program_id).0
        };
        let adapter_info = |integrator: &Pubkey, adapter: &Pubkey| {
            find_adapter_info_address(integrator, adapter, program_id).0
        };

        match self {
            EndpointInstruction::Initialize { .. } => vec![config()],
            EndpointInstruction::Register {
                integrator_program_id,
                ..
            } => vec![
                integrator_config(integrator_program_id),
                find_sequence_tracker_address(integrator_program_id, program_id).0,
            ],
            EndpointInstruction::AddAdapter {
                integrator_program_id,
                adapter_program_id,
                ..
            } => vec![
                integrator_config(integrator_program_id),
                adapter_info(integrator_program_id, adapter_program_id),
            ],
            EndpointInstruction::EnableSendAdapter(args)
            | EndpointInstruction::DisableSendAdapter(args)
            | EndpointInstruction::EnableRecvAdapter(args)
            | EndpointInstruction::DisableRecvAdapter(args) => vec![
                config(),
                integrator_config(&args.integrator_program_id),
                adapter_info(&args.integrator_program_id, &args.adapter_program_id),
                chain_config(&args.integrator_program_id, args.chain_id),
            ],
            EndpointInstruction::SetRecvThreshold {
                integrator_program_id,
                chain_id,
                ..
            } => vec![
                config(),
                integrator_config(integrator_program_id),
                chain_config(integrator_program_id, *chain_id),
            ],
            EndpointInstruction::TransferAdmin {
                integrator_program_id,
                ..
            }
            | EndpointInstruction::ClaimAdmin {
                integrator_program_id,
                ..
            }
            | EndpointInstruction::UpdateAdmin {
                integrator_program_id,
                ..
            }
            | EndpointInstruction::DiscardAdmin {
                integrator_program_id,
                ..
            }
            | EndpointInstruction::CancelAdminTransfer {
                integrator_program_id,
                ..
            } => vec![integrator_config(integrator_program_id)],
            EndpointInstruction::SendMessage {
                integrator_program_id,
                outbox_message,
                dst_chain,
                ..
            } => vec![
                chain_config(integrator_program_id, *dst_chain),
                find_sequence_tracker_address(integrator_program_id, program_id).0,
                *outbox_message,
            ],
            EndpointInstruction::PickUpMessage {
                outbox_message,
                adapter_program_id,
                integrator_program_id,
                refund_recipient,
            } => vec![
                *outbox_message,
                adapter_info(integrator_program_id, adapter_program_id),
                *refund_recipient,
            ],
            EndpointInstruction::AttestMessage {
                adapter_program_id,
                message,
            } => {
                let integrator = message.dst_addr.to_pubkey();
                vec![
                    config(),
                    adapter_info(&integrator, adapter_program_id),
                    chain_config(&integrator, message.src_chain),
                    find_attestation_info_address(&message.hash(), program_id).0,
                ]
            }
            EndpointInstruction::RecvMessage { message }
            | EndpointInstruction::ExecMessage { message } => {
                let integrator = message.dst_addr.to_pubkey();
                vec![
                    config(),
                    chain_config(&integrator, message.src_chain),
                    find_attestation_info_address(&message.hash(), program_id).0,
                ]
            }
        }
    }
}

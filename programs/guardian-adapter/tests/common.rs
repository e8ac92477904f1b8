#![allow(dead_code)]

use account_ledger::{Ledger, Signer};
use borsh::{BorshDeserialize, BorshSerialize};
use guardian_adapter::events::GuardianAdapterEvent;
use guardian_adapter::state::{find_emitter_address, ConsistencyLevel};
use guardian_adapter::{
    query, GuardianAdapterError, GuardianAdapterInstruction, PostedMessage, PostedVaa,
};
use messaging_endpoint::{
    seeds, AdapterChainArgs, EndpointError, EndpointInstruction, UniversalAddress,
};
use rand::RngCore;
use solana_program::pubkey::Pubkey;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const CHAIN_A: u16 = 1;
pub const CHAIN_B: u16 = 2;
pub const PAYER_FUNDS: u64 = 100_000_000_000;

/// Verifier program shared by every simulated chain
pub fn guardian_program() -> Pubkey {
    Pubkey::new_from_array([7u8; 32])
}

pub fn random_hash() -> [u8; 32] {
    let mut hash = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut hash);
    hash
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// ============================================================================
// SIMULATED CHAIN
// ============================================================================

/// One chain: its own ledger with an endpoint, a guardian adapter and one integrator.
pub struct Chain {
    pub ledger: Ledger,
    pub chain_id: u16,
    pub endpoint: Pubkey,
    pub adapter: Pubkey,
    pub payer: Signer,
    pub integrator: Pubkey,
    pub integrator_signer: Signer,
    pub integrator_admin: Signer,
    pub adapter_admin: Signer,
}

/// Helper: Chain with the endpoint initialized, the integrator registered with
/// the adapter added, and the adapter initialized
pub fn new_chain(chain_id: u16, message_fee: u64) -> Chain {
    init_tracing();
    let ledger = Ledger::new();
    let payer = Signer::new(Pubkey::new_unique());
    ledger.airdrop(payer.key(), PAYER_FUNDS).unwrap();
    let integrator = Pubkey::new_unique();

    let chain = Chain {
        ledger,
        chain_id,
        endpoint: Pubkey::new_unique(),
        adapter: Pubkey::new_unique(),
        payer,
        integrator,
        integrator_signer: Signer::program_derived(&[seeds::INTEGRATOR_SIGNER_SEED], &integrator).0,
        integrator_admin: Signer::new(Pubkey::new_unique()),
        adapter_admin: Signer::new(Pubkey::new_unique()),
    };

    execute_endpoint(
        &chain,
        &[],
        EndpointInstruction::Initialize {
            chain_id,
            default_recv_threshold: 1,
        },
    )
    .unwrap();
    execute_endpoint(
        &chain,
        &[chain.integrator_signer],
        EndpointInstruction::Register {
            integrator_program_id: chain.integrator,
            admin: *chain.integrator_admin.key(),
        },
    )
    .unwrap();
    execute_endpoint(
        &chain,
        &[chain.integrator_admin],
        EndpointInstruction::AddAdapter {
            admin: *chain.integrator_admin.key(),
            integrator_program_id: chain.integrator,
            adapter_program_id: chain.adapter,
        },
    )
    .unwrap();
    execute_adapter(
        &chain,
        &[],
        GuardianAdapterInstruction::Initialize {
            admin: *chain.adapter_admin.key(),
            endpoint_program: chain.endpoint,
            guardian_program: guardian_program(),
            chain_id,
            consistency_level: ConsistencyLevel::Finalized,
            message_fee,
        },
    )
    .unwrap();
    chain
}

/// Helper: Enable the adapter both ways for `remote` and register `peer` as its contract there
pub fn connect(chain: &Chain, remote: u16, peer: UniversalAddress) {
    let args = AdapterChainArgs {
        admin: *chain.integrator_admin.key(),
        integrator_program_id: chain.integrator,
        adapter_program_id: chain.adapter,
        chain_id: remote,
    };
    execute_endpoint(
        chain,
        &[chain.integrator_admin],
        EndpointInstruction::EnableSendAdapter(args.clone()),
    )
    .unwrap();
    execute_endpoint(
        chain,
        &[chain.integrator_admin],
        EndpointInstruction::EnableRecvAdapter(args),
    )
    .unwrap();
    set_peer(chain, &chain.adapter_admin, remote, peer).unwrap();
}

/// Address the guardians attribute this chain's posted messages to
pub fn emitter(chain: &Chain) -> UniversalAddress {
    UniversalAddress::from(find_emitter_address(&chain.adapter).0)
}

pub fn execute_endpoint(
    chain: &Chain,
    signers: &[Signer],
    instruction: EndpointInstruction,
) -> Result<Option<Vec<u8>>, EndpointError> {
    let data = instruction.try_to_vec().unwrap();
    messaging_endpoint::processor::process_instruction(
        &chain.ledger,
        &chain.endpoint,
        &chain.payer,
        signers,
        &data,
    )
}

pub fn execute_adapter(
    chain: &Chain,
    signers: &[Signer],
    instruction: GuardianAdapterInstruction,
) -> Result<(), GuardianAdapterError> {
    let data = instruction.try_to_vec().unwrap();
    guardian_adapter::processor::process_instruction(
        &chain.ledger,
        &chain.adapter,
        &chain.payer,
        signers,
        &data,
    )
}

// ============================================================================
// ADAPTER HELPERS
// ============================================================================

pub fn set_peer(
    chain: &Chain,
    caller: &Signer,
    remote: u16,
    contract: UniversalAddress,
) -> Result<(), GuardianAdapterError> {
    execute_adapter(
        chain,
        &[*caller],
        GuardianAdapterInstruction::SetPeer {
            admin: *caller.key(),
            chain: remote,
            contract,
        },
    )
}

/// An outbound message queued on a chain's endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sent {
    pub outbox: Pubkey,
    pub sequence: u64,
}

/// Helper: Integrator sends to `dst_integrator` on `dst_chain` from a fresh outbox
pub fn send(chain: &Chain, dst_chain: u16, dst_integrator: &Pubkey, payload_hash: [u8; 32]) -> Sent {
    send_from(
        chain,
        Signer::new(Pubkey::new_unique()),
        dst_chain,
        dst_integrator,
        payload_hash,
    )
}

/// Helper: Same as `send`, with the caller choosing the outbox keypair
pub fn send_from(
    chain: &Chain,
    outbox: Signer,
    dst_chain: u16,
    dst_integrator: &Pubkey,
    payload_hash: [u8; 32],
) -> Sent {
    let data = execute_endpoint(
        chain,
        &[chain.integrator_signer, outbox],
        EndpointInstruction::SendMessage {
            integrator_program_id: chain.integrator,
            outbox_message: *outbox.key(),
            dst_chain,
            dst_addr: UniversalAddress::from(*dst_integrator),
            payload_hash,
        },
    )
    .unwrap()
    .expect("sequence");
    Sent {
        outbox: *outbox.key(),
        sequence: u64::try_from_slice(&data).unwrap(),
    }
}

pub fn pick_up(chain: &Chain, sent: &Sent) -> Result<(), GuardianAdapterError> {
    pick_up_with(chain, &chain.endpoint, sent)
}

/// Helper: Pickup declaring an arbitrary endpoint, sender and sequence
pub fn pick_up_with(
    chain: &Chain,
    endpoint: &Pubkey,
    sent: &Sent,
) -> Result<(), GuardianAdapterError> {
    execute_adapter(
        chain,
        &[],
        GuardianAdapterInstruction::PickUpMessage {
            endpoint_program: *endpoint,
            outbox_message: sent.outbox,
            integrator_program_id: chain.integrator,
            sequence: sent.sequence,
            refund_recipient: *chain.payer.key(),
        },
    )
}

pub fn posted(chain: &Chain, sent: &Sent) -> Option<PostedMessage> {
    query::get_posted_message(&chain.ledger, &chain.adapter, &chain.integrator, sent.sequence)
        .unwrap()
}

/// Helper: What the guardians would deliver for the message posted for `sent`
pub fn observe(chain: &Chain, sent: &Sent) -> PostedVaa {
    let posted = posted(chain, sent).expect("posted message");
    PostedVaa {
        verified_by: guardian_program(),
        emitter_chain: chain.chain_id,
        emitter_address: UniversalAddress::from(posted.emitter),
        sequence: posted.sequence,
        payload: posted.payload,
    }
}

pub fn receive(chain: &Chain, vaa: PostedVaa) -> Result<(), GuardianAdapterError> {
    execute_adapter(
        chain,
        &[],
        GuardianAdapterInstruction::ReceiveMessage {
            endpoint_program: chain.endpoint,
            vaa,
        },
    )
}

pub fn adapter_events(chain: &Chain) -> Vec<GuardianAdapterEvent> {
    chain
        .ledger
        .logs()
        .unwrap()
        .into_iter()
        .filter(|entry| entry.program_id == chain.adapter)
        .map(|entry| GuardianAdapterEvent::try_from_slice(&entry.data).unwrap())
        .collect()
}

#![allow(dead_code)]

use account_ledger::{Ledger, Signer};
use borsh::{BorshDeserialize, BorshSerialize};
use messaging_endpoint::{
    events::EndpointEvent,
    processor::process_instruction,
    query,
    seeds, AdapterChainArgs, Bitmap, EndpointError, EndpointInstruction, Message, OutboxMessage,
    UniversalAddress,
};
use rand::RngCore;
use solana_program::pubkey::Pubkey;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const LOCAL_CHAIN: u16 = 1;
pub const REMOTE_CHAIN: u16 = 2;
pub const PAYER_FUNDS: u64 = 100_000_000_000;

pub fn remote_sender() -> UniversalAddress {
    UniversalAddress::from_bytes([0xaa; 32])
}

// ============================================================================
// TEST HARNESS
// ============================================================================

pub struct TestEnv {
    pub ledger: Ledger,
    pub program_id: Pubkey,
    pub payer: Signer,
    pub integrator: Pubkey,
    pub integrator_signer: Signer,
    pub admin: Signer,
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn integrator_signer(integrator: &Pubkey) -> Signer {
    Signer::program_derived(&[seeds::INTEGRATOR_SIGNER_SEED], integrator).0
}

pub fn adapter_signer(adapter: &Pubkey) -> Signer {
    Signer::program_derived(&[seeds::ADAPTER_SIGNER_SEED], adapter).0
}

pub fn random_hash() -> [u8; 32] {
    let mut hash = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut hash);
    hash
}

/// Helper: Endpoint initialized for LOCAL_CHAIN with a funded payer
pub fn new_env() -> TestEnv {
    init_tracing();
    let ledger = Ledger::new();
    let payer = Signer::new(Pubkey::new_unique());
    ledger.airdrop(payer.key(), PAYER_FUNDS).unwrap();
    let integrator = Pubkey::new_unique();

    let env = TestEnv {
        ledger,
        program_id: Pubkey::new_unique(),
        payer,
        integrator,
        integrator_signer: integrator_signer(&integrator),
        admin: Signer::new(Pubkey::new_unique()),
    };
    execute(
        &env,
        &[],
        EndpointInstruction::Initialize {
            chain_id: LOCAL_CHAIN,
            default_recv_threshold: 1,
        },
    )
    .unwrap();
    env
}

/// Helper: `new_env` plus a registered integrator owned by `env.admin`
pub fn registered_env() -> TestEnv {
    let env = new_env();
    execute(
        &env,
        &[env.integrator_signer],
        EndpointInstruction::Register {
            integrator_program_id: env.integrator,
            admin: *env.admin.key(),
        },
    )
    .unwrap();
    env
}

/// Helper: Run one endpoint instruction as its own transaction
pub fn execute(
    env: &TestEnv,
    signers: &[Signer],
    instruction: EndpointInstruction,
) -> Result<Option<Vec<u8>>, EndpointError> {
    let data = instruction.try_to_vec().unwrap();
    process_instruction(&env.ledger, &env.program_id, &env.payer, signers, &data)
}

fn decode<T: BorshDeserialize>(data: Option<Vec<u8>>) -> T {
    T::try_from_slice(&data.expect("return data")).unwrap()
}

// ============================================================================
// REGISTRY HELPERS
// ============================================================================

/// Helper: Register a fresh adapter program and return (program id, index)
pub fn add_adapter(env: &TestEnv) -> (Pubkey, u8) {
    let adapter = Pubkey::new_unique();
    let index = try_add_adapter(env, &adapter).unwrap();
    (adapter, index)
}

pub fn try_add_adapter(env: &TestEnv, adapter: &Pubkey) -> Result<u8, EndpointError> {
    execute(
        env,
        &[env.admin],
        EndpointInstruction::AddAdapter {
            admin: *env.admin.key(),
            integrator_program_id: env.integrator,
            adapter_program_id: *adapter,
        },
    )
    .map(decode)
}

pub fn chain_args(env: &TestEnv, adapter: &Pubkey, chain_id: u16) -> AdapterChainArgs {
    AdapterChainArgs {
        admin: *env.admin.key(),
        integrator_program_id: env.integrator,
        adapter_program_id: *adapter,
        chain_id,
    }
}

pub fn enable_send(env: &TestEnv, adapter: &Pubkey, chain_id: u16) -> Result<(), EndpointError> {
    execute(
        env,
        &[env.admin],
        EndpointInstruction::EnableSendAdapter(chain_args(env, adapter, chain_id)),
    )
    .map(|_| ())
}

pub fn disable_send(env: &TestEnv, adapter: &Pubkey, chain_id: u16) -> Result<(), EndpointError> {
    execute(
        env,
        &[env.admin],
        EndpointInstruction::DisableSendAdapter(chain_args(env, adapter, chain_id)),
    )
    .map(|_| ())
}

pub fn enable_recv(env: &TestEnv, adapter: &Pubkey, chain_id: u16) -> Result<(), EndpointError> {
    execute(
        env,
        &[env.admin],
        EndpointInstruction::EnableRecvAdapter(chain_args(env, adapter, chain_id)),
    )
    .map(|_| ())
}

pub fn disable_recv(env: &TestEnv, adapter: &Pubkey, chain_id: u16) -> Result<(), EndpointError> {
    execute(
        env,
        &[env.admin],
        EndpointInstruction::DisableRecvAdapter(chain_args(env, adapter, chain_id)),
    )
    .map(|_| ())
}

pub fn set_recv_threshold(env: &TestEnv, chain_id: u16, threshold: u8) -> Result<(), EndpointError> {
    execute(
        env,
        &[env.admin],
        EndpointInstruction::SetRecvThreshold {
            admin: *env.admin.key(),
            integrator_program_id: env.integrator,
            chain_id,
            threshold,
        },
    )
    .map(|_| ())
}

// ============================================================================
// SEND PATH HELPERS
// ============================================================================

/// Helper: Send a message to REMOTE_CHAIN; returns (outbox address, sequence)
pub fn send_message(env: &TestEnv, payload_hash: [u8; 32]) -> Result<(Pubkey, u64), EndpointError> {
    send_message_to(env, REMOTE_CHAIN, payload_hash)
}

pub fn send_message_to(
    env: &TestEnv,
    dst_chain: u16,
    payload_hash: [u8; 32],
) -> Result<(Pubkey, u64), EndpointError> {
    let outbox = Signer::new(Pubkey::new_unique());
    let sequence = execute(
        env,
        &[env.integrator_signer, outbox],
        EndpointInstruction::SendMessage {
            integrator_program_id: env.integrator,
            outbox_message: *outbox.key(),
            dst_chain,
            dst_addr: UniversalAddress::from_bytes([0xbb; 32]),
            payload_hash,
        },
    )
    .map(decode::<u64>)?;
    Ok((*outbox.key(), sequence))
}

pub fn pick_up(env: &TestEnv, outbox: &Pubkey, adapter: &Pubkey) -> Result<OutboxMessage, EndpointError> {
    execute(
        env,
        &[adapter_signer(adapter)],
        EndpointInstruction::PickUpMessage {
            outbox_message: *outbox,
            adapter_program_id: *adapter,
            integrator_program_id: env.integrator,
            refund_recipient: *env.payer.key(),
        },
    )
    .map(decode)
}

pub fn outbox(env: &TestEnv, outbox: &Pubkey) -> Option<OutboxMessage> {
    query::get_outbox_message(&env.ledger, &env.program_id, outbox).unwrap()
}

// ============================================================================
// RECEIVE PATH HELPERS
// ============================================================================

/// Helper: An inbound message from REMOTE_CHAIN addressed to the test integrator
pub fn inbound_message(env: &TestEnv, sequence: u64) -> Message {
    Message {
        src_chain: REMOTE_CHAIN,
        src_addr: remote_sender(),
        sequence,
        dst_chain: LOCAL_CHAIN,
        dst_addr: UniversalAddress::from(env.integrator),
        payload_hash: random_hash(),
    }
}

pub fn attest(env: &TestEnv, adapter: &Pubkey, message: &Message) -> Result<Bitmap, EndpointError> {
    execute(
        env,
        &[adapter_signer(adapter)],
        EndpointInstruction::AttestMessage {
            adapter_program_id: *adapter,
            message: *message,
        },
    )
    .map(decode)
}

pub fn recv(env: &TestEnv, message: &Message) -> Result<(Bitmap, Bitmap), EndpointError> {
    execute(
        env,
        &[env.integrator_signer],
        EndpointInstruction::RecvMessage { message: *message },
    )
    .map(decode)
}

pub fn exec(env: &TestEnv, message: &Message) -> Result<(), EndpointError> {
    execute(
        env,
        &[env.integrator_signer],
        EndpointInstruction::ExecMessage { message: *message },
    )
    .map(|_| ())
}

// ============================================================================
// EVENT HELPERS
// ============================================================================

pub fn events(env: &TestEnv) -> Vec<EndpointEvent> {
    env.ledger
        .logs()
        .unwrap()
        .into_iter()
        .filter(|entry| entry.program_id == env.program_id)
        .map(|entry| EndpointEvent::try_from_slice(&entry.data).unwrap())
        .collect()
}

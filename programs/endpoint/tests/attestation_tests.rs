//! Receive path tests: attestation accumulation, quorum and the execution latch.

mod common;

use common::{
    add_adapter, attest, disable_recv, enable_recv, events, exec, execute, inbound_message,
    recv, registered_env, set_recv_threshold, TestEnv, LOCAL_CHAIN, REMOTE_CHAIN,
};
use account_ledger::{LedgerError, Signer};
use messaging_endpoint::state::find_attestation_info_address;
use messaging_endpoint::{
    events::EndpointEvent, query, AttestationInfo, Bitmap, EndpointError, EndpointInstruction,
    Message,
};
use solana_program::pubkey::Pubkey;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Helper: Registered env with `n` adapters receive-enabled for REMOTE_CHAIN
fn env_with_recv_adapters(n: usize) -> (TestEnv, Vec<Pubkey>) {
    let env = registered_env();
    let adapters = (0..n)
        .map(|_| {
            let (adapter, _) = add_adapter(&env);
            enable_recv(&env, &adapter, REMOTE_CHAIN).unwrap();
            adapter
        })
        .collect();
    (env, adapters)
}

// ============================================================================
// ATTESTATION TESTS
// ============================================================================

/// 1. Test: First attestation creates the record
/// Verifies the attestation record is created with the message fields and the
/// attesting adapter's bit, not executed.
/// Why: Whichever adapter arrives first must be able to create the accumulator.
#[test]
fn test_first_attestation_creates_record() {
    let (env, adapters) = env_with_recv_adapters(1);
    let message = inbound_message(&env, 0);

    let attested = attest(&env, &adapters[0], &message).unwrap();
    assert_eq!(attested, Bitmap::from_value(0b1));

    let info = query::get_attestation_info(&env.ledger, &env.program_id, &message)
        .unwrap()
        .unwrap();
    assert_eq!(info.message_hash, message.hash());
    assert_eq!(info.src_chain, REMOTE_CHAIN);
    assert_eq!(info.sequence, 0);
    assert!(!info.executed);
    assert_eq!(info.attested_adapters, Bitmap::from_value(0b1));

    assert!(events(&env).contains(&EndpointEvent::MessageAttestedTo {
        message_hash: message.hash(),
        message,
        attested_bitmap: Bitmap::from_value(0b1),
        attesting_adapter: adapters[0].into(),
    }));
}

/// 2. Test: Duplicate attestation is rejected
/// Verifies a second attestation by the same adapter fails with DuplicateMessageAttestation
/// and leaves the bitmap unchanged.
/// Why: One adapter must never count twice toward the quorum.
#[test]
fn test_duplicate_attestation() {
    let (env, adapters) = env_with_recv_adapters(1);
    let message = inbound_message(&env, 0);

    attest(&env, &adapters[0], &message).unwrap();
    assert_eq!(
        attest(&env, &adapters[0], &message),
        Err(EndpointError::DuplicateMessageAttestation)
    );
    let info = query::get_attestation_info(&env.ledger, &env.program_id, &message)
        .unwrap()
        .unwrap();
    assert_eq!(info.attested_adapters.count_ones(), 1);
}

/// 3. Test: M adapters set M distinct bits on one record
/// Verifies attestations from distinct adapters converge on the same record.
/// Why: The accumulator is keyed by message hash, not by adapter.
#[test]
fn test_distinct_adapters_accumulate() {
    let (env, adapters) = env_with_recv_adapters(5);
    let message = inbound_message(&env, 42);

    for (i, adapter) in adapters.iter().enumerate() {
        let attested = attest(&env, adapter, &message).unwrap();
        assert_eq!(attested.count_ones() as usize, i + 1);
    }
    let info = query::get_attestation_info(&env.ledger, &env.program_id, &message)
        .unwrap()
        .unwrap();
    assert_eq!(info.attested_adapters, Bitmap::from_value(0b11111));
}

/// 4. Test: Only receive-enabled adapters may attest
/// Verifies attestation fails with AdapterNotEnabled for an adapter that is registered but
/// not enabled, an adapter that was disabled, and an adapter that is not registered.
/// Why: The receive bitmap is the integrator's trust set for inbound messages.
#[test]
fn test_attest_requires_recv_enabled() {
    let (env, adapters) = env_with_recv_adapters(1);
    let (idle, _) = add_adapter(&env);
    let message = inbound_message(&env, 0);

    assert_eq!(attest(&env, &idle, &message), Err(EndpointError::AdapterNotEnabled));
    assert_eq!(
        attest(&env, &Pubkey::new_unique(), &message),
        Err(EndpointError::AdapterNotEnabled)
    );

    disable_recv(&env, &adapters[0], REMOTE_CHAIN).unwrap();
    assert_eq!(
        attest(&env, &adapters[0], &message),
        Err(EndpointError::AdapterNotEnabled)
    );
    assert!(query::get_attestation_info(&env.ledger, &env.program_id, &message)
        .unwrap()
        .is_none());
}

/// 5. Test: Attestation for another chain is rejected
/// Verifies a message whose destination is not this endpoint's chain fails with
/// InvalidDestinationChain.
/// Why: Accepting it would let a message meant for one chain execute on another.
#[test]
fn test_attest_wrong_destination() {
    let (env, adapters) = env_with_recv_adapters(1);
    let mut message = inbound_message(&env, 0);
    message.dst_chain = LOCAL_CHAIN + 10;

    assert_eq!(
        attest(&env, &adapters[0], &message),
        Err(EndpointError::InvalidDestinationChain)
    );
}

/// 6. Test: Attestation requires the adapter's signer
/// Verifies attesting without the adapter's ["adapter_pda"] signature fails.
/// Why: Otherwise anyone could vote on behalf of an adapter.
#[test]
fn test_attest_requires_adapter_signer() {
    let (env, adapters) = env_with_recv_adapters(1);
    let message = inbound_message(&env, 0);

    let result = execute(
        &env,
        &[],
        EndpointInstruction::AttestMessage {
            adapter_program_id: adapters[0],
            message,
        },
    );
    assert_eq!(result, Err(EndpointError::CallerNotAuthorized));
}

// ============================================================================
// RECEIVE AND EXECUTE TESTS
// ============================================================================

/// 7. Test: Unknown message
/// Verifies recv and exec fail with UnknownMessageAttestation when nothing was attested.
/// Why: "Never attested" must be distinguishable from "not enough attestations".
#[test]
fn test_unknown_message() {
    let (env, _) = env_with_recv_adapters(1);
    let message = inbound_message(&env, 0);

    assert_eq!(recv(&env, &message), Err(EndpointError::UnknownMessageAttestation));
    assert_eq!(exec(&env, &message), Err(EndpointError::UnknownMessageAttestation));
}

/// 8. Test: Recv reports without consuming, exec consumes once
/// Verifies recv returns (enabled, attested) repeatedly, exec latches, and both fail
/// with AlreadyExecuted afterwards.
/// Why: Execution must happen exactly once; the check must be repeatable until then.
#[test]
fn test_recv_then_exec_once() {
    let (env, adapters) = env_with_recv_adapters(1);
    let message = inbound_message(&env, 0);
    attest(&env, &adapters[0], &message).unwrap();

    let expected = (Bitmap::from_value(0b1), Bitmap::from_value(0b1));
    assert_eq!(recv(&env, &message).unwrap(), expected);
    assert_eq!(recv(&env, &message).unwrap(), expected);

    exec(&env, &message).unwrap();
    let info = query::get_attestation_info(&env.ledger, &env.program_id, &message)
        .unwrap()
        .unwrap();
    assert!(info.executed);

    assert_eq!(exec(&env, &message), Err(EndpointError::AlreadyExecuted));
    assert_eq!(recv(&env, &message), Err(EndpointError::AlreadyExecuted));

    let events = events(&env);
    assert!(events.contains(&EndpointEvent::MessageExecuted {
        message_hash: message.hash(),
        message,
    }));
    assert!(events.iter().any(|event| matches!(event, EndpointEvent::MessageReceived { .. })));
}

/// 9. Test: Two-adapter quorum
/// Verifies that with threshold 2 a single attestation fails InsufficientAttestations and
/// the second attestation makes the message executable.
/// Why: The quorum is the protection against a single compromised adapter.
#[test]
fn test_two_adapter_quorum() {
    let (env, adapters) = env_with_recv_adapters(2);
    set_recv_threshold(&env, REMOTE_CHAIN, 2).unwrap();
    let message = inbound_message(&env, 7);

    attest(&env, &adapters[0], &message).unwrap();
    assert_eq!(recv(&env, &message), Err(EndpointError::InsufficientAttestations));
    assert_eq!(exec(&env, &message), Err(EndpointError::InsufficientAttestations));

    attest(&env, &adapters[1], &message).unwrap();
    assert_eq!(
        recv(&env, &message).unwrap(),
        (Bitmap::from_value(0b11), Bitmap::from_value(0b11))
    );
    exec(&env, &message).unwrap();
}

/// 10. Test: Disabled adapters stop counting
/// Verifies that an attestation from an adapter disabled afterwards no longer counts
/// toward the quorum.
/// Why: Disabling an adapter is how an integrator revokes trust, including for in-flight messages.
#[test]
fn test_disabled_adapter_not_counted() {
    let (env, adapters) = env_with_recv_adapters(2);
    let message = inbound_message(&env, 0);
    attest(&env, &adapters[0], &message).unwrap();

    disable_recv(&env, &adapters[0], REMOTE_CHAIN).unwrap();
    assert_eq!(recv(&env, &message), Err(EndpointError::InsufficientAttestations));

    attest(&env, &adapters[1], &message).unwrap();
    assert_eq!(
        recv(&env, &message).unwrap(),
        (Bitmap::from_value(0b10), Bitmap::from_value(0b11))
    );
}

/// 11. Test: Recv and exec require the destination integrator's signer
/// Verifies another program cannot consume a message addressed to the integrator.
/// Why: The executed latch belongs to the message's recipient.
#[test]
fn test_exec_requires_integrator_signer() {
    let (env, adapters) = env_with_recv_adapters(1);
    let message = inbound_message(&env, 0);
    attest(&env, &adapters[0], &message).unwrap();

    let result = execute(&env, &[], EndpointInstruction::ExecMessage { message });
    assert_eq!(result, Err(EndpointError::CallerNotAuthorized));
    let info = query::get_attestation_info(&env.ledger, &env.program_id, &message)
        .unwrap()
        .unwrap();
    assert!(!info.executed);
}

/// 12. Test: Field mismatch is a different message
/// Verifies that changing any field after attestation yields UnknownMessageAttestation.
/// Why: The attestation binds the exact fields, so a tampered payload hash finds nothing.
#[test]
fn test_tampered_fields_unknown() {
    let (env, adapters) = env_with_recv_adapters(1);
    let message = inbound_message(&env, 0);
    attest(&env, &adapters[0], &message).unwrap();

    let tampered = Message {
        payload_hash: [0xff; 32],
        ..message
    };
    assert_eq!(exec(&env, &tampered), Err(EndpointError::UnknownMessageAttestation));
}

/// 13. Test: Messages for another chain are rejected outright
/// Verifies recv and exec of a message whose dst_chain is not this endpoint's chain fail
/// with InvalidDestinationChain, not UnknownMessageAttestation.
/// Why: "Never deliverable here" must be distinguishable from "not attested yet".
#[test]
fn test_recv_exec_foreign_destination() {
    let (env, _) = env_with_recv_adapters(1);
    let message = Message {
        dst_chain: 99,
        ..inbound_message(&env, 0)
    };

    assert_eq!(recv(&env, &message), Err(EndpointError::InvalidDestinationChain));
    assert_eq!(exec(&env, &message), Err(EndpointError::InvalidDestinationChain));
}

/// 14. Test: A stored record that disagrees with the message is rejected
/// Verifies that when the record under a message's hash holds different fields, recv and
/// exec fail with InvalidMessageHash and the latch stays unset.
/// Why: Execution must only ever consume the exact message the adapters attested to.
#[test]
fn test_stored_fields_mismatch() {
    let (env, adapters) = env_with_recv_adapters(1);
    let message = inbound_message(&env, 0);
    attest(&env, &adapters[0], &message).unwrap();

    let (key, _) = find_attestation_info_address(&message.hash(), &env.program_id);
    env.ledger
        .transact(&env.payer, &[], &[key], |set| -> Result<(), LedgerError> {
            let mut info: AttestationInfo = set.load(&key, &env.program_id)?;
            info.sequence += 1;
            set.store(&key, &env.program_id, &info)
        })
        .unwrap();

    assert_eq!(recv(&env, &message), Err(EndpointError::InvalidMessageHash));
    assert_eq!(exec(&env, &message), Err(EndpointError::InvalidMessageHash));
    let info = query::get_attestation_info(&env.ledger, &env.program_id, &message)
        .unwrap()
        .unwrap();
    assert!(!info.executed);
}

/// 15. Test: Only the adapter's derived signer carries its authority
/// Verifies an attestation signed by the adapter's program id itself, rather than its
/// ["adapter_pda"] address, fails CallerNotAuthorized and creates no record.
/// Why: Authorization is equality with the derived address, nothing else.
#[test]
fn test_attest_requires_derived_signer() {
    let (env, adapters) = env_with_recv_adapters(1);
    let message = inbound_message(&env, 0);

    let result = execute(
        &env,
        &[Signer::new(adapters[0])],
        EndpointInstruction::AttestMessage {
            adapter_program_id: adapters[0],
            message,
        },
    );
    assert_eq!(result, Err(EndpointError::CallerNotAuthorized));
    assert!(query::get_attestation_info(&env.ledger, &env.program_id, &message)
        .unwrap()
        .is_none());
}

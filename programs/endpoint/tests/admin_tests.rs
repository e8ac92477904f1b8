//! Admin governance tests: the pure state machine and the endpoint instructions
//! that wrap it.

mod common;

use account_ledger::{LedgerError, Signer};
use common::{add_adapter, events, execute, registered_env, try_add_adapter, TestEnv};
use messaging_endpoint::{
    events::EndpointEvent,
    governance::{AdminState, GovernanceError},
    query, EndpointError, EndpointInstruction,
};
use solana_program::pubkey::Pubkey;

// ============================================================================
// TEST HELPERS
// ============================================================================

fn transfer(env: &TestEnv, caller: &Signer, new_admin: &Pubkey) -> Result<(), EndpointError> {
    execute(
        env,
        &[*caller],
        EndpointInstruction::TransferAdmin {
            admin: *caller.key(),
            integrator_program_id: env.integrator,
            new_admin: *new_admin,
        },
    )
    .map(|_| ())
}

fn claim(env: &TestEnv, caller: &Signer) -> Result<(), EndpointError> {
    execute(
        env,
        &[*caller],
        EndpointInstruction::ClaimAdmin {
            new_admin: *caller.key(),
            integrator_program_id: env.integrator,
        },
    )
    .map(|_| ())
}

fn update(env: &TestEnv, caller: &Signer, new_admin: &Pubkey) -> Result<(), EndpointError> {
    execute(
        env,
        &[*caller],
        EndpointInstruction::UpdateAdmin {
            admin: *caller.key(),
            integrator_program_id: env.integrator,
            new_admin: *new_admin,
        },
    )
    .map(|_| ())
}

fn discard(env: &TestEnv, caller: &Signer) -> Result<(), EndpointError> {
    execute(
        env,
        &[*caller],
        EndpointInstruction::DiscardAdmin {
            admin: *caller.key(),
            integrator_program_id: env.integrator,
        },
    )
    .map(|_| ())
}

fn cancel(env: &TestEnv, caller: &Signer) -> Result<(), EndpointError> {
    execute(
        env,
        &[*caller],
        EndpointInstruction::CancelAdminTransfer {
            admin: *caller.key(),
            integrator_program_id: env.integrator,
        },
    )
    .map(|_| ())
}

fn admin_state(env: &TestEnv) -> AdminState {
    query::get_integrator_config(&env.ledger, &env.program_id, &env.integrator)
        .unwrap()
        .unwrap()
        .admin
}

// ============================================================================
// STATE MACHINE TESTS
// ============================================================================

/// 1. Test: Claim succeeds only for the pending admin
/// Verifies that claim_admin fails with no pending transfer, fails for any caller
/// other than the candidate, and hands over control to the candidate.
/// Why: The two-step transfer exists so control only moves to a key that proved it can sign.
#[test]
fn test_claim_requires_pending_and_candidate() {
    let admin = Pubkey::new_unique();
    let candidate = Pubkey::new_unique();
    let stranger = Pubkey::new_unique();
    let mut state = AdminState::new(admin).unwrap();

    assert_eq!(state.claim_admin(&candidate), Err(GovernanceError::NoTransferPending));

    state.transfer_admin(&admin, candidate).unwrap();
    assert_eq!(state.claim_admin(&stranger), Err(GovernanceError::CallerNotAdmin));
    assert_eq!(state.claim_admin(&admin), Err(GovernanceError::CallerNotAdmin));

    let change = state.claim_admin(&candidate).unwrap();
    assert_eq!(change.old_admin, admin);
    assert_eq!(state.admin, Some(candidate));
    assert_eq!(state.pending_admin, None);
}

/// 2. Test: Pending transfer blocks every other admin mutation
/// Verifies that transfer, update and discard fail with TransferPending while a transfer is open.
/// Why: A second mutation would race the candidate's claim.
#[test]
fn test_pending_transfer_blocks_mutations() {
    let admin = Pubkey::new_unique();
    let mut state = AdminState::new(admin).unwrap();
    state.transfer_admin(&admin, Pubkey::new_unique()).unwrap();

    assert_eq!(
        state.transfer_admin(&admin, Pubkey::new_unique()),
        Err(GovernanceError::TransferPending)
    );
    assert_eq!(
        state.update_admin(&admin, Pubkey::new_unique()),
        Err(GovernanceError::TransferPending)
    );
    assert_eq!(state.discard_admin(&admin), Err(GovernanceError::TransferPending));
}

/// 3. Test: Zero address is never an admin
/// Verifies that new, transfer and update reject the all-zero key.
/// Why: Nobody can sign for the zero key; handing it control would brick the registry.
#[test]
fn test_zero_address_rejected() {
    let admin = Pubkey::new_unique();
    assert_eq!(AdminState::new(Pubkey::default()), Err(GovernanceError::ZeroAddress));

    let mut state = AdminState::new(admin).unwrap();
    assert_eq!(
        state.transfer_admin(&admin, Pubkey::default()),
        Err(GovernanceError::ZeroAddress)
    );
    assert_eq!(
        state.update_admin(&admin, Pubkey::default()),
        Err(GovernanceError::ZeroAddress)
    );
    assert!(state.is_admin(&admin));
}

/// 4. Test: Discard is terminal
/// Verifies that after discard_admin no caller passes the admin check again.
/// Why: Discarding is how an integrator freezes its configuration for good.
#[test]
fn test_discard_is_terminal() {
    let admin = Pubkey::new_unique();
    let mut state = AdminState::new(admin).unwrap();
    state.discard_admin(&admin).unwrap();

    assert_eq!(state.admin, None);
    assert_eq!(state.require_admin(&admin), Err(GovernanceError::CallerNotAdmin));
    assert_eq!(
        state.transfer_admin(&admin, Pubkey::new_unique()),
        Err(GovernanceError::CallerNotAdmin)
    );
    assert_eq!(
        state.update_admin(&admin, Pubkey::new_unique()),
        Err(GovernanceError::CallerNotAdmin)
    );
}

// ============================================================================
// ENDPOINT INSTRUCTION TESTS
// ============================================================================

/// 5. Test: Two-step transfer through the endpoint
/// Verifies transfer then claim moves the registry to the new admin and emits both events.
/// Why: Governance events are how off-chain monitors track control of a registry.
#[test]
fn test_transfer_and_claim() {
    let env = registered_env();
    let candidate = Signer::new(Pubkey::new_unique());

    transfer(&env, &env.admin, candidate.key()).unwrap();
    assert_eq!(admin_state(&env).pending_admin, Some(*candidate.key()));

    claim(&env, &candidate).unwrap();
    let state = admin_state(&env);
    assert_eq!(state.admin, Some(*candidate.key()));
    assert_eq!(state.pending_admin, None);

    let events = events(&env);
    assert!(events.contains(&EndpointEvent::AdminUpdateRequested {
        integrator: env.integrator,
        old_admin: *env.admin.key(),
        new_admin: *candidate.key(),
    }));
    assert!(events.contains(&EndpointEvent::AdminUpdated {
        integrator: env.integrator,
        old_admin: *env.admin.key(),
        new_admin: *candidate.key(),
    }));

    // The old admin lost control
    let result = try_add_adapter(&env, &Pubkey::new_unique());
    assert_eq!(result, Err(EndpointError::CallerNotAuthorized));
}

/// 6. Test: Double transfer is rejected
/// Verifies that a second transfer_admin while one is pending fails with AdminTransferInProgress.
/// Why: The first candidate must claim or the admin must cancel before a new candidate is named.
#[test]
fn test_double_transfer_rejected() {
    let env = registered_env();
    transfer(&env, &env.admin, &Pubkey::new_unique()).unwrap();

    let result = transfer(&env, &env.admin, &Pubkey::new_unique());
    assert_eq!(result, Err(EndpointError::AdminTransferInProgress));
}

/// 7. Test: Registry changes are blocked during a transfer
/// Verifies that add_adapter fails with AdminTransferInProgress while a transfer is pending.
/// Why: The outgoing admin must not reshape the registry the candidate is about to accept.
#[test]
fn test_registry_blocked_during_transfer() {
    let env = registered_env();
    transfer(&env, &env.admin, &Pubkey::new_unique()).unwrap();

    let result = try_add_adapter(&env, &Pubkey::new_unique());
    assert_eq!(result, Err(EndpointError::AdminTransferInProgress));
}

/// 8. Test: Cancel clears the pending transfer
/// Verifies that cancel_admin_transfer clears the candidate, after which the candidate
/// cannot claim and the admin can act again.
/// Why: An admin must be able to back out of a transfer to a wrong address.
#[test]
fn test_cancel_transfer() {
    let env = registered_env();
    let candidate = Signer::new(Pubkey::new_unique());

    assert_eq!(cancel(&env, &env.admin), Err(EndpointError::NoAdminTransferInProgress));

    transfer(&env, &env.admin, candidate.key()).unwrap();
    assert_eq!(cancel(&env, &candidate), Err(EndpointError::CallerNotAuthorized));
    cancel(&env, &env.admin).unwrap();

    assert_eq!(claim(&env, &candidate), Err(EndpointError::NoAdminTransferInProgress));
    add_adapter(&env);
}

/// 9. Test: Update replaces the admin in one step
/// Verifies that update_admin changes the admin immediately and the old admin is locked out.
/// Why: Same-party key rotation should not need a claim round trip.
#[test]
fn test_update_admin() {
    let env = registered_env();
    let next = Signer::new(Pubkey::new_unique());

    let stranger = Signer::new(Pubkey::new_unique());
    assert_eq!(update(&env, &stranger, next.key()), Err(EndpointError::CallerNotAuthorized));

    update(&env, &env.admin, next.key()).unwrap();
    assert_eq!(admin_state(&env).admin, Some(*next.key()));
    assert_eq!(
        update(&env, &env.admin, &Pubkey::new_unique()),
        Err(EndpointError::CallerNotAuthorized)
    );
}

/// 10. Test: Discard freezes the registry
/// Verifies that after discard_admin every admin-gated instruction fails with CallerNotAuthorized.
/// Why: Discard is irreversible; nothing may resurrect control.
#[test]
fn test_discard_freezes_registry() {
    let env = registered_env();
    discard(&env, &env.admin).unwrap();

    assert_eq!(admin_state(&env).admin, None);
    assert!(events(&env).contains(&EndpointEvent::AdminDiscarded {
        integrator: env.integrator
    }));
    assert_eq!(
        try_add_adapter(&env, &Pubkey::new_unique()),
        Err(EndpointError::CallerNotAuthorized)
    );
    assert_eq!(
        transfer(&env, &env.admin, &Pubkey::new_unique()),
        Err(EndpointError::CallerNotAuthorized)
    );
}

/// 11. Test: Admin instructions need the admin's signature
/// Verifies that naming the admin without its signature fails with MissingRequiredSignature.
/// Why: The admin field is only an identity claim; the signature proves it.
#[test]
fn test_admin_must_sign() {
    let env = registered_env();
    let result = execute(
        &env,
        &[],
        EndpointInstruction::DiscardAdmin {
            admin: *env.admin.key(),
            integrator_program_id: env.integrator,
        },
    );
    assert_eq!(
        result,
        Err(EndpointError::Ledger(LedgerError::MissingRequiredSignature(*env.admin.key())))
    );
    assert!(admin_state(&env).admin.is_some());
}

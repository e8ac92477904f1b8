//! Caller identity tokens.
//!
//! A program never trusts an address argument on its own. Every privileged
//! operation compares a `Signer` presented with the transaction against the
//! identity recorded in state (an admin key, an integrator PDA, an adapter PDA).
//!
//! ## Trust Boundary
//!
//! The ledger does not check where a `Signer` came from. Whoever calls a
//! program's `process_instruction` stands in for the runtime and must only
//! present program-derived signers for programs it actually executes on
//! behalf of. Inside a transaction, program code gets its own derived signer
//! from `AccountSet::sign_as_program`, which is what the guardian adapter does
//! before calling the endpoint. A program-derived signer is honored only at
//! its exact derived address; the program id itself carries no authority.

use solana_program::pubkey::Pubkey;

/// An identity that authorized the current transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signer {
    key: Pubkey,
}

impl Signer {
    /// A keypair-backed signer.
    pub fn new(key: Pubkey) -> Self {
        Self { key }
    }

    /// The program-derived signer for `seeds` under `program_id`.
    ///
    /// This is how a program authenticates itself to another program: the
    /// callee only has to re-derive the same address and compare. Only the
    /// host driving `program_id` may hand this to another program.
    pub fn program_derived(seeds: &[&[u8]], program_id: &Pubkey) -> (Self, u8) {
        let (key, bump) = Pubkey::find_program_address(seeds, program_id);
        (Self { key }, bump)
    }

    pub fn key(&self) -> &Pubkey {
        &self.key
    }
}

impl From<Pubkey> for Signer {
    fn from(key: Pubkey) -> Self {
        Self::new(key)
    }
}

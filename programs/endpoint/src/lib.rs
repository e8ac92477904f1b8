//! Messaging Endpoint Program (Native Solana)
//!
//! The endpoint sits between integrator programs and the adapters that carry
//! their messages across chains.
//!
//! ## Instructions
//!
//! - `Initialize`: Set the endpoint's chain id and default receive quorum
//! - `Register`: Create an integrator's adapter registry and sequence tracker
//! - `AddAdapter`: Register an adapter, assigning it a permanent bit index
//! - `Enable/Disable Send/Recv Adapter`: Toggle an adapter for one chain
//! - `SetRecvThreshold`: Set how many adapters must attest per message
//! - `TransferAdmin`/`ClaimAdmin`/`UpdateAdmin`/`DiscardAdmin`/`CancelAdminTransfer`:
//!   Admin governance of an integrator's registry
//! - `SendMessage`: Queue an outbound message for every enabled send adapter
//! - `PickUpMessage`: Called by each send adapter; the last pickup closes the outbox
//! - `AttestMessage`: Called by receive adapters for an inbound message
//! - `RecvMessage`/`ExecMessage`: Integrator checks and consumes an attested message
//!
//! ## Security Model
//!
//! - Integrators and adapters call in with their program-derived signers
//!   (["endpoint_integrator"] and ["adapter_pda"]), compared by equality
//! - Only the integrator's admin changes its registry, never during a pending transfer
//! - A message executes at most once, and only once enough enabled adapters attested

pub mod address;
pub mod bitmap;
pub mod config;
pub mod error;
pub mod events;
pub mod governance;
pub mod instruction;
pub mod message;
pub mod peer;
pub mod processor;
pub mod query;
pub mod state;

pub use account_ledger;
pub use solana_program;

// Re-export for external use
pub use address::UniversalAddress;
pub use bitmap::{Bitmap, MAX_ADAPTERS};
pub use error::EndpointError;
pub use instruction::{AdapterChainArgs, EndpointInstruction};
pub use message::Message;
pub use state::{
    seeds, AdapterInfo, AttestationInfo, EndpointConfig, IntegratorChainConfig, IntegratorConfig,
    OutboxMessage, SequenceTracker,
};

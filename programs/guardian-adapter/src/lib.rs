//! Guardian Adapter Program (Native Solana)
//!
//! Carries endpoint messages over a guardian network.
//!
//! ## Instructions
//!
//! - `Initialize`: Set admin, endpoint, guardian program, chain id, consistency level and fee
//! - `TransferAdmin`/`ClaimAdmin`/`UpdateAdmin`/`DiscardAdmin`/`CancelAdminTransfer`: Admin governance
//! - `SetPeer`: Register the adapter contract of a remote chain (write-once)
//! - `PickUpMessage`: Pick a message up from the endpoint outbox and post it for the guardians
//! - `ReceiveMessage`: Attest a guardian-verified message from a registered peer to the endpoint
//!
//! ## Wire Format
//!
//! Posted payloads are 106-byte big-endian `GuardianMessage`s, see [`message`].

pub mod error;
pub mod events;
pub mod instruction;
pub mod message;
pub mod processor;
pub mod query;
pub mod settings;
pub mod state;

// Re-export for external use
pub use error::GuardianAdapterError;
pub use instruction::GuardianAdapterInstruction;
pub use message::{GuardianMessage, PostedVaa};
pub use state::{seeds, Config, ConsistencyLevel, EmitterSequence, Peer, PostedMessage};

//! The logical cross-chain message and its hash.

use borsh::{BorshDeserialize, BorshSerialize};
use sha3::{Digest, Keccak256};

use crate::address::UniversalAddress;

/// Everything that identifies one inbound message. Adapters attest to exactly
/// these fields; the payload itself only travels as its hash.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Message {
    pub src_chain: u16,
    pub src_addr: UniversalAddress,
    pub sequence: u64,
    pub dst_chain: u16,
    pub dst_addr: UniversalAddress,
    pub payload_hash: [u8; 32],
}

impl Message {
    /// keccak256(src_chain ‖ src_addr ‖ sequence ‖ dst_chain ‖ dst_addr ‖ payload_hash),
    /// integers big-endian.
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(self.src_chain.to_be_bytes());
        hasher.update(self.src_addr.as_bytes());
        hasher.update(self.sequence.to_be_bytes());
        hasher.update(self.dst_chain.to_be_bytes());
        hasher.update(self.dst_addr.as_bytes());
        hasher.update(self.payload_hash);
        hasher.finalize().into()
    }
}

/// keccak256 of a raw payload, the digest integrators pass to `send_message`.
pub fn payload_digest(payload: &[u8]) -> [u8; 32] {
    Keccak256::digest(payload).into()
}

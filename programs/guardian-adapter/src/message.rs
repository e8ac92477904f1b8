//! Guardian network wire format.
//!
//! A `GuardianMessage` is the fixed 106-byte big-endian payload the adapter
//! posts for every picked-up outbox message:
//!
//! ```text
//! src_addr (32) | sequence (8) | dst_chain (2) | dst_addr (32) | payload_hash (32)
//! ```
//!
//! Borsh is little-endian, so the codec is written by hand.

use borsh::{BorshDeserialize, BorshSerialize};
use messaging_endpoint::{Message, OutboxMessage, UniversalAddress};
use solana_program::pubkey::Pubkey;

use crate::error::GuardianAdapterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuardianMessage {
    pub src_addr: UniversalAddress,
    pub sequence: u64,
    pub dst_chain: u16,
    pub dst_addr: UniversalAddress,
    pub payload_hash: [u8; 32],
}

impl GuardianMessage {
    pub const SIZE: usize = 32 + 8 + 2 + 32 + 32; // 106 bytes

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        out.extend_from_slice(self.src_addr.as_bytes());
        out.extend_from_slice(&self.sequence.to_be_bytes());
        out.extend_from_slice(&self.dst_chain.to_be_bytes());
        out.extend_from_slice(self.dst_addr.as_bytes());
        out.extend_from_slice(&self.payload_hash);
        out
    }

    pub fn decode(data: &[u8]) -> Result<Self, GuardianAdapterError> {
        if data.len() != Self::SIZE {
            return Err(GuardianAdapterError::InvalidPayloadLength);
        }
        let (src_addr, rest) = split_array::<32>(data)?;
        let (sequence, rest) = split_array::<8>(rest)?;
        let (dst_chain, rest) = split_array::<2>(rest)?;
        let (dst_addr, rest) = split_array::<32>(rest)?;
        let (payload_hash, _) = split_array::<32>(rest)?;

        Ok(Self {
            src_addr: UniversalAddress::from_bytes(src_addr),
            sequence: u64::from_be_bytes(sequence),
            dst_chain: u16::from_be_bytes(dst_chain),
            dst_addr: UniversalAddress::from_bytes(dst_addr),
            payload_hash,
        })
    }

    /// The endpoint message this payload attests to, as seen from `src_chain`.
    pub fn to_endpoint_message(&self, src_chain: u16) -> Message {
        Message {
            src_chain,
            src_addr: self.src_addr,
            sequence: self.sequence,
            dst_chain: self.dst_chain,
            dst_addr: self.dst_addr,
            payload_hash: self.payload_hash,
        }
    }
}

impl From<&OutboxMessage> for GuardianMessage {
    fn from(outbox: &OutboxMessage) -> Self {
        Self {
            src_addr: outbox.src_addr,
            sequence: outbox.sequence,
            dst_chain: outbox.dst_chain,
            dst_addr: outbox.dst_addr,
            payload_hash: outbox.payload_hash,
        }
    }
}

fn split_array<const N: usize>(data: &[u8]) -> Result<([u8; N], &[u8]), GuardianAdapterError> {
    if data.len() < N {
        return Err(GuardianAdapterError::InvalidPayloadLength);
    }
    let (head, rest) = data.split_at(N);
    let array = head
        .try_into()
        .map_err(|_| GuardianAdapterError::InvalidPayloadLength)?;
    Ok((array, rest))
}

/// A guardian-verified message body, as handed to the adapter by the
/// verification layer. Signature checking happens before this point.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct PostedVaa {
    /// Program that verified the VAA; must be the configured guardian program
    pub verified_by: Pubkey,
    pub emitter_chain: u16,
    pub emitter_address: UniversalAddress,
    pub sequence: u64,
    pub payload: Vec<u8>,
}

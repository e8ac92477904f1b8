//! Chain-agnostic 32-byte addresses.

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// A 32-byte address on any chain. Shorter native addresses are left-padded with zeros.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniversalAddress {
    bytes: [u8; 32],
}

impl UniversalAddress {
    pub const ZERO: UniversalAddress = UniversalAddress { bytes: [0u8; 32] };

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    pub fn to_pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.bytes == [0u8; 32]
    }
}

impl From<Pubkey> for UniversalAddress {
    fn from(key: Pubkey) -> Self {
        Self::from_bytes(key.to_bytes())
    }
}

impl From<&Pubkey> for UniversalAddress {
    fn from(key: &Pubkey) -> Self {
        Self::from_bytes(key.to_bytes())
    }
}

impl From<[u8; 32]> for UniversalAddress {
    fn from(bytes: [u8; 32]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<UniversalAddress> for Pubkey {
    fn from(address: UniversalAddress) -> Self {
        address.to_pubkey()
    }
}

impl AsRef<[u8]> for UniversalAddress {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for UniversalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.bytes))
    }
}

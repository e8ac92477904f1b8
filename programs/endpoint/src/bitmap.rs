//! Fixed-width adapter set.
//!
//! Bit `i` stands for the adapter registered at index `i`. What the bit means
//! depends on the record holding the bitmap: enabled for a chain, still owed a
//! pickup, or attested to a message.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::EndpointError;

/// Number of adapters an integrator can register.
pub const MAX_ADAPTERS: usize = 128;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bitmap {
    map: u128,
}

impl Bitmap {
    pub const fn new() -> Self {
        Self { map: 0 }
    }

    pub const fn from_value(map: u128) -> Self {
        Self { map }
    }

    pub const fn as_value(&self) -> u128 {
        self.map
    }

    pub fn get(&self, index: u8) -> Result<bool, EndpointError> {
        let mask = Self::mask(index)?;
        Ok(self.map & mask != 0)
    }

    pub fn set(&mut self, index: u8, value: bool) -> Result<(), EndpointError> {
        let mask = Self::mask(index)?;
        if value {
            self.map |= mask;
        } else {
            self.map &= !mask;
        }
        Ok(())
    }

    pub fn count_ones(&self) -> u32 {
        self.map.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.map == 0
    }

    pub fn intersection(&self, other: &Bitmap) -> Bitmap {
        Bitmap::from_value(self.map & other.map)
    }

    /// Indices of the set bits, lowest first.
    pub fn indices(&self) -> impl Iterator<Item = u8> + '_ {
        (0..MAX_ADAPTERS as u8).filter(move |i| self.map & (1u128 << i) != 0)
    }

    fn mask(index: u8) -> Result<u128, EndpointError> {
        if usize::from(index) >= MAX_ADAPTERS {
            return Err(EndpointError::BitmapIndexOutOfBounds);
        }
        Ok(1u128 << index)
    }
}

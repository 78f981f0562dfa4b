//! Management of the block allocation bitmap.
//!
//! The bitmap is a cache: the header table is the source of truth, and
//! `rebuild` reproduces the bitmap from it at any time. Create and delete
//! keep it current incrementally; after loading a region from outside the
//! process it must be rebuilt before any allocation, or blocks already
//! owned by loaded headers would be handed out again.

use crate::config::*;
use crate::error::FsError;
use crate::region::Storage;
use crate::table::load_header;
use crate::Result;

const BITMAP_BYTES: usize = BLOCK_COUNT.div_ceil(8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockBitmap {
    bits: [u8; BITMAP_BYTES],
}

impl BlockBitmap {
    pub const fn new() -> Self {
        Self {
            bits: [0; BITMAP_BYTES],
        }
    }

    /// Clears the bitmap, then marks every block owned by an occupied
    /// header. A block claimed by two headers is corrupt state.
    pub fn rebuild(&mut self, storage: &Storage) -> Result<()> {
        self.bits = [0; BITMAP_BYTES];
        for slot in 0..MAX_HEADERS {
            let header = load_header(storage, slot)?;
            if header.free {
                continue;
            }
            for block_id in header.blocks.iter().flatten() {
                if self.set(*block_id)? {
                    return Err(FsError::CorruptHeader);
                }
            }
        }
        Ok(())
    }

    pub fn is_set(&self, block_id: u8) -> Result<bool> {
        if block_id as usize >= BLOCK_COUNT {
            return Err(FsError::OutOfBounds);
        }
        Ok(self.bits[block_id as usize / 8] & (1 << (block_id % 8)) != 0)
    }

    /// Marks a block allocated. Returns the previous value of the bit.
    pub fn set(&mut self, block_id: u8) -> Result<bool> {
        let pre_value = self.is_set(block_id)?;
        self.bits[block_id as usize / 8] |= 1 << (block_id % 8);
        Ok(pre_value)
    }

    /// Marks a block free. Returns the previous value of the bit.
    pub fn clear(&mut self, block_id: u8) -> Result<bool> {
        let pre_value = self.is_set(block_id)?;
        self.bits[block_id as usize / 8] &= !(1 << (block_id % 8));
        Ok(pre_value)
    }

    /// Indices of all free blocks, ascending. Creation takes its
    /// destinations from the front of this list.
    pub fn free_blocks(&self) -> Vec<u8> {
        (0..BLOCK_COUNT as u8)
            .filter(|&id| self.bits[id as usize / 8] & (1 << (id % 8)) == 0)
            .collect()
    }

    pub fn free_count(&self) -> usize {
        self.free_blocks().len()
    }
}

impl Default for BlockBitmap {
    fn default() -> Self {
        Self::new()
    }
}

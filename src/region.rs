//! The storage region: one fixed-size buffer split into the header table
//! and the block pool. All access goes through bounds-checked slices
//! addressed by slot/block index, never by raw offset.

use crate::config::*;
use crate::error::FsError;
use crate::Result;

pub struct Storage {
    bytes: Box<[u8; REGION_SIZE]>,
}

impl Storage {
    /// A zeroed region. Callers format it via `table::init_table` before use.
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0u8; REGION_SIZE]),
        }
    }

    /// Wraps an externally produced image. The caller must rebuild the
    /// block bitmap before allocating anything out of this region.
    pub fn from_bytes(image: &[u8]) -> Result<Self> {
        if image.len() != REGION_SIZE {
            return Err(FsError::InvalidImage);
        }
        let mut bytes = Box::new([0u8; REGION_SIZE]);
        bytes.copy_from_slice(image);
        Ok(Self { bytes })
    }

    /// The verbatim region bytes: header table followed by block pool.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    pub(crate) fn header_table_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..HEADER_TABLE_BYTES]
    }

    pub(crate) fn header_record(&self, slot: usize) -> Result<&[u8]> {
        if slot >= MAX_HEADERS {
            return Err(FsError::OutOfBounds);
        }
        let start = slot * HEADER_SIZE;
        Ok(&self.bytes[start..start + HEADER_SIZE])
    }

    pub(crate) fn header_record_mut(&mut self, slot: usize) -> Result<&mut [u8]> {
        if slot >= MAX_HEADERS {
            return Err(FsError::OutOfBounds);
        }
        let start = slot * HEADER_SIZE;
        Ok(&mut self.bytes[start..start + HEADER_SIZE])
    }

    pub(crate) fn block(&self, block_id: u8) -> Result<&[u8]> {
        if block_id as usize >= BLOCK_COUNT {
            return Err(FsError::OutOfBounds);
        }
        let start = HEADER_TABLE_BYTES + block_id as usize * BLOCK_SIZE;
        Ok(&self.bytes[start..start + BLOCK_SIZE])
    }

    pub(crate) fn block_mut(&mut self, block_id: u8) -> Result<&mut [u8]> {
        if block_id as usize >= BLOCK_COUNT {
            return Err(FsError::OutOfBounds);
        }
        let start = HEADER_TABLE_BYTES + block_id as usize * BLOCK_SIZE;
        Ok(&mut self.bytes[start..start + BLOCK_SIZE])
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

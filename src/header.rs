//! The file header record: one fixed-size directory entry per file.

use crate::config::*;
use crate::error::FsError;
use crate::Result;

/// In-memory form of one header-table record.
///
/// On the image the record is 16 bytes: `free` (1 byte, nonzero = free),
/// `name` (9 bytes, zero-padded), `blocks` (5 signed bytes, a negative
/// byte ends the list), `last_block_filled` (1 byte). In memory the block
/// list keeps an `Option` per slot instead of the negative sentinel; the
/// occupied prefix is the file's block run in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub free: bool,
    pub name: [u8; MAX_NAME_LEN],
    pub blocks: [Option<u8>; MAX_FILE_BLOCKS],
    pub last_block_filled: u8,
}

pub fn trim_zero(name: &[u8]) -> &[u8] {
    let mut end = name.len();
    while end > 0 && name[end - 1] == 0 {
        end -= 1;
    }
    &name[..end]
}

fn name_cmp(n1: &[u8], n2: &[u8]) -> bool {
    trim_zero(n1) == trim_zero(n2)
}

impl FileHeader {
    pub const EMPTY: Self = Self {
        free: true,
        name: [0; MAX_NAME_LEN],
        blocks: [None; MAX_FILE_BLOCKS],
        last_block_filled: 0,
    };

    pub fn name_eq(&self, name: &[u8]) -> bool {
        name_cmp(&self.name, name)
    }

    /// Length of the occupied prefix of the block list.
    pub fn blocks_used(&self) -> usize {
        self.blocks.iter().take_while(|b| b.is_some()).count()
    }

    /// File size in bytes. Zero for a header owning no blocks.
    pub fn size(&self) -> usize {
        let used = self.blocks_used();
        if used == 0 {
            return 0;
        }
        (used - 1) * BLOCK_SIZE + self.last_block_filled as usize + 1
    }

    /// Serializes into the 16-byte on-image record.
    pub fn encode(&self, buf: &mut [u8]) {
        buf[0] = self.free as u8;
        buf[1..1 + MAX_NAME_LEN].copy_from_slice(&self.name);
        for (i, slot) in self.blocks.iter().enumerate() {
            buf[1 + MAX_NAME_LEN + i] = slot.unwrap_or(NO_BLOCK);
        }
        buf[HEADER_SIZE - 1] = self.last_block_filled;
    }

    /// Deserializes a 16-byte on-image record.
    ///
    /// Free records decode to `EMPTY` without looking at the remaining
    /// fields (they carry no meaning). Occupied records are validated:
    /// a block index at or past `BLOCK_COUNT` is corrupt, and anything
    /// after the first sentinel is ignored.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf[0] != 0 {
            return Ok(Self::EMPTY);
        }

        let mut name = [0u8; MAX_NAME_LEN];
        name.copy_from_slice(&buf[1..1 + MAX_NAME_LEN]);

        let mut blocks = [None; MAX_FILE_BLOCKS];
        for i in 0..MAX_FILE_BLOCKS {
            let raw = buf[1 + MAX_NAME_LEN + i] as i8;
            if raw < 0 {
                break;
            }
            if raw as usize >= BLOCK_COUNT {
                return Err(FsError::CorruptHeader);
            }
            blocks[i] = Some(raw as u8);
        }

        Ok(Self {
            free: false,
            name,
            blocks,
            last_block_filled: buf[HEADER_SIZE - 1],
        })
    }
}

pub const REGION_SIZE: usize = 16384; // Total size of the storage region in bytes

pub const BLOCK_SIZE: usize = 256;
pub const MAX_NAME_LEN: usize = 9; // File name capacity, zero-padded, not necessarily NUL-terminated
pub const MAX_FILE_BLOCKS: usize = 5; // Direct block slots per header
pub const MAX_HEADERS: usize = 256; // Header table capacity; bounds the number of live files

pub const HEADER_SIZE: usize = 16; // free (1) + name (9) + blocks (5) + last_block_filled (1)
pub const HEADER_TABLE_BYTES: usize = MAX_HEADERS * HEADER_SIZE;

pub const BLOCK_COUNT: usize = (REGION_SIZE - HEADER_TABLE_BYTES) / BLOCK_SIZE;
pub const MAX_FILE_SIZE: usize = MAX_FILE_BLOCKS * BLOCK_SIZE;

/// End-of-list marker for a block slot in the on-image record.
/// Any negative byte (as i8) terminates the list; this is the canonical one.
pub const NO_BLOCK: u8 = 0xFF;

// The header table must leave room for at least one block.
const _: () = assert!(HEADER_TABLE_BYTES + BLOCK_SIZE <= REGION_SIZE);
// Block indices travel as signed bytes in the image.
const _: () = assert!(BLOCK_COUNT <= i8::MAX as usize);

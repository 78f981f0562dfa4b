//! Management of the header table at the front of the storage region.

use crate::config::*;
use crate::header::FileHeader;
use crate::region::Storage;
use crate::Result;

/// Marks every slot free. Running it again wipes all files.
pub fn init_table(storage: &mut Storage) {
    for record in storage.header_table_mut().chunks_exact_mut(HEADER_SIZE) {
        FileHeader::EMPTY.encode(record);
    }
}

pub fn load_header(storage: &Storage, slot: usize) -> Result<FileHeader> {
    FileHeader::decode(storage.header_record(slot)?)
}

pub fn store_header(storage: &mut Storage, slot: usize, header: &FileHeader) -> Result<()> {
    header.encode(storage.header_record_mut(slot)?);
    Ok(())
}

/// Linear scan for the first occupied slot whose name matches exactly.
/// Lookup is first-match, which is why `create` refuses duplicates.
pub fn find_by_name(storage: &Storage, name: &[u8]) -> Result<Option<(usize, FileHeader)>> {
    for slot in 0..MAX_HEADERS {
        let header = load_header(storage, slot)?;
        if header.free {
            continue;
        }
        if header.name_eq(name) {
            return Ok(Some((slot, header)));
        }
    }
    Ok(None)
}

/// First free slot in index order, or `None` when the table is full.
pub fn alloc_slot(storage: &Storage) -> Result<Option<usize>> {
    for slot in 0..MAX_HEADERS {
        if load_header(storage, slot)?.free {
            return Ok(Some(slot));
        }
    }
    Ok(None)
}

/// Returns the slot to the free state: name cleared, block list reset to
/// all-empty, `last_block_filled` zeroed. A freed-then-reused slot never
/// sees a stale block list.
pub fn free_slot(storage: &mut Storage, slot: usize) -> Result<()> {
    store_header(storage, slot, &FileHeader::EMPTY)
}

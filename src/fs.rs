use crate::bitmap::BlockBitmap;
use crate::config::*;
use crate::header::FileHeader;
use crate::region::Storage;
use crate::sink::ByteSink;
use crate::table::{alloc_slot, find_by_name, free_slot, init_table, load_header, store_header};
use crate::{Error, Result};

/// One filesystem instance: the storage region plus its derived block
/// bitmap. All operations go through this value; there is no process
/// global, so independent instances can coexist.
pub struct FileSystem {
    storage: Storage,
    bitmap: BlockBitmap,
}

impl FileSystem {
    /// A freshly formatted filesystem: every header slot free, every
    /// block unallocated.
    pub fn new() -> Self {
        let mut storage = Storage::new();
        init_table(&mut storage);
        Self {
            storage,
            bitmap: BlockBitmap::new(),
        }
    }

    /// Adopts a region image produced elsewhere (the verbatim bytes of
    /// `image()`). Every header is validated and the bitmap rebuilt, so
    /// subsequent allocation cannot double-assign blocks the loaded
    /// headers already own.
    pub fn from_image(image: &[u8]) -> Result<Self> {
        let storage = Storage::from_bytes(image)?;
        let mut bitmap = BlockBitmap::new();
        bitmap.rebuild(&storage)?;
        Ok(Self { storage, bitmap })
    }

    /// The region bytes, header table followed by block pool. Writing
    /// these verbatim is the interchange format.
    pub fn image(&self) -> &[u8] {
        self.storage.as_bytes()
    }

    /// Creates a file, copying `data` into freshly allocated blocks.
    /// Returns the header slot of the new file.
    ///
    /// Nothing is allocated unless the whole operation succeeds: size and
    /// free-space checks come first, and the header slot is claimed
    /// before any bitmap bit is set, so a full table cannot leak blocks.
    pub fn create(&mut self, name: &str, data: &[u8]) -> Result<usize> {
        let name = name.as_bytes();
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(Error::InvalidFileName);
        }
        if find_by_name(&self.storage, name)?.is_some() {
            // Lookup is first-match; a second live file with the same
            // name would be unreachable.
            return Err(Error::AlreadyExists);
        }
        if data.is_empty() {
            return Err(Error::EmptyFile);
        }

        let blocks_needed = data.len().div_ceil(BLOCK_SIZE);
        if blocks_needed > MAX_FILE_BLOCKS {
            return Err(Error::FileTooLarge);
        }
        // Exact multiples of BLOCK_SIZE fill their last block completely.
        let last_block_filled = ((data.len() - 1) % BLOCK_SIZE) as u8;

        let free = self.bitmap.free_blocks();
        if free.len() < blocks_needed {
            return Err(Error::OutOfSpace);
        }
        let slot = alloc_slot(&self.storage)?.ok_or(Error::TableFull)?;

        let mut header = FileHeader::EMPTY;
        header.free = false;
        header.name[..name.len()].copy_from_slice(name);
        header.last_block_filled = last_block_filled;
        for (i, &block_id) in free[..blocks_needed].iter().enumerate() {
            header.blocks[i] = Some(block_id);
            self.bitmap.set(block_id)?;
        }
        store_header(&mut self.storage, slot, &header)?;

        for (i, chunk) in data.chunks(BLOCK_SIZE).enumerate() {
            let block = self.storage.block_mut(free[i])?;
            block[..chunk.len()].copy_from_slice(chunk);
            // Don't leak whatever the block held before into the image.
            block[chunk.len()..].fill(0);
        }

        Ok(slot)
    }

    /// Resolves a name to its header slot.
    pub fn find(&self, name: &str) -> Result<usize> {
        match find_by_name(&self.storage, name.as_bytes())? {
            Some((slot, _)) => Ok(slot),
            None => Err(Error::NotFound),
        }
    }

    pub fn header(&self, slot: usize) -> Result<FileHeader> {
        load_header(&self.storage, slot)
    }

    /// Deletes a file: every owned block returns to the free pool and the
    /// header slot is fully reset. The region is untouched on `NotFound`.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let (slot, header) = match find_by_name(&self.storage, name.as_bytes())? {
            Some(found) => found,
            None => return Err(Error::NotFound),
        };
        for block_id in header.blocks.iter().flatten() {
            self.bitmap.clear(*block_id)?;
        }
        free_slot(&mut self.storage, slot)
    }

    /// Reads a file's bytes back out of its blocks. Pure: no state changes.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let (_, header) = find_by_name(&self.storage, name.as_bytes())?.ok_or(Error::NotFound)?;
        self.read_header(&header)
    }

    fn read_header(&self, header: &FileHeader) -> Result<Vec<u8>> {
        let used = header.blocks_used();
        if header.free || used == 0 {
            return Err(Error::CorruptHeader);
        }

        let mut out = Vec::with_capacity(header.size());
        for (i, block_id) in header.blocks.iter().flatten().enumerate() {
            let block = self.storage.block(*block_id)?;
            let len = if i == used - 1 {
                header.last_block_filled as usize + 1
            } else {
                BLOCK_SIZE
            };
            out.extend_from_slice(&block[..len]);
        }
        Ok(out)
    }

    /// Reads a file and hands its bytes to the sink collaborator under
    /// the given destination identifier.
    pub fn export(&self, name: &str, destination: &str, sink: &mut impl ByteSink) -> Result<()> {
        let data = self.read(name)?;
        sink.write(destination, &data)
    }

    /// Recomputes the bitmap from the header table. Idempotent; after any
    /// create/delete sequence the result equals the incrementally
    /// maintained bitmap.
    pub fn rebuild_bitmap(&mut self) -> Result<()> {
        self.bitmap.rebuild(&self.storage)
    }

    pub fn free_block_count(&self) -> usize {
        self.bitmap.free_count()
    }

    pub fn free_block_list(&self) -> Vec<u8> {
        self.bitmap.free_blocks()
    }

    /// All occupied headers with their slots, in table order.
    pub fn files(&self) -> Result<Vec<(usize, FileHeader)>> {
        let mut out = Vec::new();
        for slot in 0..MAX_HEADERS {
            let header = load_header(&self.storage, slot)?;
            if !header.free {
                out.push((slot, header));
            }
        }
        Ok(out)
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

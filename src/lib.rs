//! Flatfs is a tiny flat filesystem over a fixed-size storage region.
//! No directories, no indirection, no growth after creation: one name
//! maps to one run of direct block pointers.
//!
//! Region layout (16384 bytes total):
//! - Header table: 256 records of 16 bytes each
//! - Block pool: the remaining bytes sliced into 256-byte blocks
//!
//! Layers, bottom to top:
//! 1. Storage: the region buffer, bounds-checked slot/block views.
//! 2. Header table: fixed directory of file records, source of truth.
//! 3. Block bitmap: derived allocation cache, rebuildable from the table.
//! 4. FileSystem: create/find/delete/read/export over the three below.
//!
//! The region bytes themselves are the interchange format: write
//! `FileSystem::image()` verbatim, load it back with `from_image`.

mod bitmap;
mod config;
mod error;
mod fs;
mod header;
mod region;
mod sink;
mod table;

pub use bitmap::BlockBitmap;
pub use config::*;
pub use error::FsError as Error;
pub use error::Result;
pub use fs::FileSystem;
pub use header::{trim_zero, FileHeader};
pub use region::Storage;
pub use sink::ByteSink;
pub use table::{alloc_slot, find_by_name, free_slot, init_table, load_header, store_header};

#![allow(unused)]

mod common;

use flatfs::{
    alloc_slot, find_by_name, init_table, load_header, store_header, Error, FileHeader, FileSystem,
    Storage, BLOCK_COUNT, BLOCK_SIZE, MAX_FILE_SIZE, MAX_HEADERS,
};

#[test]
fn test_lowest_index_first() {
    let mut fs = FileSystem::new();
    let slot = fs.create("first", &vec![1u8; 300]).unwrap();
    let header = fs.header(slot).unwrap();
    assert_eq!(header.blocks[0], Some(0));
    assert_eq!(header.blocks[1], Some(1));
    assert_eq!(header.blocks[2], None);
}

#[test]
fn test_delete_frees_exact_blocks() {
    // Freed blocks are the next ones handed out, lowest index first.
    let mut fs = FileSystem::new();
    fs.create("a", &vec![1u8; 2 * BLOCK_SIZE]).unwrap();
    fs.create("b", &vec![2u8; 2 * BLOCK_SIZE]).unwrap();
    fs.delete("a").unwrap();

    let slot = fs.create("c", &vec![3u8; 2 * BLOCK_SIZE]).unwrap();
    let header = fs.header(slot).unwrap();
    assert_eq!(header.blocks[0], Some(0));
    assert_eq!(header.blocks[1], Some(1));

    // "b" kept its blocks.
    let header_b = fs.header(fs.find("b").unwrap()).unwrap();
    assert_eq!(header_b.blocks[0], Some(2));
    assert_eq!(header_b.blocks[1], Some(3));
}

#[test]
fn test_space_exhaustion() {
    let mut fs = FileSystem::new();
    // 9 five-block files plus 3 single-block files claim all 48 blocks.
    for i in 0..9 {
        fs.create(&format!("big{}", i), &vec![1u8; MAX_FILE_SIZE])
            .unwrap();
    }
    for i in 0..3 {
        fs.create(&format!("small{}", i), &[1u8]).unwrap();
    }
    assert_eq!(fs.free_block_count(), 0);

    let result = fs.create("onemore", &[1u8]);
    assert_eq!(result, Err(Error::OutOfSpace));
    // A failed create leaves the bitmap untouched.
    assert_eq!(fs.free_block_count(), 0);
    assert_eq!(fs.find("onemore"), Err(Error::NotFound));

    fs.delete("small0").unwrap();
    assert_eq!(fs.free_block_count(), 1);
    fs.create("onemore", &[1u8]).unwrap();
}

#[test]
fn test_partial_failure_leaves_no_state() {
    let mut fs = FileSystem::new();
    for i in 0..9 {
        fs.create(&format!("big{}", i), &vec![1u8; MAX_FILE_SIZE])
            .unwrap();
    }
    // 3 blocks left; a 4-block file must allocate nothing.
    assert_eq!(fs.free_block_count(), 3);
    let free_before = fs.free_block_list();
    let result = fs.create("partial", &vec![1u8; 4 * BLOCK_SIZE]);
    assert_eq!(result, Err(Error::OutOfSpace));
    assert_eq!(fs.free_block_list(), free_before);
    assert_eq!(fs.files().unwrap().len(), 9);
}

#[test]
fn test_rebuild_idempotent() {
    let mut fs = FileSystem::new();
    fs.create("a", &vec![1u8; 700]).unwrap();
    fs.create("b", &vec![2u8; 100]).unwrap();
    fs.delete("a").unwrap();
    fs.create("c", &vec![3u8; 1280]).unwrap();

    // Rebuild must reproduce the incrementally maintained bitmap,
    // and rebuilding again must change nothing.
    let incremental = fs.free_block_list();
    fs.rebuild_bitmap().unwrap();
    assert_eq!(fs.free_block_list(), incremental);
    fs.rebuild_bitmap().unwrap();
    assert_eq!(fs.free_block_list(), incremental);
}

#[test]
fn test_rebuild_after_many_mutations() {
    let mut fs = FileSystem::new();
    for round in 0..5 {
        for i in 0..6 {
            fs.create(&format!("f{}_{}", round, i), &vec![i as u8; 300 + i * 100])
                .unwrap();
        }
        for i in (0..6).step_by(2) {
            fs.delete(&format!("f{}_{}", round, i)).unwrap();
        }
        let incremental = fs.free_block_list();
        fs.rebuild_bitmap().unwrap();
        assert_eq!(fs.free_block_list(), incremental);
        for i in (1..6).step_by(2) {
            fs.delete(&format!("f{}_{}", round, i)).unwrap();
        }
    }
    assert_eq!(fs.free_block_count(), BLOCK_COUNT);
}

#[test]
fn test_table_full() {
    // With 48 blocks and 256 slots a well-formed region runs out of
    // space long before slots, so exercise the table layer directly.
    let mut storage = Storage::new();
    init_table(&mut storage);
    assert_eq!(alloc_slot(&storage).unwrap(), Some(0));

    let mut occupied = FileHeader::EMPTY;
    occupied.free = false;
    occupied.name[0] = b'x';
    occupied.blocks[0] = Some(0);
    for slot in 0..MAX_HEADERS {
        store_header(&mut storage, slot, &occupied).unwrap();
    }
    assert_eq!(alloc_slot(&storage).unwrap(), None);
}

#[test]
fn test_init_table_wipes() {
    let mut storage = Storage::new();
    init_table(&mut storage);

    let mut header = FileHeader::EMPTY;
    header.free = false;
    header.name[..3].copy_from_slice(b"abc");
    header.blocks[0] = Some(7);
    store_header(&mut storage, 5, &header).unwrap();
    assert!(find_by_name(&storage, b"abc").unwrap().is_some());

    // Re-running initialization wipes every file.
    init_table(&mut storage);
    assert!(find_by_name(&storage, b"abc").unwrap().is_none());
    assert_eq!(alloc_slot(&storage).unwrap(), Some(0));
    assert_eq!(load_header(&storage, 5).unwrap(), FileHeader::EMPTY);
}

#[test]
fn test_lowest_slot_wins() {
    let mut fs = FileSystem::new();
    let s0 = fs.create("a", &[1]).unwrap();
    let s1 = fs.create("b", &[2]).unwrap();
    let s2 = fs.create("c", &[3]).unwrap();
    assert_eq!((s0, s1, s2), (0, 1, 2));

    fs.delete("b").unwrap();
    // The lowest free slot is reused even though a higher one was freed later.
    fs.delete("a").unwrap();
    assert_eq!(fs.create("d", &[4]).unwrap(), 0);
    assert_eq!(fs.create("e", &[5]).unwrap(), 1);
}

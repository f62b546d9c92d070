//! Compile-time assertion that the public reader and iterator types are
//! `Send + Sync` (spec §5: read-only mmaps may be shared across threads
//! even though the crate itself spawns none).

mod common;

use lazy_mmap_csv::{LazyCsv, LazyCsvIter};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn reader_and_iterator_are_send_sync() {
    assert_send_sync::<LazyCsv>();
    assert_send_sync::<LazyCsvIter>();
}

#[test]
fn reader_can_cross_a_thread_boundary() {
    use lazy_mmap_csv::Sequence;

    let (reader, _file) = common::open(b"a,b\n1,2\n3,4\n");
    let handle = std::thread::spawn(move || {
        reader.sequence(Sequence::col(0)).unwrap().to_list()
    });

    let column = handle.join().unwrap();
    assert_eq!(column.len(), 2);
}

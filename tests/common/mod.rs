use std::io::Write;

use lazy_mmap_csv::{LazyCsv, LazyCsvOptions};
use tempfile::NamedTempFile;

/// Writes `contents` to a fresh temporary file and opens it with the
/// default reader options. Kept alongside the returned reader so the file
/// isn't unlinked before the mmap it backs is dropped.
#[allow(dead_code)]
pub fn open(contents: &[u8]) -> (LazyCsv, NamedTempFile) {
    let mut file = NamedTempFile::new().expect("create temp csv");
    file.write_all(contents).expect("write temp csv");
    let reader = LazyCsv::open(file.path()).expect("open reader");
    (reader, file)
}

#[allow(dead_code)]
pub fn open_with(contents: &[u8], options: LazyCsvOptions) -> (LazyCsv, NamedTempFile) {
    let mut file = NamedTempFile::new().expect("create temp csv");
    file.write_all(contents).expect("write temp csv");
    let reader = options.open(file.path()).expect("open reader");
    (reader, file)
}

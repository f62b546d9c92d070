//! A lazy, memory-mapped, columnar-accessible CSV reader.
//!
//! [`LazyCsv::open`] makes one streaming pass over a CSV file, writing three
//! compact index files to a scratch directory, then memory-maps the CSV and
//! its indices. After that single pass, [`LazyCsv::get`] answers any
//! `(row, col)` cell, and [`LazyCsv::sequence`] walks a whole row or column,
//! in constant or near-constant time, without ever loading the file's
//! contents into memory.
//!
//! ```no_run
//! use lazy_mmap_csv::{LazyCsv, Sequence};
//!
//! let reader = LazyCsv::open("data.csv")?;
//! let cell = reader.get(0, 0)?;
//! assert_eq!(cell.as_ref(), b"first-cell");
//!
//! let column: Vec<_> = reader.sequence(Sequence::col(1))?.to_list();
//! # Ok::<(), lazy_mmap_csv::LazyCsvError>(())
//! ```

mod cell;
mod decoder;
mod encoder;
mod error;
mod iterator;
mod layout;
mod options;
mod reader;
mod scanner;
mod structures;
mod writer;

pub use error::{LazyCsvError, Result};
pub use iterator::{LazyCsvIter, Sequence, SequenceAxis};
pub use layout::NewlineStyle;
pub use options::LazyCsvOptions;
pub use reader::LazyCsv;

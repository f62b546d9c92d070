use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{LazyCsvError, Result};

/// An append-only, fixed-capacity byte buffer flushing to a file at
/// capacity (spec §4.1).
///
/// Callers always pass whole, pre-sized records (anchors, row index
/// entries, narrow comma slots), so a flush never needs to split one
/// caller-visible atom across two writes: the buffer simply drains before
/// the next record is appended.
pub struct BufferedWriter {
    file: BufWriter<File>,
    path: PathBuf,
    buf: Vec<u8>,
    capacity: usize,
}

impl BufferedWriter {
    pub fn create(path: &Path, capacity: usize) -> Result<Self> {
        let file = File::create(path).map_err(|source| LazyCsvError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            file: BufWriter::with_capacity(capacity, file),
            path: path.to_path_buf(),
            buf: Vec::with_capacity(capacity),
            capacity,
        })
    }

    fn io_err(&self, source: io::Error) -> LazyCsvError {
        LazyCsvError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Appends `bytes`, flushing first if it would not otherwise fit.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        if self.buf.len() + bytes.len() >= self.capacity {
            self.drain()?;
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    fn drain(&mut self) -> Result<()> {
        self.file.write_all(&self.buf).map_err(|e| self.io_err(e))?;
        self.buf.clear();
        Ok(())
    }

    /// Writes remaining buffered bytes and fsyncs the file.
    pub fn flush(&mut self) -> Result<()> {
        self.drain()?;
        self.file.flush().map_err(|e| self.io_err(e))?;
        self.file
            .get_ref()
            .sync_all()
            .map_err(|e| self.io_err(e))?;
        Ok(())
    }
}

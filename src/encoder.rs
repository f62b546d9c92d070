use std::path::Path;

use crate::error::Result;
use crate::layout::{AnchorPoint, RowIndexEntry};
use crate::writer::BufferedWriter;

/// One-pass index encoder (spec §4.2): emits narrow comma deltas, spawning
/// a fresh anchor whenever a delta would overflow the slot width.
pub struct IndexEncoder {
    comma: BufferedWriter,
    anchor: BufferedWriter,
    newline: BufferedWriter,
    slot_width: usize,
    max_delta: u64,
    current_anchor: AnchorPoint,
    row_index: RowIndexEntry,
}

impl IndexEncoder {
    pub fn create(
        comma_path: &Path,
        anchor_path: &Path,
        newline_path: &Path,
        buffer_size: usize,
        slot_width: usize,
    ) -> Result<Self> {
        Ok(Self {
            comma: BufferedWriter::create(comma_path, buffer_size)?,
            anchor: BufferedWriter::create(anchor_path, buffer_size)?,
            newline: BufferedWriter::create(newline_path, buffer_size)?,
            slot_width,
            max_delta: if slot_width == 8 {
                u64::MAX
            } else {
                (1u64 << (8 * slot_width)) - 1
            },
            current_anchor: AnchorPoint { col: 0, value: 0 },
            row_index: RowIndexEntry { index: 0, count: 0 },
        })
    }

    /// Starts a new row whose first byte sits at `absolute_offset`.
    pub fn begin_row(&mut self, absolute_offset: u64) -> Result<()> {
        self.current_anchor = AnchorPoint {
            col: 0,
            value: absolute_offset,
        };
        self.anchor.write(&self.current_anchor.to_bytes())?;

        self.row_index.index += self.row_index.count * AnchorPoint::SIZE as u64;
        self.row_index.count = 1;

        // slot 0 is always relative to the row-start anchor: delta 0.
        self.write_delta(0)
    }

    /// Emits the comma slot for `current_column_slot`, whose boundary byte
    /// sits at `absolute_offset`.
    pub fn emit(&mut self, absolute_offset: u64, current_column_slot: u64) -> Result<()> {
        let delta = absolute_offset - self.current_anchor.value;

        if delta > self.max_delta {
            self.current_anchor = AnchorPoint {
                col: current_column_slot + 1,
                value: absolute_offset,
            };
            self.anchor.write(&self.current_anchor.to_bytes())?;
            self.row_index.count += 1;
            return self.write_delta(0);
        }

        self.write_delta(delta)
    }

    fn write_delta(&mut self, delta: u64) -> Result<()> {
        let bytes = delta.to_le_bytes();
        self.comma.write(&bytes[..self.slot_width])
    }

    /// Closes out the current row, appending its row index entry.
    pub fn end_row(&mut self) -> Result<()> {
        self.newline.write(&self.row_index.to_bytes())
    }

    /// Flushes and fsyncs all three index files.
    pub fn finish(mut self) -> Result<()> {
        self.comma.flush()?;
        self.anchor.flush()?;
        self.newline.flush()?;
        Ok(())
    }
}

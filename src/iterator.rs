use std::sync::Arc;

use bstr::BString;

use crate::reader::LazyCsvInner;

/// Which axis a [`Sequence`] (or the iterator it produces) holds fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceAxis {
    /// Fixed row; the iterator walks columns.
    Row(isize),
    /// Fixed column; the iterator walks rows.
    Col(isize),
}

/// Builder for an axis iterator (spec §4.6 / §6 `sequence(row=…, col=…,
/// reversed=…)`).
///
/// Exactly one of [`Sequence::row`]/[`Sequence::col`] fixes the axis; the
/// other dimension is walked from `start` (default 0) to `stop` (default
/// the axis length), `step` at a time, optionally in reverse.
#[derive(Clone, Copy, Debug)]
pub struct Sequence {
    axis: SequenceAxis,
    start: Option<isize>,
    stop: Option<isize>,
    step: usize,
    reversed: bool,
}

impl Sequence {
    /// Walks every column of a fixed `row`.
    pub fn row(row: isize) -> Self {
        Self {
            axis: SequenceAxis::Row(row),
            start: None,
            stop: None,
            step: 1,
            reversed: false,
        }
    }

    /// Walks every row of a fixed `col`.
    pub fn col(col: isize) -> Self {
        Self {
            axis: SequenceAxis::Col(col),
            start: None,
            stop: None,
            step: 1,
            reversed: false,
        }
    }

    /// Lower bound of the walked dimension (inclusive). Defaults to 0.
    pub fn start(mut self, start: isize) -> Self {
        self.start = Some(start);
        self
    }

    /// Upper bound of the walked dimension (exclusive). Defaults to the
    /// axis length.
    pub fn stop(mut self, stop: isize) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Stride between successive positions. Must be non-zero.
    pub fn step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// If set, walks the dimension back to front.
    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub(crate) fn axis(&self) -> SequenceAxis {
        self.axis
    }

    pub(crate) fn start_bound(&self) -> Option<isize> {
        self.start
    }

    pub(crate) fn stop_bound(&self) -> Option<isize> {
        self.stop
    }

    pub(crate) fn step_size(&self) -> usize {
        self.step
    }

    pub(crate) fn is_reversed(&self) -> bool {
        self.reversed
    }
}

/// Stateful cursor over a row or column (spec §4.6). `next()` materializes
/// and returns one cell at a time; [`LazyCsvIter::to_list`] (via the
/// standard [`Iterator`] impl) drains the rest eagerly.
///
/// Holds a shared, reference-counted handle onto the reader's storage
/// rather than a borrow, so an iterator may outlive the [`crate::LazyCsv`]
/// handle that spawned it (spec §5: the reader is torn down only after its
/// last outstanding iterator).
pub struct LazyCsvIter {
    reader: Arc<LazyCsvInner>,
    fixed: SequenceAxis,
    position: usize,
    stop: usize,
    step: usize,
    reversed: bool,
}

impl LazyCsvIter {
    pub(crate) fn new(
        reader: Arc<LazyCsvInner>,
        fixed: SequenceAxis,
        start: usize,
        stop: usize,
        step: usize,
        reversed: bool,
    ) -> Self {
        Self {
            reader,
            fixed,
            position: start,
            stop,
            step,
            reversed,
        }
    }

    /// Eagerly materializes every remaining cell into an ordered vector.
    pub fn to_list(self) -> Vec<BString> {
        self.collect()
    }

    fn axis_len(&self) -> usize {
        match self.fixed {
            SequenceAxis::Row(_) => self.reader.cols(),
            SequenceAxis::Col(_) => self.reader.rows(),
        }
    }
}

impl Iterator for LazyCsvIter {
    type Item = BString;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.stop {
            return None;
        }

        let len = self.axis_len();
        let walked = if self.reversed {
            len - 1 - self.position
        } else {
            self.position
        };

        let cell = match self.fixed {
            SequenceAxis::Row(row) => self.reader.cell(row as usize, walked),
            SequenceAxis::Col(col) => self.reader.cell(walked, col as usize),
        };
        let value = cell.to_owned();

        self.position += self.step;
        Some(value)
    }
}

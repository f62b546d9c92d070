use crate::encoder::IndexEncoder;
use crate::error::Result;
use crate::layout::NewlineStyle;

/// Outcome of the one-pass scan: everything the container needs besides
/// the index files themselves. Headers, if kept, are materialized
/// separately by the container from newline-row 0 once the index files
/// are mmap'ed.
pub struct ScanOutcome {
    pub cols: usize,
    pub total_rows: usize,
    pub newline_style: Option<NewlineStyle>,
}

/// Single-pass byte scanner: tracks quoting, detects field and record
/// terminators, drives the encoder, and records row metadata.
///
/// Quoted runs are skipped with [`memchr::memchr`] exactly like this
/// codebase's own record splitter does for its `Quoted` state; outside of
/// quotes the scanner still walks byte by byte, since it has to interleave
/// quote toggling, delimiter accounting and terminator detection rather
/// than just hunting for the next record boundary.
pub struct CsvScanner<'a> {
    buf: &'a [u8],
    delimiter: u8,
    quote: u8,
}

/// Per-row bookkeeping threaded through the delimiter/terminator handlers.
struct RowState {
    col_index: u64,
    cols: Option<u64>,
    warned_overflow: bool,
    warned_underflow: bool,
    /// Set once a row has seen more delimiters than `cols` allows. While
    /// set, the scanner ignores quote toggling entirely and jumps straight
    /// to the row's terminator rather than interpreting any more bytes —
    /// truncated overflow content is unrecoverable, so nothing in it
    /// (including a quote byte) may influence where the row ends.
    in_overflow: bool,
}

impl<'a> CsvScanner<'a> {
    pub fn new(buf: &'a [u8], delimiter: u8, quote: u8) -> Self {
        Self {
            buf,
            delimiter,
            quote,
        }
    }

    pub fn scan(&self, encoder: &mut IndexEncoder) -> Result<ScanOutcome> {
        let buf = self.buf;
        let n = buf.len();

        if n == 0 {
            return Ok(ScanOutcome {
                cols: 0,
                total_rows: 0,
                newline_style: None,
            });
        }

        let mut quoted = false;
        let mut newline_style: Option<NewlineStyle> = None;
        let mut total_rows: usize = 0;
        let mut row_ended_at_eof = false;

        let mut state = RowState {
            col_index: 0,
            cols: None,
            warned_overflow: false,
            warned_underflow: false,
            in_overflow: false,
        };

        encoder.begin_row(0)?;

        let mut i: usize = 0;
        while i < n {
            let c = buf[i];

            if quoted {
                match memchr::memchr(self.quote, &buf[i..]) {
                    Some(off) => {
                        i += off + 1;
                        quoted = false;
                    }
                    None => {
                        // Unbalanced quote: scanner stays quoted until EOF,
                        // which merges whatever logical rows remain.
                        i = n;
                    }
                }
                continue;
            }

            if c == self.quote {
                quoted = true;
                i += 1;
                continue;
            }

            if c == self.delimiter {
                self.handle_delimiter(encoder, &mut state, (i + 1) as u64)?;
                i += 1;

                if state.in_overflow {
                    // Raw scan straight to the row's terminator: a quote
                    // byte in the truncated tail must not reopen quoting.
                    quoted = false;
                    match memchr::memchr2(b'\r', b'\n', &buf[i..]) {
                        Some(off) => i += off,
                        None => i = n,
                    }
                }
                continue;
            }

            if c == b'\r' {
                let is_crlf = i + 1 < n && buf[i + 1] == b'\n';
                if newline_style.is_none() {
                    newline_style = Some(if is_crlf {
                        NewlineStyle::CrLf
                    } else {
                        NewlineStyle::Cr
                    });
                }

                self.handle_terminator(encoder, &mut state, (i + 1) as u64)?;
                total_rows += 1;

                i += if is_crlf { 2 } else { 1 };
                state.col_index = 0;
                state.in_overflow = false;

                if i < n {
                    encoder.begin_row(i as u64)?;
                } else {
                    row_ended_at_eof = true;
                }
                continue;
            }

            if c == b'\n' {
                if newline_style.is_none() {
                    newline_style = Some(NewlineStyle::Lf);
                }

                self.handle_terminator(encoder, &mut state, (i + 1) as u64)?;
                total_rows += 1;

                i += 1;
                state.col_index = 0;
                state.in_overflow = false;

                if i < n {
                    encoder.begin_row(i as u64)?;
                } else {
                    row_ended_at_eof = true;
                }
                continue;
            }

            i += 1;
        }

        if !row_ended_at_eof {
            // File does not end with a terminator: flush the final row
            // with a synthetic boundary one past the end.
            self.handle_terminator(encoder, &mut state, (n + 1) as u64)?;
            total_rows += 1;
        }

        Ok(ScanOutcome {
            cols: state.cols.unwrap_or(0) as usize,
            total_rows,
            newline_style,
        })
    }

    /// A delimiter either opens the next cell (if the row hasn't yet
    /// reached `cols` cells) or, past that point, is silently-but-warned
    /// truncated overflow.
    fn handle_delimiter(
        &self,
        encoder: &mut IndexEncoder,
        state: &mut RowState,
        boundary: u64,
    ) -> Result<()> {
        match state.cols {
            Some(cols) if state.col_index >= cols => {
                if !state.warned_overflow {
                    log::warn!(
                        "row has more fields than the header row; extra fields truncated"
                    );
                    state.warned_overflow = true;
                }
                state.in_overflow = true;
                Ok(())
            }
            _ => {
                encoder.emit(boundary, state.col_index)?;
                state.col_index += 1;
                Ok(())
            }
        }
    }

    /// A row terminator closes the row's last slot. On the very first row
    /// it freezes `cols`; afterwards it either pads a short row (underflow)
    /// or, if the row's cells were already exhausted by delimiters alone,
    /// flags the trailing content as overflow.
    fn handle_terminator(
        &self,
        encoder: &mut IndexEncoder,
        state: &mut RowState,
        boundary: u64,
    ) -> Result<()> {
        match state.cols {
            None => {
                encoder.emit(boundary, state.col_index)?;
                state.col_index += 1;
                state.cols = Some(state.col_index);
            }
            Some(cols) if state.col_index < cols => {
                encoder.emit(boundary, state.col_index)?;
                state.col_index += 1;

                if state.col_index < cols {
                    if !state.warned_underflow {
                        log::warn!(
                            "row has fewer fields than the header row; missing fields are empty"
                        );
                        state.warned_underflow = true;
                    }
                    while state.col_index < cols {
                        encoder.emit(boundary, state.col_index)?;
                        state.col_index += 1;
                    }
                }
            }
            Some(_) => {
                if !state.warned_overflow {
                    log::warn!(
                        "row has more fields than the header row; extra fields truncated"
                    );
                    state.warned_overflow = true;
                }
            }
        }

        encoder.end_row()
    }
}

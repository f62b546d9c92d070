use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use bstr::{BStr, BString};
use memmap2::Mmap;
use tempfile::TempDir;

use crate::cell;
use crate::decoder::IndexDecoder;
use crate::encoder::IndexEncoder;
use crate::error::{LazyCsvError, Result};
use crate::iterator::{LazyCsvIter, Sequence, SequenceAxis};
use crate::layout::NewlineStyle;
use crate::options::LazyCsvOptions;
use crate::scanner::CsvScanner;
use crate::structures::byte_cache::ByteCache;

/// A memory-mapped region, or its empty-file stand-in.
///
/// `memmap2` refuses to map a zero-length file, but an empty CSV (or an
/// index file for a CSV with zero rows) is a perfectly ordinary input, so
/// the container falls back to a static empty slice instead.
enum Region {
    Mapped(Mmap),
    Empty,
}

impl Region {
    /// Maps an already-open file. Takes `file` by reference so the caller
    /// decides whether to keep the descriptor around (the CSV file, held
    /// for the reader's lifetime) or let it close once the mapping exists
    /// (the three scratch index files, which need no further I/O after
    /// construction).
    fn map(file: &File, path: &Path) -> Result<Self> {
        let len = file
            .metadata()
            .map_err(|source| LazyCsvError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        if len == 0 {
            return Ok(Self::Empty);
        }

        let mmap = unsafe { Mmap::map(file) }.map_err(|source| LazyCsvError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::Mapped(mmap))
    }

    fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| LazyCsvError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::map(&file, path)
    }

    fn as_slice(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => &mmap[..],
            Self::Empty => &[],
        }
    }
}

/// Everything the reader owns: the CSV mmap, the three index mmaps, the
/// scratch directory that backs them, and the construction-time derived
/// metadata (spec §3 lifecycle).
///
/// Held behind an [`Arc`] so that outstanding [`LazyCsvIter`]s can keep it
/// alive after the [`LazyCsv`] handle that spawned them is dropped — the
/// "weak/back reference from iterator to reader" of spec §9, implemented
/// here as shared rather than weak ownership since nothing may outlive the
/// storage it points into.
pub(crate) struct LazyCsvInner {
    csv: Region,
    comma: Region,
    anchor: Region,
    newline: Region,
    _csv_file: File,
    _index_dir: TempDir,
    rows: usize,
    cols: usize,
    headers: Vec<BString>,
    skip_headers: bool,
    unquote: bool,
    quote: u8,
    slot_width: usize,
    newline_style: Option<NewlineStyle>,
    cache: ByteCache,
}

impl LazyCsvInner {
    fn newline_row(&self, body_row: usize) -> usize {
        if self.skip_headers {
            body_row
        } else {
            body_row + 1
        }
    }

    fn decoder(&self) -> IndexDecoder<'_> {
        IndexDecoder::new(
            self.newline.as_slice(),
            self.anchor.as_slice(),
            self.comma.as_slice(),
            self.cols,
            self.slot_width,
        )
    }

    pub(crate) fn cell(&self, body_row: usize, col: usize) -> &BStr {
        let (start, _end, length) = self.decoder().cell_bounds(self.newline_row(body_row), col);
        cell::materialize(
            self.csv.as_slice(),
            start,
            length,
            self.unquote,
            self.quote,
            &self.cache,
        )
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn cols(&self) -> usize {
        self.cols
    }
}

/// Resolves a possibly-negative coordinate against an axis of length `len`,
/// Python-slice style: negative values count back from the end. Returns
/// `None` if the resolved index still falls outside `[0, len)`.
fn resolve_coord(value: isize, len: usize) -> Option<usize> {
    let resolved = if value < 0 {
        value + len as isize
    } else {
        value
    };

    if resolved < 0 || resolved as usize >= len {
        None
    } else {
        Some(resolved as usize)
    }
}

/// Resolves a possibly-negative slice bound against an axis of length
/// `len`, clamping into `[0, len]` (bounds, unlike coordinates, are allowed
/// to sit one past the last element).
fn resolve_bound(value: Option<isize>, len: usize, default: usize) -> usize {
    match value {
        None => default,
        Some(v) => {
            let resolved = if v < 0 { v + len as isize } else { v };
            resolved.clamp(0, len as isize) as usize
        }
    }
}

/// A lazy, memory-mapped, columnar-accessible CSV reader (spec §2, "container
/// lifecycle"). After one streaming pass over the file at construction, every
/// cell, row or column is addressable in constant or near-constant time
/// without ever materializing the whole file in memory.
///
/// Cheap to clone: internally a reference-counted handle onto the mmaps and
/// index files built at construction, so a clone and the original share the
/// same underlying storage rather than reopening it.
#[derive(Clone)]
pub struct LazyCsv {
    pub(crate) inner: Arc<LazyCsvInner>,
}

impl LazyCsv {
    /// Opens `path` with default [`LazyCsvOptions`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        LazyCsvOptions::new().open(path)
    }

    pub(crate) fn open_with_options(path: &Path, options: LazyCsvOptions) -> Result<Self> {
        if options.buffer_size == 0 {
            return Err(LazyCsvError::InvalidArgument(
                "buffer_size must be greater than zero".to_string(),
            ));
        }

        if options.slot_width == 0 || options.slot_width > 8 {
            return Err(LazyCsvError::InvalidArgument(
                "slot_width must be between 1 and 8 bytes".to_string(),
            ));
        }

        let csv_file = File::open(path).map_err(|source| LazyCsvError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let csv_region = Region::map(&csv_file, path)?;

        let index_dir = match &options.index_dir {
            Some(dir) => tempfile::Builder::new()
                .prefix("lazy-mmap-csv-")
                .tempdir_in(dir),
            None => tempfile::Builder::new().prefix("lazy-mmap-csv-").tempdir(),
        }
        .map_err(|source| LazyCsvError::Io {
            path: options
                .index_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir),
            source,
        })?;

        let comma_path = index_dir.path().join("comma.idx");
        let anchor_path = index_dir.path().join("anchor.idx");
        let newline_path = index_dir.path().join("newline.idx");

        let outcome = {
            let mut encoder = IndexEncoder::create(
                &comma_path,
                &anchor_path,
                &newline_path,
                options.buffer_size,
                options.slot_width,
            )?;
            let scanner = CsvScanner::new(csv_region.as_slice(), options.delimiter, options.quote);
            let outcome = scanner.scan(&mut encoder)?;
            encoder.finish()?;
            outcome
        };

        let comma_region = Region::open(&comma_path)?;
        let anchor_region = Region::open(&anchor_path)?;
        let newline_region = Region::open(&newline_path)?;

        let cols = outcome.cols;
        let total_rows = outcome.total_rows;
        let rows = if options.skip_headers {
            total_rows
        } else {
            total_rows.saturating_sub(1)
        };

        let cache = ByteCache::new();

        let headers = if !options.skip_headers && total_rows > 0 {
            let decoder = IndexDecoder::new(
                newline_region.as_slice(),
                anchor_region.as_slice(),
                comma_region.as_slice(),
                cols,
                options.slot_width,
            );

            (0..cols)
                .map(|c| {
                    let (start, _end, length) = decoder.cell_bounds(0, c);
                    cell::materialize(
                        csv_region.as_slice(),
                        start,
                        length,
                        options.unquote,
                        options.quote,
                        &cache,
                    )
                    .to_owned()
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            inner: Arc::new(LazyCsvInner {
                csv: csv_region,
                comma: comma_region,
                anchor: anchor_region,
                newline: newline_region,
                _csv_file: csv_file,
                _index_dir: index_dir,
                rows,
                cols,
                headers,
                skip_headers: options.skip_headers,
                unquote: options.unquote,
                quote: options.quote,
                slot_width: options.slot_width,
                newline_style: outcome.newline_style,
                cache,
            }),
        })
    }

    /// Number of body rows (header excluded, unless `skip_headers` was set).
    pub fn rows(&self) -> usize {
        self.inner.rows
    }

    /// Number of columns, derived from the first CSV row observed.
    pub fn cols(&self) -> usize {
        self.inner.cols
    }

    /// The frozen header row, or an empty slice if `skip_headers` was set.
    pub fn headers(&self) -> &[BString] {
        &self.inner.headers
    }

    /// The line terminator style auto-detected during construction, or
    /// `None` for an empty file.
    pub fn newline_style(&self) -> Option<NewlineStyle> {
        self.inner.newline_style
    }

    fn boundary(&self, row: isize, col: isize) -> LazyCsvError {
        LazyCsvError::Boundary {
            row: row as i64,
            col: col as i64,
            rows: self.inner.rows,
            cols: self.inner.cols,
        }
    }

    /// Materializes the cell at `(row, col)`. Negative coordinates count
    /// back from `rows`/`cols` respectively.
    pub fn get(&self, row: isize, col: isize) -> Result<&BStr> {
        let r = resolve_coord(row, self.inner.rows).ok_or_else(|| self.boundary(row, col))?;
        let c = resolve_coord(col, self.inner.cols).ok_or_else(|| self.boundary(row, col))?;
        Ok(self.inner.cell(r, c))
    }

    /// The `[start, end)` byte span of row `row` in the underlying CSV,
    /// trailing terminator included.
    pub fn row_span(&self, row: isize) -> Result<(usize, usize)> {
        let r = resolve_coord(row, self.inner.rows).ok_or_else(|| self.boundary(row, 0))?;
        let decoder = self.inner.decoder();
        let newline_row = self.inner.newline_row(r);
        let start = decoder.decode(newline_row, 0) as usize;
        let end = decoder.decode(newline_row, self.inner.cols) as usize;
        Ok((start, end))
    }

    /// Builds an axis iterator over the row or column fixed by `spec`.
    pub fn sequence(&self, spec: Sequence) -> Result<LazyCsvIter> {
        let (fixed, axis_len) = match spec.axis() {
            SequenceAxis::Row(row) => {
                let r = resolve_coord(row, self.inner.rows)
                    .ok_or_else(|| self.boundary(row, 0))?;
                (SequenceAxis::Row(r as isize), self.inner.cols)
            }
            SequenceAxis::Col(col) => {
                let c = resolve_coord(col, self.inner.cols)
                    .ok_or_else(|| self.boundary(0, col))?;
                (SequenceAxis::Col(c as isize), self.inner.rows)
            }
        };

        if spec.step_size() == 0 {
            return Err(LazyCsvError::InvalidArgument(
                "step must be non-zero".to_string(),
            ));
        }

        let start = resolve_bound(spec.start_bound(), axis_len, 0);
        let stop = resolve_bound(spec.stop_bound(), axis_len, axis_len);

        // `LazyCsvIter::next` walks `position` forward and, when reversed,
        // reads back `axis_len - 1 - position`; an explicit start/stop
        // names the forward-space sub-range `[start, stop)` that must be
        // visited, so it has to be re-expressed in that same backward
        // addressing before becoming the iterator's forward cursor bounds
        // — otherwise a reversed slice walks the tail of the whole axis
        // instead of the reverse of the requested sub-range.
        let (start, stop) = if spec.is_reversed() {
            (axis_len - stop, axis_len - start)
        } else {
            (start, stop)
        };

        Ok(LazyCsvIter::new(
            Arc::clone(&self.inner),
            fixed,
            start,
            stop,
            spec.step_size(),
            spec.is_reversed(),
        ))
    }
}

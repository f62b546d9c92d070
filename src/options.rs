use std::path::{Path, PathBuf};

/// Construction parameters for [`crate::LazyCsv`] (spec §6).
///
/// Built by chaining setters on a default value, the way the rest of this
/// crate family configures a reader:
///
/// ```ignore
/// LazyCsvOptions::new()
///     .delimiter(b';')
///     .skip_headers(true)
///     .open("data.csv")?;
/// ```
#[derive(Clone, Debug)]
pub struct LazyCsvOptions {
    pub(crate) delimiter: u8,
    pub(crate) quote: u8,
    pub(crate) skip_headers: bool,
    pub(crate) unquote: bool,
    pub(crate) buffer_size: usize,
    pub(crate) index_dir: Option<PathBuf>,
    pub(crate) slot_width: usize,
}

/// Capacity of the three buffered writers used while building the index
/// files (2^21 bytes, per spec §6).
pub const DEFAULT_BUFFER_SIZE: usize = 1 << 21;

/// Default width, in bytes, of a narrow comma slot (spec §6 / §9).
pub const DEFAULT_SLOT_WIDTH: usize = 2;

impl Default for LazyCsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            skip_headers: false,
            unquote: true,
            buffer_size: DEFAULT_BUFFER_SIZE,
            index_dir: None,
            slot_width: DEFAULT_SLOT_WIDTH,
        }
    }
}

impl LazyCsvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter byte. Default: `,`.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the quote byte. Default: `"`.
    pub fn quotechar(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// If set, the first CSV row is treated as body row 0 instead of being
    /// split off into `headers()`. Default: `false`.
    pub fn skip_headers(mut self, skip_headers: bool) -> Self {
        self.skip_headers = skip_headers;
        self
    }

    /// If set, matching outer quote bytes are stripped from returned cell
    /// views. Default: `true`.
    pub fn unquote(mut self, unquote: bool) -> Self {
        self.unquote = unquote;
        self
    }

    /// Capacity, in bytes, of each of the three buffered writers used while
    /// building the index files. Must be greater than zero.
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Directory in which the scratch index files are created. Defaults to
    /// the OS temp directory.
    pub fn index_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.index_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Width, in bytes, of a comma slot. Default: 2.
    pub fn slot_width(mut self, slot_width: usize) -> Self {
        self.slot_width = slot_width;
        self
    }

    /// Opens `path` and builds the reader described by these options.
    pub fn open<P: AsRef<Path>>(self, path: P) -> crate::error::Result<crate::LazyCsv> {
        crate::reader::LazyCsv::open_with_options(path.as_ref(), self)
    }
}

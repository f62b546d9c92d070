use bstr::BStr;

use crate::structures::byte_cache::ByteCache;

const EMPTY: &[u8] = b"";

/// Converts a `(offset, length)` view into the CSV into a byte-string
/// value. Never copies the cell body; the only copy a caller can
/// trigger is escaping the returned view into an owned buffer.
pub fn materialize<'a>(
    csv: &'a [u8],
    offset: usize,
    length: usize,
    unquote: bool,
    quote: u8,
    cache: &'a ByteCache,
) -> &'a BStr {
    if length == 0 || length == usize::MAX {
        return BStr::new(EMPTY);
    }

    if length == 1 {
        return cache.get(csv[offset]);
    }

    let end = offset + length;
    if unquote && csv[offset] == quote && csv[end - 1] == quote {
        BStr::new(&csv[offset + 1..end - 1])
    } else {
        BStr::new(&csv[offset..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_overflow_length_are_empty() {
        let csv = b"hello";
        let cache = ByteCache::new();
        assert_eq!(materialize(csv, 0, 0, true, b'"', &cache).as_ref(), b"");
        assert_eq!(
            materialize(csv, 0, usize::MAX, true, b'"', &cache).as_ref(),
            b""
        );
    }

    #[test]
    fn single_byte_cells_come_from_the_cache() {
        let csv = b"x";
        let cache = ByteCache::new();
        assert_eq!(materialize(csv, 0, 1, true, b'"', &cache).as_ref(), b"x");
    }

    #[test]
    fn matching_outer_quotes_are_stripped_when_unquote_is_on() {
        let csv = b"\"hi\"";
        let cache = ByteCache::new();
        assert_eq!(materialize(csv, 0, 4, true, b'"', &cache).as_ref(), b"hi");
        assert_eq!(
            materialize(csv, 0, 4, false, b'"', &cache).as_ref(),
            b"\"hi\""
        );
    }

    #[test]
    fn unbalanced_single_quote_byte_is_not_stripped() {
        // length 1 never unquotes even if the lone byte is the quote byte,
        // since the spec requires length >= 2 for stripping.
        let csv = b"\"";
        let cache = ByteCache::new();
        assert_eq!(materialize(csv, 0, 1, true, b'"', &cache).as_ref(), b"\"");
    }
}

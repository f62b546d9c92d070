use bstr::BStr;

// Pre-interned single-byte cells, one per possible byte value. Per-reader,
// built at construction and dropped with it rather than process-global, so
// lifetimes stay local and tests stay isolated.
pub struct ByteCache {
    bytes: [u8; 256],
}

impl ByteCache {
    pub fn new() -> Self {
        let mut bytes = [0u8; 256];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        Self { bytes }
    }

    pub fn get(&self, byte: u8) -> &BStr {
        BStr::new(&self.bytes[byte as usize..byte as usize + 1])
    }
}

impl Default for ByteCache {
    fn default() -> Self {
        Self::new()
    }
}

/// A read-only window into a buffer of decoded bytes
///
/// Does not copy the buffer. Typically one scanline of a [`crate::Bitmap`].
#[derive(Debug, Copy, Clone)]
pub struct ByteRange<'a> {
    buffer: &'a [u8],
    start: usize,
    end: usize,
}

impl<'a> ByteRange<'a> {
    /// Create a view of `buffer[start..end]`
    ///
    /// # Panics
    ///
    /// If `start > end` or `end > buffer.len()`.
    pub fn new(buffer: &'a [u8], start: usize, end: usize) -> Self {
        assert!(
            start <= end && end <= buffer.len(),
            "invalid range {}..{} for a buffer of {} bytes",
            start,
            end,
            buffer.len()
        );
        Self { buffer, start, end }
    }

    /// Offset of the first byte in the buffer
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last byte in the buffer
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of bytes in the window
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the window is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The bytes in the window
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.buffer[self.start..self.end]
    }

    /// The whole underlying buffer
    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }
}

impl AsRef<[u8]> for ByteRange<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

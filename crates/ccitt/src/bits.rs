//! # Bit Reader and Writer
//!
//! Both types use the CCITT (T.4/T.6) bit order: every byte is consumed or
//! filled from the most- to the least-significant bit.

use crate::{FaxError, FaxResult};

/// Index of the next unread bit in the current byte
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
enum Shift {
    /// No byte is loaded, the next bit read fetches one
    #[default]
    Aligned,
    /// The bit at this index (7 = most-significant) is returned next
    At(u8),
}

/// Sequential bit and byte access to a borrowed range of bytes
///
/// There are two ways to consume input, with different failure modes:
///
/// - [`BitReader::read_bit`] and [`BitReader::read_bits`] fail with
///   [`FaxError::EndOfData`] when a fresh byte is needed but none is left.
/// - The [`Iterator`] implementation hands out whole bytes and returns
///   `None` at the end, which is how decoders scan for markers.
///
/// The byte path does not look at or change the partially consumed byte.
/// Mixing both on one reader is allowed, but [`Iterator::next`] always
/// continues at [`BitReader::offset`], which is already past the byte that
/// the bit path is currently working on. [`BitReader::bit_offset`] is only
/// meaningful as long as no byte was taken that way in the middle of a byte.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    end: usize,
    position: usize,
    shift: Shift,
    current: u8,
}

impl<'a> BitReader<'a> {
    /// Creates a reader over all of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_range(data, 0, data.len())
    }

    /// Creates a reader over `data[start..end]`
    ///
    /// Offsets reported by the reader stay relative to `data`.
    ///
    /// # Panics
    ///
    /// If `start > end` or `end > data.len()`.
    pub fn with_range(data: &'a [u8], start: usize, end: usize) -> Self {
        assert!(
            start <= end && end <= data.len(),
            "invalid range {}..{} for a buffer of {} bytes",
            start,
            end,
            data.len()
        );
        Self {
            data,
            end,
            position: start,
            shift: Shift::Aligned,
            current: 0,
        }
    }

    /// Read a single bit (`0` or `1`)
    pub fn read_bit(&mut self) -> FaxResult<u8> {
        let shift = match self.shift {
            Shift::At(shift) => shift,
            Shift::Aligned => {
                if self.position >= self.end {
                    return Err(FaxError::EndOfData);
                }
                self.current = self.data[self.position];
                self.position += 1;
                7
            }
        };
        self.shift = match shift {
            0 => Shift::Aligned,
            s => Shift::At(s - 1),
        };
        Ok((self.current >> shift) & 1)
    }

    /// Read `count` bits as an unsigned number, first bit is most-significant
    ///
    /// Crosses byte boundaries as needed. On failure, the bits read so far
    /// are lost.
    ///
    /// # Panics
    ///
    /// If `count` is larger than 32.
    pub fn read_bits(&mut self, count: u32) -> FaxResult<u32> {
        assert!(count <= u32::BITS, "cannot read {} bits into a u32", count);
        let mut result = 0u32;
        for i in (0..count).rev() {
            result |= u32::from(self.read_bit()?) << i;
        }
        Ok(result)
    }

    /// Drop the unread bits of the current byte
    ///
    /// The next bit read fetches the byte at [`BitReader::offset`], even if
    /// the current one was not used up.
    pub fn byte_align(&mut self) {
        self.shift = Shift::Aligned;
    }

    /// Offset of the next byte to fetch, relative to the start of the buffer
    pub fn offset(&self) -> usize {
        self.position
    }

    /// Absolute index of the next bit to read, counted from the buffer start
    ///
    /// This is computed from [`BitReader::offset`]. After a call to
    /// [`Iterator::next`] while a byte is partially read, the remaining bits
    /// of that byte still come first, but the value here has moved on by 8.
    pub fn bit_offset(&self) -> usize {
        match self.shift {
            Shift::Aligned => self.position * 8,
            Shift::At(shift) => self.position * 8 - usize::from(shift) - 1,
        }
    }

    /// Offset one past the last byte of the readable range
    pub fn end(&self) -> usize {
        self.end
    }

    /// Whether there are no buffered bits of a partially read byte
    pub fn is_aligned(&self) -> bool {
        self.shift == Shift::Aligned
    }

    /// Whether [`BitReader::read_bit`] would succeed
    pub fn has_data(&self) -> bool {
        !self.is_aligned() || self.position < self.end
    }
}

impl Iterator for BitReader<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.end {
            return None;
        }
        let byte = self.data[self.position];
        self.position += 1;
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.end - self.position;
        (rest, Some(rest))
    }
}

/// A bitwise writer
#[derive(Debug, Default)]
pub struct BitWriter {
    buffer: Vec<u8>,
    curr: u8,
    used: u8,
}

impl BitWriter {
    /// Creates a new instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new instance with the given capacity of bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(bits.div_ceil(8)),
            curr: 0,
            used: 0,
        }
    }

    /// Write a single bit
    pub fn write(&mut self, b: bool) {
        self.curr = (self.curr << 1) | u8::from(b);
        self.used += 1;
        if self.used == 8 {
            self.buffer.push(self.curr);
            self.curr = 0;
            self.used = 0;
        }
    }

    /// Write the lowest `count` bits of `val`, most-significant first
    ///
    /// # Panics
    ///
    /// If `count` is larger than 32.
    pub fn write_bits(&mut self, val: u32, count: u32) {
        assert!(count <= u32::BITS, "cannot write {} bits from a u32", count);
        for i in (0..count).rev() {
            self.write((val >> i) & 1 == 1);
        }
    }

    /// Pad the current byte with zero bits, if it was started
    pub fn flush(&mut self) {
        if self.used > 0 {
            self.buffer.push(self.curr << (8 - self.used));
            self.curr = 0;
            self.used = 0;
        }
    }

    /// Number of bits written so far
    pub fn bit_len(&self) -> usize {
        self.buffer.len() * 8 + usize::from(self.used)
    }

    /// Whether the next bit starts a new byte
    pub fn is_aligned(&self) -> bool {
        self.used == 0
    }

    /// The completed bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Flush and return the buffer
    pub fn done(mut self) -> Vec<u8> {
        self.flush();
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::{BitReader, BitWriter};
    use crate::FaxError;

    #[test]
    fn test_read_bit_msb_first() {
        let data = [0b10110010];
        let mut reader = BitReader::new(&data);
        let mut bits = Vec::new();
        for _ in 0..8 {
            bits.push(reader.read_bit().unwrap());
        }
        assert_eq!(bits, [1, 0, 1, 1, 0, 0, 1, 0]);
        assert_eq!(reader.read_bit(), Err(FaxError::EndOfData));
        assert_eq!(reader.next(), None);
    }

    #[test]
    fn test_read_bits_nibbles() {
        let data = [0b10110010];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(4), Ok(0b1011));
        assert_eq!(reader.read_bits(4), Ok(0b0010));
        assert_eq!(reader.read_bits(1), Err(FaxError::EndOfData));
    }

    #[test]
    fn test_read_bits_across_bytes() {
        let data = [0b0000_0001, 0b1110_0000];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(4), Ok(0));
        assert_eq!(reader.read_bits(7), Ok(0b0001111));
        assert_eq!(reader.offset(), 2);
        assert!(!reader.is_aligned());
    }

    #[test]
    fn test_read_bits_full_width() {
        let data = [0xFF, 0xFF, 0xFF, 0xFE, 0x80];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(32), Ok(0xFFFF_FFFE));
        assert_eq!(reader.read_bits(0), Ok(0));
        assert_eq!(reader.read_bit(), Ok(1));
    }

    #[test]
    fn test_byte_align_discards_rest() {
        let data = [0b1110_0000, 0b0101_0101];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(3), Ok(0b111));
        reader.byte_align();
        assert!(reader.is_aligned());
        assert_eq!(reader.offset(), 1);
        assert_eq!(reader.read_bits(4), Ok(0b0101));
        assert_eq!(reader.offset(), 2);
    }

    #[test]
    fn test_byte_align_when_aligned() {
        let data = [0xA5];
        let mut reader = BitReader::new(&data);
        reader.byte_align();
        assert_eq!(reader.read_bits(8), Ok(0xA5));
        assert!(reader.is_aligned());
    }

    #[test]
    fn test_next_ignores_bit_state() {
        let data = [0b1000_0000, 0x42, 0x17];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bit(), Ok(1));
        assert_eq!(reader.next(), Some(0x42));
        // still working on the first byte
        assert_eq!(reader.read_bits(7), Ok(0));
        assert_eq!(reader.read_bits(8), Ok(0x17));
        assert_eq!(reader.next(), None);
        assert_eq!(reader.read_bit(), Err(FaxError::EndOfData));
    }

    #[test]
    fn test_with_range() {
        let data = [0xFF, 0x0F, 0xF0, 0xFF];
        let mut reader = BitReader::with_range(&data, 1, 3);
        assert_eq!(reader.offset(), 1);
        assert_eq!(reader.end(), 3);
        assert_eq!(reader.size_hint(), (2, Some(2)));
        assert_eq!(reader.read_bits(16), Ok(0x0FF0));
        assert!(!reader.has_data());
        assert_eq!(reader.read_bit(), Err(FaxError::EndOfData));
    }

    #[test]
    fn test_empty_range() {
        let data = [0xFF];
        let mut reader = BitReader::with_range(&data, 1, 1);
        assert!(!reader.has_data());
        assert_eq!(reader.next(), None);
        assert_eq!(reader.read_bit(), Err(FaxError::EndOfData));
    }

    #[test]
    #[should_panic]
    fn test_with_range_out_of_bounds() {
        let data = [0u8; 2];
        let _ = BitReader::with_range(&data, 1, 3);
    }

    #[test]
    fn test_has_data_mid_byte() {
        let data = [0x80];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bit(), Ok(1));
        assert_eq!(reader.offset(), 1);
        assert!(reader.has_data());
        assert_eq!(reader.read_bits(7), Ok(0));
        assert!(!reader.has_data());
    }

    #[test]
    fn test_bit_offset() {
        let data = [0x00, 0x00, 0x00];
        let mut reader = BitReader::with_range(&data, 1, 3);
        assert_eq!(reader.bit_offset(), 8);
        reader.read_bits(3).unwrap();
        assert_eq!(reader.bit_offset(), 11);
        reader.read_bits(5).unwrap();
        assert_eq!(reader.bit_offset(), 16);
        reader.read_bit().unwrap();
        reader.byte_align();
        assert_eq!(reader.bit_offset(), 24);
    }

    #[test]
    fn test_bit_offset_after_next_mid_byte() {
        let data = [0b1100_0000, 0x00];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bit(), Ok(1));
        assert_eq!(reader.bit_offset(), 1);
        assert_eq!(reader.next(), Some(0x00));
        // bit 9 is 0, but the rest of the first byte is read next
        assert_eq!(reader.bit_offset(), 9);
        assert_eq!(reader.read_bit(), Ok(1));
        assert_eq!(reader.bit_offset(), 10);
    }

    #[test]
    fn test_bit_writer_write_bits() {
        let mut bw = BitWriter::new();
        bw.write_bits(0b000011110000, 12);
        bw.write_bits(0b1010, 4);
        assert_eq!(bw.as_bytes(), &[0b00001111, 0b00001010]);

        bw.write_bits(0b111111, 6);
        assert_eq!(bw.bit_len(), 22);
        assert_eq!(bw.as_bytes(), &[0b00001111, 0b00001010]);

        bw.write_bits(0b000000, 6);
        assert_eq!(bw.as_bytes(), &[0b00001111, 0b00001010, 0b11111100]);

        bw.write_bits(0b1111, 4);
        assert!(bw.is_aligned());
        assert_eq!(
            bw.as_bytes(),
            &[0b00001111, 0b00001010, 0b11111100, 0b00001111]
        );
    }

    #[test]
    fn test_bit_writer_flush() {
        let mut bw = BitWriter::with_capacity(24);
        for b in [true, false, false, true, true, false, true, false] {
            bw.write(b);
        }
        bw.write(true);
        bw.write(false);
        bw.write(true);
        bw.flush();
        assert_eq!(bw.as_bytes(), &[0b10011010, 0b10100000]);

        bw.flush();
        assert_eq!(bw.done(), vec![0b10011010, 0b10100000]);
    }
}

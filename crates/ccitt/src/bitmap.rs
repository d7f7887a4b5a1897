//! # Decoding into a packed bitmap
//!
//! [`decode`] owns the row loop: it sets up the [`BitReader`], handles row
//! alignment and the image height, and hands every scanline to a
//! [`RowDecoder`]. The rows end up packed in a [`Bitmap`], which lends them
//! out as [`ByteRange`]s.

use std::num::NonZeroUsize;

use log::{debug, warn};

use crate::{
    bits::{BitReader, BitWriter},
    ByteRange, DecodeParams, FaxResult,
};

/// What a [`RowDecoder`] found at the start of a row
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Row {
    /// A scanline was written
    Decoded,
    /// The end-of-block pattern was read, no scanline was written
    EndOfBlock,
}

/// Decodes one scanline at a time
pub trait RowDecoder {
    /// Decode the next row
    ///
    /// Implementations must write exactly `params.columns()` pixels to
    /// `row` and return [`Row::Decoded`], a set bit is a 1-pixel in the
    /// sense of `BlackIs1`. When the data has an end-of-block marker
    /// instead, nothing is written and [`Row::EndOfBlock`] is returned.
    fn decode_row(
        &mut self,
        reader: &mut BitReader<'_>,
        params: &DecodeParams,
        row: &mut BitWriter,
    ) -> FaxResult<Row>;
}

/// Rows stored as plain bits, each one padded to a byte boundary
#[derive(Debug, Default, Copy, Clone)]
pub struct Uncompressed;

impl RowDecoder for Uncompressed {
    fn decode_row(
        &mut self,
        reader: &mut BitReader<'_>,
        params: &DecodeParams,
        row: &mut BitWriter,
    ) -> FaxResult<Row> {
        for _ in 0..params.columns().get() {
            row.write(reader.read_bit()? == 1);
        }
        reader.byte_align();
        Ok(Row::Decoded)
    }
}

/// Decode all rows of `data`
///
/// With a known height, exactly `params.rows()` rows are decoded. Otherwise
/// rows are decoded until the input is used up, or until a row consumes no
/// input at all. Decoding stops early at an end-of-block marker. Bytes
/// after the last row are skipped.
pub fn decode<D: RowDecoder + ?Sized>(
    data: &[u8],
    params: &DecodeParams,
    decoder: &mut D,
) -> FaxResult<Bitmap> {
    let mut reader = BitReader::new(data);
    let row_bytes = params.row_bytes();
    // `Rows` comes from the file, only reserve what the input can back
    let rows = params
        .row_count()
        .unwrap_or(1)
        .min(data.len().saturating_mul(8).saturating_add(1));
    let capacity = rows.saturating_mul(row_bytes).saturating_mul(8);
    let mut store = BitWriter::with_capacity(capacity);
    let mut height = 0;

    while params.row_count().map_or(true, |rows| height < rows) {
        if params.encoded_byte_align() {
            reader.byte_align();
        }
        if params.row_count().is_none() && !reader.has_data() {
            break;
        }
        let before = reader.bit_offset();
        match decoder.decode_row(&mut reader, params, &mut store)? {
            Row::Decoded => {}
            Row::EndOfBlock => {
                if !params.end_of_block() {
                    warn!("End-of-block marker although EndOfBlock is false");
                }
                debug!("End of block after {} row(s)", height);
                break;
            }
        }
        store.flush();
        height += 1;
        debug_assert_eq!(store.bit_len(), height * row_bytes * 8);
        if params.row_count().is_none() && reader.bit_offset() == before {
            warn!("Row {} consumed no input, stopping", height - 1);
            break;
        }
    }

    reader.byte_align();
    let trailing = reader.by_ref().count();
    if trailing > 0 {
        debug!("Skipped {} byte(s) after the last row", trailing);
    }
    debug!("Decoded {} row(s) of {} pixels", height, params.columns());

    Ok(Bitmap {
        data: store.done(),
        width: params.columns(),
        row_bytes,
        height,
    })
}

/// A bi-level image with rows packed into bytes
#[derive(Debug, Clone)]
pub struct Bitmap {
    data: Vec<u8>,
    width: NonZeroUsize,
    row_bytes: usize,
    height: usize,
}

impl Bitmap {
    /// Wrap packed rows of `width` pixels, each padded to a full byte
    ///
    /// Trailing bytes that don't make up a full row are not part of the image.
    pub fn new(data: Vec<u8>, width: NonZeroUsize) -> Self {
        let row_bytes = width.get().div_ceil(8);
        let height = data.len() / row_bytes;
        Self {
            data,
            width,
            row_bytes,
            height,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width.get()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Row `index`, if it exists
    pub fn row(&self, index: usize) -> Option<ByteRange<'_>> {
        if index < self.height {
            let start = index * self.row_bytes;
            Some(ByteRange::new(&self.data, start, start + self.row_bytes))
        } else {
            None
        }
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = ByteRange<'_>> + '_ {
        (0..self.height).filter_map(move |index| self.row(index))
    }

    /// Whether the pixel at (`x`, `y`) is set
    pub fn get(&self, x: usize, y: usize) -> bool {
        match self.row(y) {
            Some(row) if x < self.width() => row.as_bytes()[x / 8] & (0x80 >> (x % 8)) != 0,
            _ => false,
        }
    }

    /// The packed rows
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Return the packed rows
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

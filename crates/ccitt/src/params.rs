//! # Decode parameters
//!
//! The settings of a `CCITTFaxDecode` filter. The field names used for
//! deserialization are the keys of the filter's parameter dictionary.

use std::num::NonZeroUsize;

use serde::Deserialize;

/// Coding scheme selected by the `K` parameter
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CodingScheme {
    /// Pure two-dimensional encoding (Group 4), `K < 0`
    TwoDimensional,
    /// Pure one-dimensional encoding (Group 3, 1-D), `K = 0`
    OneDimensional,
    /// Mixed one- and two-dimensional encoding (Group 3, 2-D), `K > 0`
    Mixed {
        /// Maximum number of 2-D coded lines following a 1-D line
        k: u32,
    },
}

/// Parameters for one decode pass
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DecodeParams {
    k: i32,
    columns: NonZeroUsize,
    rows: usize,
    black_is_1: bool,
    end_of_block: bool,
    end_of_line: bool,
    encoded_byte_align: bool,
}

const DEFAULT_COLUMNS: NonZeroUsize = match NonZeroUsize::new(1728) {
    Some(columns) => columns,
    None => unreachable!(),
};

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            k: 0,
            columns: DEFAULT_COLUMNS,
            rows: 0,
            black_is_1: false,
            end_of_block: true,
            end_of_line: false,
            encoded_byte_align: false,
        }
    }
}

impl DecodeParams {
    /// Parameters for an image of the given width, all else at the defaults
    pub fn new(columns: NonZeroUsize) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Set `Columns`
    pub fn with_columns(self, columns: NonZeroUsize) -> Self {
        Self { columns, ..self }
    }

    /// Set `K`
    pub fn with_k(self, k: i32) -> Self {
        Self { k, ..self }
    }

    /// Set `Rows`, `0` means the height is not known in advance
    pub fn with_rows(self, rows: usize) -> Self {
        Self { rows, ..self }
    }

    /// Set `BlackIs1`
    pub fn with_black_is_1(self, black_is_1: bool) -> Self {
        Self { black_is_1, ..self }
    }

    /// Set `EndOfBlock`
    pub fn with_end_of_block(self, end_of_block: bool) -> Self {
        Self {
            end_of_block,
            ..self
        }
    }

    /// Set `EndOfLine`
    pub fn with_end_of_line(self, end_of_line: bool) -> Self {
        Self {
            end_of_line,
            ..self
        }
    }

    /// Set `EncodedByteAlign`
    pub fn with_encoded_byte_align(self, encoded_byte_align: bool) -> Self {
        Self {
            encoded_byte_align,
            ..self
        }
    }

    /// The raw `K` value
    pub fn k(&self) -> i32 {
        self.k
    }

    /// Width of the image in pixels
    pub fn columns(&self) -> NonZeroUsize {
        self.columns
    }

    /// Height of the image in pixels, `0` if unknown
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Height of the image, if known
    pub fn row_count(&self) -> Option<usize> {
        match self.rows {
            0 => None,
            rows => Some(rows),
        }
    }

    /// Whether 1-bits in the output are black
    pub fn black_is_1(&self) -> bool {
        self.black_is_1
    }

    /// Whether the data is terminated by an end-of-block pattern
    pub fn end_of_block(&self) -> bool {
        self.end_of_block
    }

    /// Whether each row is prefixed by an end-of-line pattern
    pub fn end_of_line(&self) -> bool {
        self.end_of_line
    }

    /// Whether each encoded row starts on a byte boundary
    pub fn encoded_byte_align(&self) -> bool {
        self.encoded_byte_align
    }

    /// The coding scheme selected by `K`
    pub fn scheme(&self) -> CodingScheme {
        match self.k {
            k if k < 0 => CodingScheme::TwoDimensional,
            0 => CodingScheme::OneDimensional,
            k => CodingScheme::Mixed { k: k.unsigned_abs() },
        }
    }

    /// Number of bytes in one packed output row
    pub fn row_bytes(&self) -> usize {
        self.columns.get().div_ceil(8)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::{CodingScheme, DecodeParams};

    fn columns(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_fields_unchanged() {
        let params = DecodeParams::new(columns(1728))
            .with_k(-1)
            .with_rows(0)
            .with_black_is_1(false)
            .with_end_of_block(true);
        assert_eq!(params.k(), -1);
        assert_eq!(params.columns().get(), 1728);
        assert_eq!(params.rows(), 0);
        assert!(!params.black_is_1());
        assert!(params.end_of_block());
        assert!(!params.end_of_line());
        assert!(!params.encoded_byte_align());
        assert_eq!(params.row_count(), None);
    }

    #[test]
    fn test_defaults() {
        let params = DecodeParams::default();
        assert_eq!(params.k(), 0);
        assert_eq!(params.columns().get(), 1728);
        assert!(params.end_of_block());
        assert_eq!(params.scheme(), CodingScheme::OneDimensional);
        assert_eq!(params.row_bytes(), 216);
    }

    #[test]
    fn test_scheme() {
        let base = DecodeParams::new(columns(8));
        assert_eq!(base.with_k(-1).scheme(), CodingScheme::TwoDimensional);
        assert_eq!(base.with_k(0).scheme(), CodingScheme::OneDimensional);
        assert_eq!(base.with_k(4).scheme(), CodingScheme::Mixed { k: 4 });
    }

    #[test]
    fn test_row_bytes_rounds_up() {
        assert_eq!(DecodeParams::new(columns(1)).row_bytes(), 1);
        assert_eq!(DecodeParams::new(columns(8)).row_bytes(), 1);
        assert_eq!(DecodeParams::new(columns(9)).row_bytes(), 2);
        let wide = DecodeParams::default().with_columns(columns(2550));
        assert_eq!(wide.row_bytes(), 319);
    }

    #[test]
    fn test_deserialize_dictionary_keys() {
        let text = "(K: -1, Columns: 64, Rows: 10, BlackIs1: true, EncodedByteAlign: true)";
        let params: DecodeParams = ron::from_str(text).unwrap();
        assert_eq!(params.k(), -1);
        assert_eq!(params.columns().get(), 64);
        assert_eq!(params.row_count(), Some(10));
        assert!(params.black_is_1());
        assert!(params.encoded_byte_align());
        // not given, so the default applies
        assert!(params.end_of_block());
        assert!(!params.end_of_line());
    }

    #[test]
    fn test_deserialize_rejects_zero_columns() {
        let res: Result<DecodeParams, _> = ron::from_str("(Columns: 0)");
        assert!(res.is_err());
    }
}

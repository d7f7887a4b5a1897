#![warn(missing_docs)]
//! # CCITT fax bitstreams
//!
//! The building blocks of a `CCITTFaxDecode` filter: a [`BitReader`] over
//! the encoded bytes, the [`DecodeParams`] of the filter, and the
//! [`ByteRange`]s of decoded scanlines.
//!
//! The run-length and mode codes of T.4/T.6 are decoded elsewhere, behind
//! the [`RowDecoder`] trait.

mod ascii_art;
pub mod bits;
mod bitmap;
mod error;
mod params;
mod range;

pub use ascii_art::{ascii_art, write_pbm, BorderDrawing, BoxDrawing, ASCII, UNICODE};
pub use bitmap::{decode, Bitmap, Row, RowDecoder, Uncompressed};
pub use bits::{BitReader, BitWriter};
pub use error::{FaxError, FaxResult};
pub use params::{CodingScheme, DecodeParams};
pub use range::ByteRange;

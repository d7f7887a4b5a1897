//! # Draw bitmaps as text and PBM
use std::{fmt, io};

use crate::{bits::BitReader, Bitmap};

/// Characters for a horizontal border
pub struct BorderDrawing {
    /// Left corner
    pub left: char,
    /// Repeated once per pixel
    pub middle: char,
    /// Right corner
    pub right: char,
}

/// Characters for a framed bitmap
pub struct BoxDrawing {
    /// Top border
    pub top: BorderDrawing,
    /// Left edge of every row
    pub left: char,
    /// Right edge of every row
    pub right: char,
    /// Bottom border
    pub bottom: BorderDrawing,
    /// A set pixel
    pub ink: char,
    /// A clear pixel
    pub no_ink: char,
}

const ASCII_BORDER: BorderDrawing = BorderDrawing {
    left: '+',
    middle: '-',
    right: '+',
};

/// Plain ASCII frame
pub const ASCII: &BoxDrawing = &BoxDrawing {
    top: ASCII_BORDER,
    left: '|',
    right: '|',
    bottom: ASCII_BORDER,
    ink: '#',
    no_ink: ' ',
};

/// Box-drawing characters and full blocks
pub const UNICODE: &BoxDrawing = &BoxDrawing {
    top: BorderDrawing {
        left: '╔',
        middle: '═',
        right: '╗',
    },
    left: '║',
    right: '║',
    bottom: BorderDrawing {
        left: '╚',
        middle: '═',
        right: '╝',
    },
    ink: '█',
    no_ink: ' ',
};

fn border<W: fmt::Write>(w: &mut W, b: &BorderDrawing, width: usize) -> fmt::Result {
    w.write_char(b.left)?;
    for _ in 0..width {
        w.write_char(b.middle)?;
    }
    w.write_char(b.right)?;
    w.write_char('\n')
}

/// Draw the bitmap using characters
pub fn ascii_art<W: fmt::Write>(
    w: &mut W,
    bitmap: &Bitmap,
    style: &BoxDrawing,
    invert: bool,
) -> fmt::Result {
    let width = bitmap.width();
    border(w, &style.top, width)?;
    for row in bitmap.rows() {
        w.write_char(style.left)?;
        let mut reader = BitReader::new(row.as_bytes());
        for _ in 0..width {
            // a row always holds `width` bits
            let ink = reader.read_bit().map_err(|_| fmt::Error)? == 1;
            w.write_char(if ink ^ invert { style.ink } else { style.no_ink })?;
        }
        w.write_char(style.right)?;
        w.write_char('\n')?;
    }
    border(w, &style.bottom, width)
}

/// Write the bitmap as a binary PBM (`P4`) file
///
/// In PBM, a set bit is black. Pass `invert` for bitmaps where it is not.
pub fn write_pbm<W: io::Write>(w: &mut W, bitmap: &Bitmap, invert: bool) -> io::Result<()> {
    writeln!(w, "P4")?;
    writeln!(w, "{} {}", bitmap.width(), bitmap.height())?;
    let mask = if invert { 0xFF } else { 0x00 };
    for row in bitmap.rows() {
        let bytes: Vec<u8> = row.as_bytes().iter().map(|byte| byte ^ mask).collect();
        w.write_all(&bytes)?;
    }
    Ok(())
}

use std::{fmt, io, num::NonZeroUsize, path::PathBuf, str::FromStr};

use ccitt_bits::DecodeParams;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

#[derive(Parser)]
/// Inspect and decode CCITT fax bitstreams
pub struct Options {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a stream of uncompressed rows into an image
    Decode(DecodeOptions),
    /// Print the resolved decode parameters
    Params(ParamsOptions),
    /// Dump fixed-width fields of a file
    Bits(BitsOptions),
}

/// The format to export a decoded image into
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    /// Portable Bitmap Format
    Pbm,
    /// Portable Network Graphic
    Png,
}

#[derive(Debug)]
/// Failed to parse a format name
pub struct FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use one of `pbm` or `png`")
    }
}

impl std::error::Error for FormatError {}

impl Default for Format {
    fn default() -> Self {
        Format::Pbm
    }
}

impl FromStr for Format {
    type Err = FormatError;
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "pbm" => Ok(Self::Pbm),
            "png" => Ok(Self::Png),
            _ => Err(FormatError {}),
        }
    }
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pbm => "pbm",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Args)]
pub struct DecodeOptions {
    /// The encoded input
    pub file: PathBuf,
    /// Where to store the image
    pub out: Option<PathBuf>,
    /// Format of the output, "pbm" or "png"
    #[clap(default_value_t, long, short = 'F')]
    pub format: Format,
    /// Draw the image to the console
    #[clap(long, short = 'p')]
    pub print: bool,
    /// Swap black and white
    #[clap(long, short = 'i')]
    pub invert: bool,
    #[clap(flatten)]
    pub params: ParamsArgs,
}

#[derive(Args)]
pub struct ParamsOptions {
    #[clap(flatten)]
    pub params: ParamsArgs,
}

#[derive(Args)]
pub struct BitsOptions {
    /// The file to dump
    pub file: PathBuf,
    /// Bits per field (1 to 32)
    #[clap(long, short = 'w', default_value = "8")]
    pub width: u32,
    /// Skip to the next byte after every field
    #[clap(long, short = 'a')]
    pub align: bool,
    /// Number of bytes to skip before the first field
    #[clap(long, short = 's', default_value = "0")]
    pub skip: usize,
    /// Stop after this many fields
    #[clap(long, short = 'n')]
    pub limit: Option<usize>,
}

/// Decode parameters, from a file and/or the command line
#[derive(Debug, Default, Clone, Args)]
pub struct ParamsArgs {
    /// RON file with the parameters, e.g. `(K: -1, Columns: 1728)`
    #[clap(long = "params")]
    pub params_file: Option<PathBuf>,
    /// `K`: negative for Group 4, 0 for Group 3 1-D, positive for Group 3 2-D
    #[clap(long, short = 'k', allow_hyphen_values = true)]
    pub k: Option<i32>,
    /// `Columns`: width of the image in pixels
    #[clap(long, short = 'c')]
    pub columns: Option<usize>,
    /// `Rows`: height of the image, 0 if unknown
    #[clap(long, short = 'r')]
    pub rows: Option<usize>,
    /// `BlackIs1`
    #[clap(long)]
    pub black_is_1: Option<bool>,
    /// `EndOfBlock`
    #[clap(long)]
    pub end_of_block: Option<bool>,
    /// `EndOfLine`
    #[clap(long)]
    pub end_of_line: Option<bool>,
    /// `EncodedByteAlign`
    #[clap(long)]
    pub encoded_byte_align: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("IO Error")]
    Io(#[from] io::Error),
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::Error),
    #[error("`Columns` must be greater than zero")]
    ZeroColumns,
}

impl ParamsArgs {
    /// Load the file, if any, and apply the command line on top
    pub fn load(&self) -> Result<DecodeParams, ParamsError> {
        let mut params = match &self.params_file {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                ron::from_str(&text)?
            }
            None => DecodeParams::default(),
        };
        if let Some(columns) = self.columns {
            let columns = NonZeroUsize::new(columns).ok_or(ParamsError::ZeroColumns)?;
            params = params.with_columns(columns);
        }
        if let Some(k) = self.k {
            params = params.with_k(k);
        }
        if let Some(rows) = self.rows {
            params = params.with_rows(rows);
        }
        if let Some(black_is_1) = self.black_is_1 {
            params = params.with_black_is_1(black_is_1);
        }
        if let Some(end_of_block) = self.end_of_block {
            params = params.with_end_of_block(end_of_block);
        }
        if let Some(end_of_line) = self.end_of_line {
            params = params.with_end_of_line(end_of_line);
        }
        if let Some(encoded_byte_align) = self.encoded_byte_align {
            params = params.with_encoded_byte_align(encoded_byte_align);
        }
        Ok(params)
    }
}

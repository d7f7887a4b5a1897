use std::{
    convert::TryFrom,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use ccitt_bits::{ascii_art, decode, write_pbm, Bitmap, DecodeParams, Uncompressed, UNICODE};
use color_eyre::eyre::{self, eyre, WrapErr};
use image::{GrayImage, ImageFormat, Luma};
use log::{info, warn};

use super::opt::{DecodeOptions, Format};

fn to_image(bitmap: &Bitmap, black: bool) -> eyre::Result<GrayImage> {
    let width = u32::try_from(bitmap.width())?;
    let height = u32::try_from(bitmap.height())?;
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let ink = bitmap.get(x as usize, y as usize) == black;
        Luma([if ink { 0 } else { 255 }])
    }))
}

fn save(bitmap: &Bitmap, format: Format, invert: bool, out_path: &Path) -> eyre::Result<()> {
    match format {
        Format::Pbm => {
            let file = File::create(out_path)?;
            let mut writer = BufWriter::new(file);
            write_pbm(&mut writer, bitmap, invert)?;
            writer.flush()?;
        }
        Format::Png => {
            let image = to_image(bitmap, !invert)?;
            image.save_with_format(out_path, ImageFormat::Png)?;
        }
    }
    Ok(())
}

pub fn run(opt: DecodeOptions) -> eyre::Result<()> {
    let params: DecodeParams = opt.params.load()?;
    let data = std::fs::read(&opt.file)
        .wrap_err_with(|| format!("Failed to read '{}'", opt.file.display()))?;
    info!(
        "Decoding {} bytes, {} pixels per row",
        data.len(),
        params.columns()
    );
    if params.end_of_line() {
        warn!("EndOfLine is ignored for uncompressed rows");
    }

    let bitmap = decode(&data, &params, &mut Uncompressed)
        .map_err(|err| eyre!("Failed to decode: {}", err))?;
    info!("Decoded {} row(s)", bitmap.height());

    // set bits are black only with BlackIs1
    let invert = opt.invert ^ !params.black_is_1();

    if opt.print {
        let mut text = String::new();
        ascii_art(&mut text, &bitmap, UNICODE, invert)?;
        print!("{}", text);
    }

    let out_path = opt
        .out.clone()
        .unwrap_or_else(|| opt.file.with_extension(opt.format.extension()));
    save(&bitmap, opt.format, invert, &out_path)?;
    info!("Saved image as '{}'", out_path.display());
    Ok(())
}

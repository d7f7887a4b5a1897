use ccitt_bits::BitReader;
use color_eyre::eyre::{self, eyre};
use log::{debug, info, warn};
use prettytable::{cell, format, row, Table};

use super::opt::BitsOptions;

/// A field read from the input
#[derive(Debug, PartialEq, Eq)]
struct Field {
    bit_offset: usize,
    value: u32,
}

fn read_fields(
    reader: &mut BitReader<'_>,
    width: u32,
    align: bool,
    limit: Option<usize>,
) -> Vec<Field> {
    let mut fields = Vec::new();
    while limit.map_or(true, |limit| fields.len() < limit) {
        let bit_offset = reader.bit_offset();
        match reader.read_bits(width) {
            Ok(value) => fields.push(Field { bit_offset, value }),
            Err(err) => {
                debug!("Stopped at bit {}: {}", bit_offset, err);
                break;
            }
        }
        if align {
            reader.byte_align();
        }
    }
    fields
}

pub fn run(opt: BitsOptions) -> eyre::Result<()> {
    if !(1..=32).contains(&opt.width) {
        return Err(eyre!("Field width must be between 1 and 32, got {}", opt.width));
    }
    let data = std::fs::read(&opt.file)?;
    let mut reader = BitReader::new(&data);

    let skipped = reader.by_ref().take(opt.skip).count();
    if skipped < opt.skip {
        warn!("File has only {} bytes", skipped);
    }

    let fields = read_fields(&mut reader, opt.width, opt.align, opt.limit);
    let digits = opt.width as usize;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["#", "byte", "bit", "value", "binary"]);
    for (index, field) in fields.iter().enumerate() {
        table.add_row(row![
            index,
            field.bit_offset / 8,
            field.bit_offset % 8,
            field.value,
            format!("{:0digits$b}", field.value, digits = digits),
        ]);
    }
    table.printstd();

    let rest = reader.bit_offset();
    info!(
        "Read {} field(s), stopped at bit {} of {}",
        fields.len(),
        rest,
        data.len() * 8
    );
    Ok(())
}

use ccitt_bits::{CodingScheme, DecodeParams};
use color_eyre::eyre;
use prettytable::{cell, format, row, Table};

use super::opt::ParamsOptions;

fn scheme_name(scheme: CodingScheme) -> String {
    match scheme {
        CodingScheme::TwoDimensional => "Group 4 (T.6)".to_string(),
        CodingScheme::OneDimensional => "Group 3 1-D (T.4)".to_string(),
        CodingScheme::Mixed { k } => format!("Group 3 2-D (T.4), K = {}", k),
    }
}

fn params_table(params: &DecodeParams) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["key", "value"]);
    table.add_row(row!["K", params.k()]);
    table.add_row(row!["Columns", params.columns()]);
    table.add_row(row!["Rows", params.rows()]);
    table.add_row(row!["BlackIs1", params.black_is_1()]);
    table.add_row(row!["EndOfBlock", params.end_of_block()]);
    table.add_row(row!["EndOfLine", params.end_of_line()]);
    table.add_row(row!["EncodedByteAlign", params.encoded_byte_align()]);
    table.add_row(row!["scheme", scheme_name(params.scheme())]);
    table.add_row(row!["bytes/row", params.row_bytes()]);
    table
}

pub fn run(opt: ParamsOptions) -> eyre::Result<()> {
    let params = opt.params.load()?;
    params_table(&params).printstd();
    Ok(())
}

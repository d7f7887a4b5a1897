//! # CCITT fax bitstream tool
#![warn(missing_docs)]

mod cli;

use cli::opt::{Command, Options};

fn main() -> color_eyre::Result<()> {
    let opt: Options = cli::init()?;
    match opt.command {
        Command::Decode(decode) => cli::decode::run(decode),
        Command::Params(params) => cli::params::run(params),
        Command::Bits(bits) => cli::bits::run(bits),
    }
}

use super::args::*;

pub mod baseline;
pub mod check;

use crate::exit_codes::EXIT_SUCCESS;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Check(args) => check::run(args),
        Command::UpdateBaseline(args) => baseline::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_SUCCESS)
        }
    }
}

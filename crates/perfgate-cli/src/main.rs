use clap::error::ErrorKind;
use clap::Parser;

mod cli;
pub mod exit_codes;

use cli::args::Cli;
use cli::commands::dispatch;
use perfgate_core::PerfgateError;

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Usage errors exit with the input-error code, not clap's 2.
            let _ = e.print();
            std::process::exit(exit_codes::EXIT_INPUT_ERROR);
        }
    };
    let code = match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:#}");
            match e.downcast_ref::<PerfgateError>() {
                Some(err) => {
                    eprintln!("reason: {}", err.reason_code());
                    err.exit_code()
                }
                None => exit_codes::EXIT_INPUT_ERROR,
            }
        }
    };
    std::process::exit(code);
}

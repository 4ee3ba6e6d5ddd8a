use clap::{Parser, Subcommand};

pub mod baseline;
pub mod check;
pub mod common;
pub use baseline::*;
pub use check::*;
pub use common::*;

#[derive(Parser)]
#[command(
    name = "perfgate",
    version,
    about = "Performance regression gate: compare benchmark results against a stored baseline"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare current results against the baseline and report
    Check(CheckArgs),
    /// Promote current results to the new baseline
    UpdateBaseline(UpdateBaselineArgs),
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_baseline_is_accepted() {
        let cli = Cli::try_parse_from([
            "perfgate",
            "check",
            "results.json",
            "baseline.json",
            "--format",
            "both",
            "--fail-on-regression",
        ])
        .unwrap();
        let Command::Check(args) = cli.cmd else {
            panic!("expected check");
        };
        assert_eq!(args.format, ReportFormat::Both);
        assert!(args.fail_on_regression);
        assert_eq!(args.baseline_path(), std::path::Path::new("baseline.json"));
    }
}

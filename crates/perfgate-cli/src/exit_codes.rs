//! Process exit codes. Part of the CI contract: pipelines branch on these.

use perfgate_core::OverallStatus;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_REGRESSION: i32 = 1; // overall failure with --fail-on-regression
pub const EXIT_WARNING: i32 = 2; // overall warning with --fail-on-regression
pub const EXIT_INPUT_ERROR: i32 = perfgate_core::errors::INPUT_ERROR_EXIT_CODE;

/// Without `fail_on_regression` the gate is advisory and always succeeds.
pub fn exit_code_for(status: OverallStatus, fail_on_regression: bool) -> i32 {
    if !fail_on_regression {
        return EXIT_SUCCESS;
    }
    match status {
        OverallStatus::Failure => EXIT_REGRESSION,
        OverallStatus::Warning => EXIT_WARNING,
        OverallStatus::Improvement | OverallStatus::Pass | OverallStatus::NoData => EXIT_SUCCESS,
    }
}

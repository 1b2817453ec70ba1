use std::process::ExitCode;

use anyhow::Context;
use grav_config::GravConfig;
use grav_core::VerificationReport;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::VerifyArgs;
use crate::output;

/// Exit code for a completed run with failed checks under `--strict`.
const CHECKS_FAILED: u8 = 2;

/// Handle `gravcheck verify`.
pub async fn handle(
    args: &VerifyArgs,
    config: &GravConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    let mut verifier = bootstrap::verifier(config, args.skip_registration)?;
    let mut report = VerificationReport::new(&config.url, &config.project_code);

    tracing::info!(url = %config.url, project = %config.project_code, "starting verification");
    verifier
        .run_into(&mut report)
        .await
        .context("verification aborted")?;

    output::output_report(&report, flags.format)?;
    Ok(ExitCode::from(exit_status(&report, args.strict)))
}

fn exit_status(report: &VerificationReport, strict: bool) -> u8 {
    if strict && !report.passed() {
        CHECKS_FAILED
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use grav_core::Step;

    use super::*;

    #[test]
    fn failures_only_change_exit_code_under_strict() {
        let mut report = VerificationReport::new("https://crm.example", "crm");
        report.warn(Step::Capabilities, None, "unavailable");
        assert_eq!(exit_status(&report, true), 0);

        report.fail(Step::Visibility, Some("test-user-1"), "not visible");
        assert_eq!(exit_status(&report, false), 0);
        assert_eq!(exit_status(&report, true), CHECKS_FAILED);
    }
}

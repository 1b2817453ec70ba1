use anyhow::Context;
use grav_config::GravConfig;
use grav_core::VerificationReport;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::output;

/// Handle `gravcheck schema`.
pub async fn handle(config: &GravConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut verifier = bootstrap::verifier(config, true)?;
    let mut report = VerificationReport::new(&config.url, &config.project_code);

    verifier
        .authenticate(&mut report)
        .await
        .context("cannot inspect schema")?;
    verifier
        .verify_schema(&mut report)
        .await
        .context("schema introspection failed")?;

    output::output_report(&report, flags.format)
}

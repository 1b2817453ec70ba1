use anyhow::Context;
use chrono::Utc;
use grav_config::GravConfig;
use grav_core::{TestIdentity, VerificationReport};
use grav_verify::VerifyOptions;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::RegisterArgs;
use crate::output;

/// Handle `gravcheck register`.
pub async fn handle(
    args: &RegisterArgs,
    config: &GravConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut verifier = bootstrap::verifier(config, false)?;
    let identity = identity(args, &bootstrap::verify_options(config, false));
    let mut report = VerificationReport::new(&config.url, &config.project_code);

    verifier
        .authenticate(&mut report)
        .await
        .context("cannot register a test user")?;
    let visible = verifier.verify_registration(&identity, &mut report).await;
    tracing::info!(username = %identity.username, visible, "registration check finished");

    output::output_report(&report, flags.format)
}

/// Identity from explicit flags, falling back to a generated one.
fn identity(args: &RegisterArgs, options: &VerifyOptions) -> TestIdentity {
    let generated = options.identity(Utc::now());
    let username = args.username.clone().unwrap_or(generated.username);
    let email = args
        .email
        .clone()
        .unwrap_or_else(|| format!("{username}@{}", options.email_domain));
    TestIdentity {
        username,
        email,
        password: args.password.clone().unwrap_or(generated.password),
    }
}

//! Authenticated read-only probes: capabilities, roles, users.

use anyhow::Context;
use grav_config::GravConfig;

use crate::bootstrap;
use crate::cli::root_commands::UsersArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output;

/// Handle `gravcheck capabilities`.
pub async fn capabilities(config: &GravConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = bootstrap::authenticated_client(config).await?;
    let capabilities = client
        .capabilities()
        .await
        .context("failed to get capabilities")?;
    output::output(&capabilities, flags.format)
}

/// Handle `gravcheck roles`.
pub async fn roles(config: &GravConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = bootstrap::authenticated_client(config).await?;
    let roles = client.roles().await.context("failed to list roles")?;
    output::output(&roles, flags.format)
}

/// Handle `gravcheck users`.
pub async fn users(args: &UsersArgs, config: &GravConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = bootstrap::authenticated_client(config).await?;
    let limit = args.limit.unwrap_or(config.verify.list_limit);
    let page = client
        .list_users(args.search.as_deref(), limit)
        .await
        .context("failed to list users")?;

    tracing::info!(returned = page.data.len(), total = page.total, "users listed");
    if flags.format == OutputFormat::Table {
        output::output(&page.data, flags.format)
    } else {
        output::output(&page, flags.format)
    }
}

use anyhow::Context;
use grav_client::{ClientSettings, GravibaseClient};
use grav_config::{ConfigError, GravConfig};
use grav_core::ExpectedSchema;
use grav_verify::{Credentials, PollPolicy, Verifier, VerifyOptions};

use crate::cli::GlobalFlags;

/// Load `.env`, layer the configuration, and check required values.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<GravConfig> {
    if let Some(path) = grav_config::load_dotenv(flags.env_file.as_deref())
        .context("failed to load dotenv file")?
    {
        tracing::debug!(path = %path.display(), "loaded dotenv");
    }

    if let Some(path) = &flags.config
        && !path.exists()
    {
        anyhow::bail!("config file '{}' does not exist", path.display());
    }

    let config: GravConfig = GravConfig::figment(flags.config.as_deref())
        .extract()
        .map_err(ConfigError::from)
        .context("failed to load gravcheck configuration")?;
    config.validate()?;

    tracing::debug!(url = %config.url, project = %config.project_code, "configuration loaded");
    Ok(config)
}

/// Client for the configured deployment. No request is issued.
pub fn client(config: &GravConfig) -> anyhow::Result<GravibaseClient> {
    let settings = ClientSettings::new(&config.url, &config.project_code)
        .with_timeout(config.verify.request_timeout());
    GravibaseClient::new(settings).context("failed to build HTTP client")
}

/// Client holding the operator's bearer token.
pub async fn authenticated_client(config: &GravConfig) -> anyhow::Result<GravibaseClient> {
    let mut client = client(config)?;
    client
        .authenticate(&config.verify.auth_project, &config.username, &config.password)
        .await
        .with_context(|| format!("authentication as '{}' failed", config.username))?;
    Ok(client)
}

pub fn expected_schema(config: &GravConfig) -> anyhow::Result<ExpectedSchema> {
    match &config.verify.expected_schema_path {
        Some(path) => ExpectedSchema::load(path)
            .with_context(|| format!("failed to load expected schema from {}", path.display())),
        None => Ok(ExpectedSchema::builtin()),
    }
}

pub fn verify_options(config: &GravConfig, skip_registration: bool) -> VerifyOptions {
    let verify = &config.verify;
    VerifyOptions {
        roles: verify.roles.clone(),
        list_limit: verify.list_limit,
        visibility: PollPolicy {
            initial_delay: verify.visibility_delay(),
            interval: verify.visibility_interval(),
            timeout: verify.visibility_timeout(),
        },
        user_prefix: verify.user_prefix.clone(),
        email_domain: verify.email_domain.clone(),
        test_password: verify.test_password.clone(),
        skip_registration,
    }
}

/// Workflow driver over a fresh, unauthenticated client.
pub fn verifier(
    config: &GravConfig,
    skip_registration: bool,
) -> anyhow::Result<Verifier<GravibaseClient>> {
    let credentials = Credentials {
        auth_project: config.verify.auth_project.clone(),
        login: config.username.clone(),
        password: config.password.clone(),
    };
    Ok(Verifier::new(
        client(config)?,
        config.project_code.clone(),
        expected_schema(config)?,
        credentials,
        verify_options(config, skip_registration),
    ))
}

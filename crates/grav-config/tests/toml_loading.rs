//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::Jail;
use grav_config::GravConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_project_config_from_default_file() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file(
            "gravcheck.toml",
            r#"
url = "https://staging.gravibase.test"
username = "operator"
password = "from-toml"
project_code = "minicrm"

[verify]
roles = ["Viewer"]
list_limit = 25
visibility_timeout_ms = 5000
expected_schema_path = "schema/expected.json"
"#,
        )?;

        let config = load()?;
        assert_eq!(config.url, "https://staging.gravibase.test");
        assert_eq!(config.username, "operator");
        assert_eq!(config.project_code, "minicrm");
        assert_eq!(config.verify.roles, vec!["Viewer"]);
        assert_eq!(config.verify.list_limit, 25);
        assert_eq!(config.verify.visibility_timeout_ms, 5000);
        assert_eq!(
            config.verify.expected_schema_path.as_deref(),
            Some(std::path::Path::new("schema/expected.json"))
        );
        // untouched fields keep their defaults
        assert_eq!(config.verify.auth_project, "apps");
        assert_eq!(config.verify.visibility_delay_ms, 2000);
        Ok(())
    });
}

#[test]
fn explicit_config_file_replaces_default_file() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file("gravcheck.toml", r#"project_code = "ignored""#)?;
        jail.create_file("ci.toml", r#"project_code = "from-ci""#)?;

        let config: GravConfig =
            GravConfig::figment(Some(std::path::Path::new("ci.toml"))).extract()?;
        assert_eq!(config.project_code, "from-ci");
        Ok(())
    });
}

#[test]
fn missing_file_falls_back_to_defaults() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let config = load()?;
        assert_eq!(config.url, grav_config::DEFAULT_URL);
        assert!(config.verify.expected_schema_path.is_none());
        Ok(())
    });
}

fn load() -> figment::Result<GravConfig> {
    GravConfig::figment(None).extract()
}

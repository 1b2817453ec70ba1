use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the full verification: schema structure and user registration.
    Verify(VerifyArgs),
    /// Compare the live schema with the expected entities and attributes.
    Schema,
    /// Register a throwaway user and check that it is usable and visible.
    Register(RegisterArgs),
    /// Show the capabilities document of the project.
    Capabilities,
    /// List the project's roles.
    Roles,
    /// List users of the project.
    Users(UsersArgs),
    /// Seed a Company record unless one with the same orgCode exists.
    CreateCompany(CreateCompanyArgs),
    /// List the paths of a JSON OpenAPI document.
    OpenapiPaths(OpenApiPathsArgs),
    /// Print the first line containing each search term.
    FindLines(FindLinesArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Self::Verify(VerifyArgs::default())
    }
}

#[derive(Clone, Debug, Default, Args)]
pub struct VerifyArgs {
    /// Only check the schema structure.
    #[arg(long)]
    pub skip_registration: bool,

    /// Exit with code 2 when any check failed.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Debug, Args)]
pub struct RegisterArgs {
    /// Username to register (default: {user_prefix}-{unix_seconds}).
    #[arg(long)]
    pub username: Option<String>,

    /// Email for the profile (default: {username}@{email_domain}).
    #[arg(long)]
    pub email: Option<String>,

    /// Password for the new user (default: verify.test_password).
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct UsersArgs {
    /// Filter users by search string.
    #[arg(long)]
    pub search: Option<String>,

    /// Page size (default: verify.list_limit).
    #[arg(short, long)]
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct CreateCompanyArgs {
    #[arg(long, default_value = "Test Company")]
    pub name: String,

    #[arg(long, default_value = "TEST-01")]
    pub org_code: String,

    #[arg(long, default_value = "RUB")]
    pub currency: String,

    #[arg(long, default_value = "Europe/Moscow")]
    pub timezone: String,

    #[arg(long, default_value = "ru")]
    pub language: String,
}

#[derive(Clone, Debug, Args)]
pub struct OpenApiPathsArgs {
    /// OpenAPI document (JSON content, any extension).
    pub file: PathBuf,

    /// Where to write the sorted path list.
    #[arg(short, long, default_value = "api_analysis.txt")]
    pub output: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct FindLinesArgs {
    /// File to search.
    pub file: PathBuf,

    /// Terms to look for; each is reported with its first match.
    #[arg(required = true)]
    pub terms: Vec<String>,
}

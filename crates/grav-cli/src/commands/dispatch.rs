use std::process::ExitCode;

use grav_config::GravConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &GravConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    let done = |()| ExitCode::SUCCESS;
    match command {
        Commands::Verify(args) => commands::verify::handle(&args, config, flags).await,
        Commands::Schema => commands::schema::handle(config, flags).await.map(done),
        Commands::Register(args) => commands::register::handle(&args, config, flags)
            .await
            .map(done),
        Commands::Capabilities => commands::probes::capabilities(config, flags)
            .await
            .map(done),
        Commands::Roles => commands::probes::roles(config, flags).await.map(done),
        Commands::Users(args) => commands::probes::users(&args, config, flags)
            .await
            .map(done),
        Commands::CreateCompany(args) => commands::company::handle(&args, config, flags)
            .await
            .map(done),
        Commands::OpenapiPaths(_) | Commands::FindLines(_) => {
            unreachable!("local file commands are pre-dispatched in main")
        }
    }
}

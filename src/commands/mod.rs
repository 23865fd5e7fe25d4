pub mod access_keys;
pub mod apps;
pub mod auth;
pub mod deploy;
pub mod deployment_keys;
pub mod deployments;

use crate::command::Command;
use crate::context::Context;
use crate::error::CommandError;
use crate::output::OutputFormat;
use crate::resolver;
use crate::service::ReleaseService;

use self::auth::AuthAction;

/// Runs one command end to end.
pub async fn execute(ctx: &Context<'_>, command: Command) -> Result<(), CommandError> {
    let session = ctx.store.load();

    if let Some(format) = command.format() {
        format.parse::<OutputFormat>()?;
    }

    tracing::debug!(?command, logged_in = session.is_some(), "executing");

    match command {
        Command::Login { server_url } => auth::login(ctx, &server_url, AuthAction::Login).await,
        Command::Register { server_url } => {
            auth::login(ctx, &server_url, AuthAction::Register).await
        }
        Command::Logout => auth::logout(ctx, session).await,
        Command::App(command) => {
            let service = auth::authenticate(ctx, session.as_ref()).await?;
            apps::run(ctx, service.as_ref(), command).await
        }
        Command::Deployment(command) => {
            let service = auth::authenticate(ctx, session.as_ref()).await?;
            deployments::run(ctx, service.as_ref(), command).await
        }
        Command::DeploymentKey(command) => {
            let service = auth::authenticate(ctx, session.as_ref()).await?;
            deployment_keys::run(ctx, service.as_ref(), command).await
        }
        Command::AccessKey(command) => {
            let service = auth::authenticate(ctx, session.as_ref()).await?;
            access_keys::run(ctx, service.as_ref(), command).await
        }
        Command::Deploy(command) => {
            let service = auth::authenticate(ctx, session.as_ref()).await?;
            deploy::run(ctx, service.as_ref(), command).await
        }
    }
}

async fn require_app_id(
    service: &dyn ReleaseService,
    app_name: &str,
) -> Result<String, CommandError> {
    resolver::app_id(service, app_name)
        .await?
        .ok_or_else(|| CommandError::AppNotFound(app_name.to_string()))
}

async fn require_deployment_id(
    service: &dyn ReleaseService,
    app_id: &str,
    app_name: &str,
    deployment_name: &str,
) -> Result<String, CommandError> {
    resolver::deployment_id(service, app_id, deployment_name)
        .await?
        .ok_or_else(|| CommandError::DeploymentNotFound {
            deployment: deployment_name.to_string(),
            app: app_name.to_string(),
        })
}

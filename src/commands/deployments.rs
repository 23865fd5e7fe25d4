use crate::command::DeploymentCommand;
use crate::context::Context;
use crate::error::CommandError;
use crate::output::{self, OutputFormat};
use crate::prompt;
use crate::resolver;
use crate::service::ReleaseService;

use super::{require_app_id, require_deployment_id};

pub async fn run(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    command: DeploymentCommand,
) -> Result<(), CommandError> {
    match command {
        DeploymentCommand::Add {
            app_name,
            deployment_name,
        } => add(ctx, service, &app_name, &deployment_name).await,
        DeploymentCommand::List {
            app_name,
            format,
            verbose,
        } => list(ctx, service, &app_name, &format, verbose).await,
        DeploymentCommand::Remove {
            app_name,
            deployment_name,
        } => remove(ctx, service, &app_name, &deployment_name).await,
        DeploymentCommand::Rename {
            app_name,
            current_deployment_name: current,
            new_deployment_name: new,
        } => rename(ctx, service, &app_name, &current, &new).await,
    }
}

async fn add(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    app_name: &str,
    deployment_name: &str,
) -> Result<(), CommandError> {
    let app_id = require_app_id(service, app_name).await?;
    let deployment = service
        .add_deployment(&app_id, deployment_name, None)
        .await?;

    ctx.out.line(&format!(
        "Added deployment \"{}\" with ID {} to app \"{}\".",
        deployment_name, deployment.id, app_name
    ));
    Ok(())
}

async fn list(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    app_name: &str,
    format: &str,
    verbose: bool,
) -> Result<(), CommandError> {
    let format: OutputFormat = format.parse()?;
    let app_id = require_app_id(service, app_name).await?;
    let deployments = service.get_deployments(&app_id).await?;

    ctx.out
        .line(&output::render_deployments(format, &deployments, verbose)?);
    Ok(())
}

async fn remove(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    app_name: &str,
    deployment_name: &str,
) -> Result<(), CommandError> {
    let app_id = require_app_id(service, app_name).await?;
    let deployment_id = require_deployment_id(service, &app_id, app_name, deployment_name).await?;

    if !prompt::confirm(ctx.prompt)? {
        ctx.out.line("Remove cancelled.");
        return Ok(());
    }

    service.remove_deployment(&app_id, &deployment_id).await?;
    ctx.out.line(&format!(
        "Removed deployment \"{}\" from app \"{}\".",
        deployment_name, app_name
    ));
    Ok(())
}

async fn rename(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    app_name: &str,
    current_deployment_name: &str,
    new_deployment_name: &str,
) -> Result<(), CommandError> {
    let app_id = require_app_id(service, app_name).await?;
    let mut deployment = resolver::find_deployment(service, &app_id, current_deployment_name)
        .await?
        .ok_or_else(|| CommandError::DeploymentNotFound {
            deployment: current_deployment_name.to_string(),
            app: app_name.to_string(),
        })?;

    deployment.name = new_deployment_name.to_string();
    service.update_deployment(&app_id, &deployment).await?;

    ctx.out.line(&format!(
        "Renamed deployment \"{}\" to \"{}\" for app \"{}\".",
        current_deployment_name, new_deployment_name, app_name
    ));
    Ok(())
}

use crate::command::AppCommand;
use crate::context::Context;
use crate::error::CommandError;
use crate::output::{self, OutputFormat};
use crate::prompt;
use crate::resolver;
use crate::service::ReleaseService;

use super::require_app_id;

pub async fn run(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    command: AppCommand,
) -> Result<(), CommandError> {
    match command {
        AppCommand::Add { app_name } => add(ctx, service, &app_name).await,
        AppCommand::List { format } => list(ctx, service, &format).await,
        AppCommand::Remove { app_name } => remove(ctx, service, &app_name).await,
        AppCommand::Rename {
            current_app_name,
            new_app_name,
        } => rename(ctx, service, &current_app_name, &new_app_name).await,
    }
}

async fn add(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    app_name: &str,
) -> Result<(), CommandError> {
    let app = service.add_app(app_name, None).await?;
    ctx.out
        .line(&format!("Added app \"{}\" with ID {}.", app_name, app.id));
    Ok(())
}

async fn list(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    format: &str,
) -> Result<(), CommandError> {
    let format: OutputFormat = format.parse()?;
    let apps = service.get_apps().await?;
    ctx.out.line(&output::render_list(format, &apps)?);
    Ok(())
}

async fn remove(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    app_name: &str,
) -> Result<(), CommandError> {
    let app_id = require_app_id(service, app_name).await?;

    if !prompt::confirm(ctx.prompt)? {
        ctx.out.line("Remove cancelled.");
        return Ok(());
    }

    service.remove_app(&app_id).await?;
    ctx.out.line(&format!("Removed app \"{}\".", app_name));
    Ok(())
}

async fn rename(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    current_app_name: &str,
    new_app_name: &str,
) -> Result<(), CommandError> {
    let mut app = resolver::find_app(service, current_app_name)
        .await?
        .ok_or_else(|| CommandError::AppNotFound(current_app_name.to_string()))?;

    app.name = new_app_name.to_string();
    service.update_app(&app).await?;

    ctx.out.line(&format!(
        "Renamed app \"{}\" to \"{}\".",
        current_app_name, new_app_name
    ));
    Ok(())
}

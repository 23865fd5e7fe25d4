use crate::command::DeploymentKeyCommand;
use crate::context::Context;
use crate::error::CommandError;
use crate::output::{self, OutputFormat};
use crate::service::ReleaseService;

use super::{require_app_id, require_deployment_id};

pub async fn run(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    command: DeploymentKeyCommand,
) -> Result<(), CommandError> {
    match command {
        DeploymentKeyCommand::List {
            app_name,
            deployment_name,
            format,
        } => {
            let format: OutputFormat = format.parse()?;
            let app_id = require_app_id(service, &app_name).await?;
            let deployment_id =
                require_deployment_id(service, &app_id, &app_name, &deployment_name).await?;

            let keys = service.get_deployment_keys(&app_id, &deployment_id).await?;
            let rendered = output::render_deployment_keys(format, &keys)?;
            ctx.out.line(&rendered);
            Ok(())
        }
    }
}

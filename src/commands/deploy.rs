use crate::command::DeployCommand;
use crate::context::Context;
use crate::error::CommandError;
use crate::models::deployment::PackageInfo;
use crate::packager;
use crate::service::ReleaseService;

use super::{require_app_id, require_deployment_id};

/// Releases a file or directory to a deployment.
pub async fn run(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    command: DeployCommand,
) -> Result<(), CommandError> {
    // 1. Resolve app and deployment
    let app_id = require_app_id(service, &command.app_name).await?;
    let deployment_id = require_deployment_id(
        service,
        &app_id,
        &command.app_name,
        &command.deployment_name,
    )
    .await?;

    // 2. Package
    let file = packager::package_into(&command.package, ctx.work_dir).await?;

    // 3. Upload, then drop any archive we created
    let info = PackageInfo {
        description: command.description.clone(),
        label: None,
        app_version: command.min_app_version.clone(),
        is_mandatory: command.mandatory,
    };
    let uploaded = service
        .add_package(&app_id, &deployment_id, &file.path, &info)
        .await;

    if file.is_temporary {
        if let Err(e) = tokio::fs::remove_file(&file.path).await {
            tracing::warn!(
                path = %file.path.display(),
                error = %e,
                "failed to delete temporary archive"
            );
        }
    }

    uploaded?;

    ctx.out.line(&format!(
        "Deployed package {} to deployment \"{}\" for app \"{}\".",
        command.package.display(),
        command.deployment_name,
        command.app_name
    ));
    Ok(())
}

use crate::command::AccessKeyCommand;
use crate::context::Context;
use crate::error::CommandError;
use crate::output::{self, OutputFormat};
use crate::prompt;
use crate::resolver;
use crate::service::ReleaseService;

pub async fn run(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    command: AccessKeyCommand,
) -> Result<(), CommandError> {
    match command {
        AccessKeyCommand::Add { access_key_name } => {
            let access_key = service.add_access_key(&access_key_name).await?;
            ctx.out.line(&format!(
                "Created a new access key \"{}\": {}",
                access_key.name, access_key.key
            ));
            Ok(())
        }
        AccessKeyCommand::List { format } => {
            let format: OutputFormat = format.parse()?;
            let access_keys = service.get_access_keys().await?;
            ctx.out.line(&output::render_list(format, &access_keys)?);
            Ok(())
        }
        AccessKeyCommand::Remove { access_key_name } => {
            remove(ctx, service, &access_key_name).await
        }
    }
}

async fn remove(
    ctx: &Context<'_>,
    service: &dyn ReleaseService,
    access_key_name: &str,
) -> Result<(), CommandError> {
    let access_key_id = resolver::access_key_id(service, access_key_name)
        .await?
        .ok_or_else(|| CommandError::AccessKeyNotFound(access_key_name.to_string()))?;

    if !prompt::confirm(ctx.prompt)? {
        ctx.out.line("Remove cancelled.");
        return Ok(());
    }

    service.remove_access_key(&access_key_id).await?;
    ctx.out
        .line(&format!("Removed access key \"{}\".", access_key_name));
    Ok(())
}

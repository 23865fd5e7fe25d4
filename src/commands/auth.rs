use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::error::CommandError;
use crate::prompt;
use crate::resolver;
use crate::service::ReleaseService;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    fn as_str(self) -> &'static str {
        match self {
            AuthAction::Login => "login",
            AuthAction::Register => "register",
        }
    }
}

/// The identity embedded in an access token: base64 over this JSON.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccessToken {
    access_key_name: String,
    provider_name: String,
    provider_unique_id: String,
}

pub fn encode_access_token(session: &Session) -> Result<String, CommandError> {
    let token = AccessToken {
        access_key_name: session.access_key_name.clone(),
        provider_name: session.provider_name.clone(),
        provider_unique_id: session.provider_unique_id.clone(),
    };
    Ok(STANDARD.encode(serde_json::to_string(&token)?))
}

fn session_from_token(access_token: &str, server_url: &str) -> Result<Session, CommandError> {
    let json = STANDARD
        .decode(access_token)
        .map_err(|_| CommandError::InvalidAccessToken)?;
    let token: AccessToken =
        serde_json::from_slice(&json).map_err(|_| CommandError::InvalidAccessToken)?;

    Ok(Session {
        access_key_name: token.access_key_name,
        provider_name: token.provider_name,
        provider_unique_id: token.provider_unique_id,
        server_url: server_url.to_string(),
    })
}

/// Interactive login or registration: send the user to the browser, take the
/// pasted token, check it with the service and persist the session.
pub async fn login(
    ctx: &Context<'_>,
    server_url: &str,
    action: AuthAction,
) -> Result<(), CommandError> {
    let server_url = server_url.trim_end_matches('/');
    initiate_external_authentication(ctx, server_url, action);

    let Some(access_token) = prompt::request_access_token(ctx.prompt) else {
        tracing::debug!("access token prompt aborted");
        return Ok(());
    };

    if access_token.is_empty() {
        return Err(CommandError::InvalidAccessToken);
    }

    let service = ctx.connector.connect(server_url)?;
    service.login_with_access_token(&access_token).await?;

    let session = session_from_token(&access_token, server_url)?;
    ctx.store.save(&session)?;

    ctx.out.line("Log in successful.");
    Ok(())
}

fn initiate_external_authentication(ctx: &Context<'_>, server_url: &str, action: AuthAction) {
    ctx.out.line(
        "An internet browser will now launch to authenticate your identity.\n\n\
         After completing in-browser authentication, please enter your access token to log in \
         or use [CTRL]+[C] to exit.",
    );

    let url = format!("{}/auth/{}", server_url, action.as_str());
    ctx.out.line(&format!("\nLaunching browser for {}", url));
    ctx.browser.open(&url);
}

/// Re-authenticates from the persisted session.
pub async fn authenticate(
    ctx: &Context<'_>,
    session: Option<&Session>,
) -> Result<Box<dyn ReleaseService>, CommandError> {
    let session = session.ok_or(CommandError::NotLoggedIn)?;
    let service = ctx.connector.connect(&session.server_url)?;

    service
        .login_with_access_token(&encode_access_token(session)?)
        .await
        .map_err(CommandError::SessionRejected)?;

    Ok(service)
}

/// Revokes the session remotely as far as possible, then always deletes it
/// locally.
pub async fn logout(ctx: &Context<'_>, session: Option<Session>) -> Result<(), CommandError> {
    let Some(session) = session else {
        return Ok(());
    };

    match ctx.connector.connect(&session.server_url) {
        Ok(service) => {
            if let Err(e) = revoke_access_key(service.as_ref(), &session).await {
                tracing::warn!(error = %e, "could not remove the session's access key");
            }
            if let Err(e) = service.logout().await {
                tracing::warn!(error = %e, "remote logout failed");
            }
        }
        Err(e) => tracing::warn!(error = %e, "could not reach the service to log out"),
    }

    if let Err(e) = ctx.store.clear() {
        tracing::warn!(
            path = %ctx.store.path().display(),
            error = %e,
            "could not delete session file"
        );
    }

    ctx.out.line("Log out successful.");
    Ok(())
}

async fn revoke_access_key(
    service: &dyn ReleaseService,
    session: &Session,
) -> Result<(), CommandError> {
    service
        .login_with_access_token(&encode_access_token(session)?)
        .await
        .map_err(CommandError::SessionRejected)?;

    match resolver::access_key_id(service, &session.access_key_name).await? {
        Some(id) => service.remove_access_key(&id).await?,
        None => tracing::debug!(name = %session.access_key_name, "access key already removed"),
    }
    Ok(())
}

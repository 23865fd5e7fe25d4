use std::io;

use dialoguer::Input;

use crate::error::CommandError;

/// What the user did with a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Answered(String),
    Aborted,
}

pub trait Prompt: Send + Sync {
    /// Asks one question. An empty answer yields `default` when one is given.
    fn ask(&self, message: &str, default: Option<&str>) -> io::Result<Response>;
}

pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&self, message: &str, default: Option<&str>) -> io::Result<Response> {
        let mut input = Input::<String>::new();
        input.with_prompt(message).allow_empty(true);
        if let Some(default) = default {
            input.default(default.to_string());
        }

        match input.interact_text() {
            Ok(text) => Ok(Response::Answered(text.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Response::Aborted),
            Err(e) => Err(e),
        }
    }
}

/// Asks "Are you sure?", defaulting to yes. Only `y` or `Y` confirm; prompt
/// failures are errors.
pub fn confirm(prompt: &dyn Prompt) -> Result<bool, CommandError> {
    let response = prompt
        .ask("Are you sure?", Some("y"))
        .map_err(CommandError::Prompt)?;
    match response {
        Response::Answered(answer) => Ok(answer == "y" || answer == "Y"),
        Response::Aborted => Err(CommandError::PromptAborted),
    }
}

/// Asks for a pasted access token. `None` means the user backed out, and any
/// prompt failure is treated the same way.
pub fn request_access_token(prompt: &dyn Prompt) -> Option<String> {
    match prompt.ask("Enter your access token", None) {
        Ok(Response::Answered(token)) => Some(token.trim().to_string()),
        Ok(Response::Aborted) => None,
        Err(e) => {
            tracing::debug!(error = %e, "access token prompt failed");
            None
        }
    }
}

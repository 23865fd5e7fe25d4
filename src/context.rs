use std::path::Path;

use crate::browser::Browser;
use crate::output::Reporter;
use crate::prompt::Prompt;
use crate::service::Connector;
use crate::session::SessionStore;

/// Per-invocation collaborators, created once in `main` and handed to
/// every handler.
pub struct Context<'a> {
    pub store: &'a SessionStore,
    pub connector: &'a dyn Connector,
    pub prompt: &'a dyn Prompt,
    pub browser: &'a dyn Browser,
    pub out: &'a dyn Reporter,
    /// Where temporary archives are written.
    pub work_dir: &'a Path,
}

use std::process::Command;

/// Opens a URL for the user. Launch failures are never command failures.
pub trait Browser: Send + Sync {
    fn open(&self, url: &str);
}

pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) {
        if let Err(e) = opener(url).spawn() {
            tracing::warn!(url, error = %e, "failed to launch browser");
        }
    }
}

#[cfg(target_os = "windows")]
fn opener(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(target_os = "macos")]
fn opener(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

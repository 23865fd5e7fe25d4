use std::path::PathBuf;

/// A parsed command, ready to execute. Each variant carries only what its
/// operation needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { server_url: String },
    Register { server_url: String },
    Logout,
    App(AppCommand),
    Deployment(DeploymentCommand),
    DeploymentKey(DeploymentKeyCommand),
    AccessKey(AccessKeyCommand),
    Deploy(DeployCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Add { app_name: String },
    List { format: String },
    Remove { app_name: String },
    Rename {
        current_app_name: String,
        new_app_name: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeploymentCommand {
    Add {
        app_name: String,
        deployment_name: String,
    },
    List {
        app_name: String,
        format: String,
        verbose: bool,
    },
    Remove {
        app_name: String,
        deployment_name: String,
    },
    Rename {
        app_name: String,
        current_deployment_name: String,
        new_deployment_name: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeploymentKeyCommand {
    List {
        app_name: String,
        deployment_name: String,
        format: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccessKeyCommand {
    Add { access_key_name: String },
    List { format: String },
    Remove { access_key_name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeployCommand {
    pub app_name: String,
    pub deployment_name: String,
    pub package: PathBuf,
    pub description: Option<String>,
    pub min_app_version: String,
    pub mandatory: bool,
}

impl Command {
    /// The requested output format, for commands that render a list.
    pub fn format(&self) -> Option<&str> {
        match self {
            Command::App(AppCommand::List { format })
            | Command::Deployment(DeploymentCommand::List { format, .. })
            | Command::DeploymentKey(DeploymentKeyCommand::List { format, .. })
            | Command::AccessKey(AccessKeyCommand::List { format }) => Some(format.as_str()),
            _ => None,
        }
    }
}

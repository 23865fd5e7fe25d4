use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::command::{
    AccessKeyCommand, AppCommand, Command, DeployCommand, DeploymentCommand,
    DeploymentKeyCommand,
};
use crate::logging::LogArgs;

const DEFAULT_SERVER_URL: &str = "https://codepush.azurewebsites.net";

#[derive(Parser)]
#[command(name = "code-push")]
#[command(about = "Manage apps, deployments and releases on a CodePush server")]
pub struct Cli {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate in the browser and keep the session on this machine
    Login {
        /// Server to authenticate against
        #[arg(long, env = "CODE_PUSH_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
        server_url: String,
    },

    /// Create an account in the browser and log in with it
    Register {
        #[arg(long, env = "CODE_PUSH_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
        server_url: String,
    },

    /// Revoke the current session and forget it locally
    Logout,

    /// Manage apps
    #[command(subcommand)]
    App(AppCommands),

    /// Manage an app's deployments
    #[command(subcommand)]
    Deployment(DeploymentCommands),

    /// Inspect the keys clients use to fetch a deployment's updates
    #[command(subcommand)]
    DeploymentKey(DeploymentKeyCommands),

    /// Manage access keys of the account
    #[command(subcommand)]
    AccessKey(AccessKeyCommands),

    /// Release a file or directory to a deployment
    Deploy {
        app_name: String,
        deployment_name: String,

        /// File or directory to release; directories are zipped first
        package: PathBuf,

        /// Binary version range this release targets
        #[arg(long)]
        min_app_version: String,

        #[arg(long)]
        description: Option<String>,

        /// Require clients to install this release
        #[arg(long)]
        mandatory: bool,
    },
}

#[derive(Subcommand)]
pub enum AppCommands {
    Add { app_name: String },
    #[command(alias = "ls")]
    List {
        /// json or table
        #[arg(long, default_value = "table")]
        format: String,
    },
    #[command(alias = "rm")]
    Remove { app_name: String },
    Rename {
        current_app_name: String,
        new_app_name: String,
    },
}

#[derive(Subcommand)]
pub enum DeploymentCommands {
    Add {
        app_name: String,
        deployment_name: String,
    },
    #[command(alias = "ls")]
    List {
        app_name: String,
        #[arg(long, default_value = "table")]
        format: String,
        /// Include descriptions and the latest package
        #[arg(long)]
        verbose: bool,
    },
    #[command(alias = "rm")]
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

#[derive(Subcommand)]
pub enum DeploymentKeyCommands {
    #[command(alias = "ls")]
    List {
        app_name: String,
        deployment_name: String,
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum AccessKeyCommands {
    Add { access_key_name: String },
    #[command(alias = "ls")]
    List {
        #[arg(long, default_value = "table")]
        format: String,
    },
    #[command(alias = "rm")]
    Remove { access_key_name: String },
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Login { server_url } => Command::Login { server_url },
            Commands::Register { server_url } => Command::Register { server_url },
            Commands::Logout => Command::Logout,
            Commands::App(app) => Command::App(match app {
                AppCommands::Add { app_name } => AppCommand::Add { app_name },
                AppCommands::List { format } => AppCommand::List { format },
                AppCommands::Remove { app_name } => AppCommand::Remove { app_name },
                AppCommands::Rename {
                    current_app_name,
                    new_app_name,
                } => AppCommand::Rename {
                    current_app_name,
                    new_app_name,
                },
            }),
            Commands::Deployment(deployment) => Command::Deployment(match deployment {
                DeploymentCommands::Add {
                    app_name,
                    deployment_name,
                } => DeploymentCommand::Add {
                    app_name,
                    deployment_name,
                },
                DeploymentCommands::List {
                    app_name,
                    format,
                    verbose,
                } => DeploymentCommand::List {
                    app_name,
                    format,
                    verbose,
                },
                DeploymentCommands::Remove {
                    app_name,
                    deployment_name,
                } => DeploymentCommand::Remove {
                    app_name,
                    deployment_name,
                },
                DeploymentCommands::Rename {
                    app_name,
                    current_deployment_name,
                    new_deployment_name,
                } => DeploymentCommand::Rename {
                    app_name,
                    current_deployment_name,
                    new_deployment_name,
                },
            }),
            Commands::DeploymentKey(DeploymentKeyCommands::List {
                app_name,
                deployment_name,
                format,
            }) => Command::DeploymentKey(DeploymentKeyCommand::List {
                app_name,
                deployment_name,
                format,
            }),
            Commands::AccessKey(access_key) => Command::AccessKey(match access_key {
                AccessKeyCommands::Add { access_key_name } => {
                    AccessKeyCommand::Add { access_key_name }
                }
                AccessKeyCommands::List { format } => AccessKeyCommand::List { format },
                AccessKeyCommands::Remove { access_key_name } => {
                    AccessKeyCommand::Remove { access_key_name }
                }
            }),
            Commands::Deploy {
                app_name,
                deployment_name,
                package,
                min_app_version,
                description,
                mandatory,
            } => Command::Deploy(DeployCommand {
                app_name,
                deployment_name,
                package,
                description,
                min_app_version,
                mandatory,
            }),
        }
    }
}

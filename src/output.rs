use std::str::FromStr;

use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Cell, Color, Table};
use serde::Serialize;

use crate::error::CommandError;
use crate::models::access_key::AccessKey;
use crate::models::app::App;
use crate::models::deployment::{Deployment, DeploymentKey, Package};

const WRAP_WIDTH: usize = 30;

/// Where user-facing result lines go.
pub trait Reporter: Send + Sync {
    fn line(&self, message: &str);
}

pub struct Stdout;

impl Reporter for Stdout {
    fn line(&self, message: &str) {
        println!("{}", message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl FromStr for OutputFormat {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            other => Err(CommandError::InvalidFormat(other.to_string())),
        }
    }
}

/// Anything listed by its name and id.
pub trait Listed {
    fn name(&self) -> &str;
    fn id(&self) -> &str;
}

impl Listed for App {
    fn name(&self) -> &str {
        &self.name
    }
    fn id(&self) -> &str {
        &self.id
    }
}

impl Listed for Deployment {
    fn name(&self) -> &str {
        &self.name
    }
    fn id(&self) -> &str {
        &self.id
    }
}

impl Listed for AccessKey {
    fn name(&self) -> &str {
        &self.name
    }
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Serialize)]
struct NamedRecord<'a> {
    name: &'a str,
    id: &'a str,
}

#[derive(Serialize)]
struct KeyRecord<'a> {
    name: &'a str,
    id: &'a str,
    key: &'a str,
}

#[derive(Serialize)]
struct DeploymentRecord<'a> {
    name: &'a str,
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<PackageRecord<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageRecord<'a> {
    app_version: &'a str,
    is_mandatory: bool,
    package_hash: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

pub fn render_list<T: Listed>(format: OutputFormat, items: &[T]) -> Result<String, CommandError> {
    match format {
        OutputFormat::Json => {
            let records: Vec<_> = items
                .iter()
                .map(|item| NamedRecord {
                    name: item.name(),
                    id: item.id(),
                })
                .collect();
            Ok(serde_json::to_string(&records)?)
        }
        OutputFormat::Table => Ok(table(
            &["Name", "ID"],
            items
                .iter()
                .map(|item| vec![item.name().to_string(), item.id().to_string()]),
            false,
        )),
    }
}

pub fn render_deployment_keys(
    format: OutputFormat,
    keys: &[DeploymentKey],
) -> Result<String, CommandError> {
    match format {
        OutputFormat::Json => {
            let records: Vec<_> = keys
                .iter()
                .map(|k| KeyRecord {
                    name: &k.name,
                    id: &k.id,
                    key: &k.key,
                })
                .collect();
            Ok(serde_json::to_string(&records)?)
        }
        OutputFormat::Table => Ok(table(
            &["Name", "ID", "Key"],
            keys.iter()
                .map(|k| vec![k.name.clone(), k.id.clone(), k.key.clone()]),
            false,
        )),
    }
}

/// Lists deployments. Only the verbose form shows descriptions and packages.
pub fn render_deployments(
    format: OutputFormat,
    deployments: &[Deployment],
    verbose: bool,
) -> Result<String, CommandError> {
    if !verbose {
        return render_list(format, deployments);
    }

    match format {
        OutputFormat::Json => {
            let records: Vec<_> = deployments.iter().map(deployment_record).collect();
            Ok(serde_json::to_string(&records)?)
        }
        OutputFormat::Table => Ok(table(
            &["Name", "ID", "Deployment Description", "Package Metadata"],
            deployments.iter().map(|d| {
                vec![
                    d.name.clone(),
                    d.id.clone(),
                    non_empty(d.description.as_deref())
                        .map(|text| textwrap::fill(text, WRAP_WIDTH))
                        .unwrap_or_default(),
                    d.package.as_ref().map(package_summary).unwrap_or_default(),
                ]
            }),
            true,
        )),
    }
}

fn deployment_record(deployment: &Deployment) -> DeploymentRecord<'_> {
    DeploymentRecord {
        name: &deployment.name,
        id: &deployment.id,
        description: non_empty(deployment.description.as_deref()),
        package: deployment.package.as_ref().map(|p| PackageRecord {
            app_version: &p.app_version,
            is_mandatory: p.is_mandatory,
            package_hash: &p.package_hash,
            description: non_empty(p.description.as_deref()),
        }),
    }
}

fn package_summary(package: &Package) -> String {
    let mut lines = Vec::new();
    if let Some(description) = non_empty(package.description.as_deref()) {
        let text = format!("Description: {}", description);
        lines.push(textwrap::fill(&text, WRAP_WIDTH));
    }
    let mandatory = if package.is_mandatory { "Yes" } else { "No" };
    lines.push(format!("Version: {}", package.app_version));
    lines.push(format!("Mandatory: {}", mandatory));
    lines.push(format!("Hash: {}", package.package_hash));
    lines.join("\n")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn table<I>(columns: &[&str], rows: I, separate_rows: bool) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let preset = if separate_rows {
        UTF8_FULL
    } else {
        UTF8_FULL_CONDENSED
    };
    let header: Vec<_> = columns
        .iter()
        .map(|name| Cell::new(name).fg(Color::Cyan))
        .collect();

    let mut table = Table::new();
    table.load_preset(preset).set_header(header);

    for row in rows {
        table.add_row(row);
    }

    table.to_string()
}

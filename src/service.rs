use std::path::Path;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::models::access_key::AccessKey;
use crate::models::app::App;
use crate::models::deployment::{Deployment, DeploymentKey, PackageInfo};

/// The remote release-management service, as seen by one command.
///
/// Calls are awaited one at a time; implementations own transport concerns
/// such as TLS and timeouts.
#[async_trait]
pub trait ReleaseService: Send + Sync {
    async fn login_with_access_token(&self, access_token: &str) -> Result<(), ServiceError>;
    async fn logout(&self) -> Result<(), ServiceError>;

    async fn get_apps(&self) -> Result<Vec<App>, ServiceError>;
    async fn add_app(&self, name: &str, description: Option<&str>) -> Result<App, ServiceError>;
    async fn remove_app(&self, app_id: &str) -> Result<(), ServiceError>;
    async fn update_app(&self, app: &App) -> Result<(), ServiceError>;

    async fn get_deployments(&self, app_id: &str) -> Result<Vec<Deployment>, ServiceError>;
    async fn add_deployment(
        &self,
        app_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Deployment, ServiceError>;
    async fn remove_deployment(
        &self,
        app_id: &str,
        deployment_id: &str,
    ) -> Result<(), ServiceError>;
    async fn update_deployment(
        &self,
        app_id: &str,
        deployment: &Deployment,
    ) -> Result<(), ServiceError>;

    async fn get_deployment_keys(
        &self,
        app_id: &str,
        deployment_id: &str,
    ) -> Result<Vec<DeploymentKey>, ServiceError>;

    async fn get_access_keys(&self) -> Result<Vec<AccessKey>, ServiceError>;
    async fn add_access_key(&self, name: &str) -> Result<AccessKey, ServiceError>;
    async fn remove_access_key(&self, access_key_id: &str) -> Result<(), ServiceError>;

    async fn add_package(
        &self,
        app_id: &str,
        deployment_id: &str,
        file_path: &Path,
        info: &PackageInfo,
    ) -> Result<(), ServiceError>;
}

/// Builds a service handle bound to one server URL.
pub trait Connector: Send + Sync {
    fn connect(&self, server_url: &str) -> Result<Box<dyn ReleaseService>, ServiceError>;
}

pub mod client;

use std::path::Path;

use async_trait::async_trait;
use reqwest::Method;

use crate::error::ServiceError;
use crate::models::access_key::{
    AccessKey, AccessKeyCreateRequest, AccessKeyListResponse, AccessKeyResponse,
};
use crate::models::app::{App, AppCreateRequest, AppListResponse, AppResponse};
use crate::models::deployment::{
    Deployment, DeploymentCreateRequest, DeploymentKey, DeploymentKeyListResponse,
    DeploymentListResponse, DeploymentResponse, PackageInfo,
};
use crate::service::{Connector, ReleaseService};

pub use client::CodePushClient;

/// Connects to the real service over HTTP.
pub struct HttpConnector;

impl Connector for HttpConnector {
    fn connect(&self, server_url: &str) -> Result<Box<dyn ReleaseService>, ServiceError> {
        Ok(Box::new(CodePushClient::new(server_url)?))
    }
}

#[async_trait]
impl ReleaseService for CodePushClient {
    async fn login_with_access_token(&self, access_token: &str) -> Result<(), ServiceError> {
        self.authenticate(access_token).await
    }

    async fn logout(&self) -> Result<(), ServiceError> {
        self.sign_out().await
    }

    async fn get_apps(&self) -> Result<Vec<App>, ServiceError> {
        let list: AppListResponse = self.get_json(&["apps"], "Listing apps").await?;
        Ok(list.apps)
    }

    async fn add_app(&self, name: &str, description: Option<&str>) -> Result<App, ServiceError> {
        let req = self
            .request(Method::POST, &["apps"])
            .json(&AppCreateRequest { name, description });
        let created: AppResponse = self.send(req, "Adding app").await?.json().await?;
        Ok(created.app)
    }

    async fn remove_app(&self, app_id: &str) -> Result<(), ServiceError> {
        let req = self.request(Method::DELETE, &["apps", app_id]);
        self.send(req, "Removing app").await?;
        Ok(())
    }

    async fn update_app(&self, app: &App) -> Result<(), ServiceError> {
        let req = self
            .request(Method::PUT, &["apps", app.id.as_str()])
            .json(app);
        self.send(req, "Updating app").await?;
        Ok(())
    }

    async fn get_deployments(&self, app_id: &str) -> Result<Vec<Deployment>, ServiceError> {
        let list: DeploymentListResponse = self
            .get_json(&["apps", app_id, "deployments"], "Listing deployments")
            .await?;
        Ok(list.deployments)
    }

    async fn add_deployment(
        &self,
        app_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Deployment, ServiceError> {
        let req = self
            .request(Method::POST, &["apps", app_id, "deployments"])
            .json(&DeploymentCreateRequest { name, description });
        let created: DeploymentResponse = self.send(req, "Adding deployment").await?.json().await?;
        Ok(created.deployment)
    }

    async fn remove_deployment(
        &self,
        app_id: &str,
        deployment_id: &str,
    ) -> Result<(), ServiceError> {
        let req = self.request(
            Method::DELETE,
            &["apps", app_id, "deployments", deployment_id],
        );
        self.send(req, "Removing deployment").await?;
        Ok(())
    }

    async fn update_deployment(
        &self,
        app_id: &str,
        deployment: &Deployment,
    ) -> Result<(), ServiceError> {
        let req = self
            .request(
                Method::PUT,
                &["apps", app_id, "deployments", deployment.id.as_str()],
            )
            .json(deployment);
        self.send(req, "Updating deployment").await?;
        Ok(())
    }

    async fn get_deployment_keys(
        &self,
        app_id: &str,
        deployment_id: &str,
    ) -> Result<Vec<DeploymentKey>, ServiceError> {
        let segments = [
            "apps",
            app_id,
            "deployments",
            deployment_id,
            "deploymentKeys",
        ];
        let list: DeploymentKeyListResponse =
            self.get_json(&segments, "Listing deployment keys").await?;
        Ok(list.deployment_keys)
    }

    async fn get_access_keys(&self) -> Result<Vec<AccessKey>, ServiceError> {
        let list: AccessKeyListResponse =
            self.get_json(&["accessKeys"], "Listing access keys").await?;
        Ok(list.access_keys)
    }

    async fn add_access_key(&self, name: &str) -> Result<AccessKey, ServiceError> {
        let req = self
            .request(Method::POST, &["accessKeys"])
            .json(&AccessKeyCreateRequest { name });
        let created: AccessKeyResponse = self.send(req, "Adding access key").await?.json().await?;
        Ok(created.access_key)
    }

    async fn remove_access_key(&self, access_key_id: &str) -> Result<(), ServiceError> {
        let req = self.request(Method::DELETE, &["accessKeys", access_key_id]);
        self.send(req, "Removing access key").await?;
        Ok(())
    }

    async fn add_package(
        &self,
        app_id: &str,
        deployment_id: &str,
        file_path: &Path,
        info: &PackageInfo,
    ) -> Result<(), ServiceError> {
        self.upload_package(app_id, deployment_id, file_path, info)
            .await
    }
}

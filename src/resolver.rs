//! Name to id lookups. An unmatched name is `None`, not an error; callers
//! decide whether a missing entity is fatal.

use crate::error::ServiceError;
use crate::models::access_key::AccessKey;
use crate::models::app::App;
use crate::models::deployment::Deployment;
use crate::service::ReleaseService;

pub async fn find_app(
    service: &dyn ReleaseService,
    name: &str,
) -> Result<Option<App>, ServiceError> {
    let apps = service.get_apps().await?;
    Ok(apps.into_iter().find(|app| app.name == name))
}

pub async fn app_id(
    service: &dyn ReleaseService,
    name: &str,
) -> Result<Option<String>, ServiceError> {
    Ok(find_app(service, name).await?.map(|app| app.id))
}

pub async fn find_deployment(
    service: &dyn ReleaseService,
    app_id: &str,
    name: &str,
) -> Result<Option<Deployment>, ServiceError> {
    let deployments = service.get_deployments(app_id).await?;
    Ok(deployments.into_iter().find(|d| d.name == name))
}

pub async fn deployment_id(
    service: &dyn ReleaseService,
    app_id: &str,
    name: &str,
) -> Result<Option<String>, ServiceError> {
    Ok(find_deployment(service, app_id, name).await?.map(|d| d.id))
}

pub async fn find_access_key(
    service: &dyn ReleaseService,
    name: &str,
) -> Result<Option<AccessKey>, ServiceError> {
    let keys = service.get_access_keys().await?;
    Ok(keys.into_iter().find(|key| key.name == name))
}

pub async fn access_key_id(
    service: &dyn ReleaseService,
    name: &str,
) -> Result<Option<String>, ServiceError> {
    Ok(find_access_key(service, name).await?.map(|key| key.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeService, access_key, app, deployment};

    #[tokio::test]
    async fn returns_first_exact_match() {
        let apps = vec![app("1", "a"), app("2", "b"), app("3", "b")];
        let service = FakeService::new().with_apps(apps);

        assert_eq!(app_id(&service, "b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn matching_is_case_sensitive() {
        let service = FakeService::new().with_apps(vec![app("1", "Alpha")]);

        assert_eq!(app_id(&service, "alpha").await.unwrap(), None);
        let id = app_id(&service, "Alpha").await.unwrap();
        assert_eq!(id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn deployments_are_scoped_to_their_app() {
        let service = FakeService::new()
            .with_apps(vec![app("1", "a"), app("2", "b")])
            .with_deployments("1", vec![deployment("10", "Staging")])
            .with_deployments("2", vec![deployment("20", "Production")]);

        let staging = deployment_id(&service, "1", "Staging").await.unwrap();
        assert_eq!(staging.as_deref(), Some("10"));
        let production = deployment_id(&service, "1", "Production").await.unwrap();
        assert_eq!(production, None);
    }

    #[tokio::test]
    async fn access_keys_resolve_by_name() {
        let service = FakeService::new().with_access_keys(vec![access_key("7", "8")]);

        let id = access_key_id(&service, "8").await.unwrap();
        assert_eq!(id.as_deref(), Some("7"));
        assert_eq!(access_key_id(&service, "7").await.unwrap(), None);
    }

    #[tokio::test]
    async fn transport_failures_propagate() {
        let service = FakeService::new().failing("getApps");

        assert!(app_id(&service, "a").await.is_err());
    }
}

use std::path::Path;
use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url, multipart};
use serde::de::DeserializeOwned;
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};

use crate::error::ServiceError;
use crate::models::deployment::PackageInfo;

/// HTTP client for the release-management REST API.
pub struct CodePushClient {
    base_url: Url,
    token: RwLock<Option<String>>,
    http: Client,
}

impl CodePushClient {
    pub fn new(server_url: &str) -> Result<Self, ServiceError> {
        let base_url = Url::parse(server_url.trim_end_matches('/'))
            .map_err(|_| ServiceError::InvalidUrl(server_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidUrl(server_url.to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(1800)) // 30 min for large uploads
            .build()?;

        Ok(Self {
            base_url,
            token: RwLock::new(None),
            http,
        })
    }

    /// Remembers `token` for every later request once the server accepts it.
    pub async fn authenticate(&self, token: &str) -> Result<(), ServiceError> {
        let req = self
            .http
            .get(self.url(&["authenticated"]))
            .bearer_auth(token);
        self.send(req, "Authentication").await?;

        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    pub async fn sign_out(&self) -> Result<(), ServiceError> {
        self.send(self.request(Method::POST, &["auth", "logout"]), "Logout")
            .await?;

        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
        Ok(())
    }

    pub(super) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(super) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let req = self
            .http
            .request(method, self.url(segments))
            .header("Accept", "application/json");

        match self.token.read().ok().and_then(|token| token.clone()) {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub(super) async fn send(
        &self,
        req: RequestBuilder,
        action: &str,
    ) -> Result<Response, ServiceError> {
        let resp = req.send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Rejected {
                action: action.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp)
    }

    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        action: &str,
    ) -> Result<T, ServiceError> {
        let resp = self
            .send(self.request(Method::GET, segments), action)
            .await?;
        Ok(resp.json().await?)
    }

    /// Streams a release artifact to a deployment.
    pub async fn upload_package(
        &self,
        app_id: &str,
        deployment_id: &str,
        file_path: &Path,
        info: &PackageInfo,
    ) -> Result<(), ServiceError> {
        let upload_err = |source| ServiceError::Upload {
            path: file_path.to_path_buf(),
            source,
        };

        let file_name = file_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let file_size = tokio::fs::metadata(file_path)
            .await
            .map_err(upload_err)?
            .len();
        let file = File::open(file_path).await.map_err(upload_err)?;

        let stream = FramedRead::new(file, BytesCodec::new());
        let body = reqwest::Body::wrap_stream(stream);

        let package = multipart::Part::stream_with_length(body, file_size)
            .file_name(file_name)
            .mime_str("application/octet-stream")?;
        let package_info =
            multipart::Part::text(serde_json::to_string(info)?).mime_str("application/json")?;

        let form = multipart::Form::new()
            .part("package", package)
            .part("packageInfo", package_info);

        let req = self
            .request(
                Method::POST,
                &["apps", app_id, "deployments", deployment_id, "package"],
            )
            .multipart(form);
        self.send(req, "Package upload").await?;

        Ok(())
    }
}

//! In-memory stand-ins for the collaborators a command talks to.

use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use crate::browser::Browser;
use crate::context::Context;
use crate::error::ServiceError;
use crate::models::access_key::AccessKey;
use crate::models::app::App;
use crate::models::deployment::{Deployment, DeploymentKey, Package, PackageInfo};
use crate::output::Reporter;
use crate::prompt::{Prompt, Response};
use crate::service::{Connector, ReleaseService};
use crate::session::{Session, SessionStore};

pub fn app(id: &str, name: &str) -> App {
    App {
        id: id.into(),
        name: name.into(),
        description: None,
    }
}

pub fn deployment(id: &str, name: &str) -> Deployment {
    Deployment {
        id: id.into(),
        name: name.into(),
        description: None,
        package: None,
    }
}

pub fn package(app_version: &str, is_mandatory: bool, hash: &str) -> Package {
    Package {
        app_version: app_version.into(),
        is_mandatory,
        package_hash: hash.into(),
        description: None,
        label: None,
        size: None,
        blob_url: None,
    }
}

pub fn access_key(id: &str, name: &str) -> AccessKey {
    AccessKey {
        id: id.into(),
        name: name.into(),
        key: format!("secret-{id}"),
    }
}

pub fn session() -> Session {
    Session {
        access_key_name: "8".into(),
        provider_name: "github".into(),
        provider_unique_id: "42".into(),
        server_url: "https://example.test".into(),
    }
}

#[derive(Debug, Clone)]
pub struct Upload {
    pub path: PathBuf,
    pub existed: bool,
    pub info: PackageInfo,
}

#[derive(Default)]
struct State {
    apps: Vec<App>,
    deployments: HashMap<String, Vec<Deployment>>,
    deployment_keys: Vec<DeploymentKey>,
    access_keys: Vec<AccessKey>,
    failing: HashSet<&'static str>,
    calls: Vec<String>,
    uploads: Vec<Upload>,
}

/// A scripted release service that records every call it receives.
#[derive(Clone, Default)]
pub struct FakeService {
    state: Arc<Mutex<State>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_apps(self, apps: Vec<App>) -> Self {
        self.state.lock().unwrap().apps = apps;
        self
    }

    pub fn with_deployments(self, app_id: &str, deployments: Vec<Deployment>) -> Self {
        self.state
            .lock()
            .unwrap()
            .deployments
            .insert(app_id.to_string(), deployments);
        self
    }

    pub fn with_deployment_keys(self, keys: Vec<DeploymentKey>) -> Self {
        self.state.lock().unwrap().deployment_keys = keys;
        self
    }

    pub fn with_access_keys(self, keys: Vec<AccessKey>) -> Self {
        self.state.lock().unwrap().access_keys = keys;
        self
    }

    /// Makes every call to `operation` fail with a rejection.
    pub fn failing(self, operation: &'static str) -> Self {
        self.state.lock().unwrap().failing.insert(operation);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.split(' ').next() == Some(operation))
            .count()
    }

    pub fn apps(&self) -> Vec<App> {
        self.state.lock().unwrap().apps.clone()
    }

    pub fn deployments(&self, app_id: &str) -> Vec<Deployment> {
        self.state
            .lock()
            .unwrap()
            .deployments
            .get(app_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.state.lock().unwrap().uploads.clone()
    }

    fn record(&self, operation: &'static str, args: &[&str]) -> Result<(), ServiceError> {
        let mut state = self.state.lock().unwrap();
        let mut parts = vec![operation];
        parts.extend_from_slice(args);
        state.calls.push(parts.join(" "));

        if state.failing.contains(operation) {
            return Err(ServiceError::Rejected {
                action: operation.to_string(),
                status: 500,
                body: "scripted failure".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ReleaseService for FakeService {
    async fn login_with_access_token(&self, access_token: &str) -> Result<(), ServiceError> {
        self.record("loginWithAccessToken", &[access_token])
    }

    async fn logout(&self) -> Result<(), ServiceError> {
        self.record("logout", &[])
    }

    async fn get_apps(&self) -> Result<Vec<App>, ServiceError> {
        self.record("getApps", &[])?;
        Ok(self.apps())
    }

    async fn add_app(&self, name: &str, _description: Option<&str>) -> Result<App, ServiceError> {
        self.record("addApp", &[name])?;
        let mut state = self.state.lock().unwrap();
        let created = app(&format!("{}", state.apps.len() + 100), name);
        state.apps.push(created.clone());
        Ok(created)
    }

    async fn remove_app(&self, app_id: &str) -> Result<(), ServiceError> {
        self.record("removeApp", &[app_id])?;
        self.state
            .lock()
            .unwrap()
            .apps
            .retain(|app| app.id != app_id);
        Ok(())
    }

    async fn update_app(&self, app: &App) -> Result<(), ServiceError> {
        self.record("updateApp", &[app.id.as_str(), app.name.as_str()])?;
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.apps.iter_mut().find(|a| a.id == app.id) {
            *existing = app.clone();
        }
        Ok(())
    }

    async fn get_deployments(&self, app_id: &str) -> Result<Vec<Deployment>, ServiceError> {
        self.record("getDeployments", &[app_id])?;
        Ok(self.deployments(app_id))
    }

    async fn add_deployment(
        &self,
        app_id: &str,
        name: &str,
        _description: Option<&str>,
    ) -> Result<Deployment, ServiceError> {
        self.record("addDeployment", &[app_id, name])?;
        let mut state = self.state.lock().unwrap();
        let deployments = state.deployments.entry(app_id.to_string()).or_default();
        let created = deployment(&format!("{}", deployments.len() + 100), name);
        deployments.push(created.clone());
        Ok(created)
    }

    async fn remove_deployment(
        &self,
        app_id: &str,
        deployment_id: &str,
    ) -> Result<(), ServiceError> {
        self.record("removeDeployment", &[app_id, deployment_id])?;
        if let Some(deployments) = self.state.lock().unwrap().deployments.get_mut(app_id) {
            deployments.retain(|d| d.id != deployment_id);
        }
        Ok(())
    }

    async fn update_deployment(
        &self,
        app_id: &str,
        deployment: &Deployment,
    ) -> Result<(), ServiceError> {
        self.record(
            "updateDeployment",
            &[app_id, deployment.id.as_str(), deployment.name.as_str()],
        )?;
        if let Some(deployments) = self.state.lock().unwrap().deployments.get_mut(app_id) {
            if let Some(existing) = deployments.iter_mut().find(|d| d.id == deployment.id) {
                *existing = deployment.clone();
            }
        }
        Ok(())
    }

    async fn get_deployment_keys(
        &self,
        app_id: &str,
        deployment_id: &str,
    ) -> Result<Vec<DeploymentKey>, ServiceError> {
        self.record("getDeploymentKeys", &[app_id, deployment_id])?;
        Ok(self.state.lock().unwrap().deployment_keys.clone())
    }

    async fn get_access_keys(&self) -> Result<Vec<AccessKey>, ServiceError> {
        self.record("getAccessKeys", &[])?;
        Ok(self.state.lock().unwrap().access_keys.clone())
    }

    async fn add_access_key(&self, name: &str) -> Result<AccessKey, ServiceError> {
        self.record("addAccessKey", &[name])?;
        let mut state = self.state.lock().unwrap();
        let created = access_key(&format!("{}", state.access_keys.len() + 100), name);
        state.access_keys.push(created.clone());
        Ok(created)
    }

    async fn remove_access_key(&self, access_key_id: &str) -> Result<(), ServiceError> {
        self.record("removeAccessKey", &[access_key_id])?;
        self.state
            .lock()
            .unwrap()
            .access_keys
            .retain(|key| key.id != access_key_id);
        Ok(())
    }

    async fn add_package(
        &self,
        app_id: &str,
        deployment_id: &str,
        file_path: &Path,
        info: &PackageInfo,
    ) -> Result<(), ServiceError> {
        self.state.lock().unwrap().uploads.push(Upload {
            path: file_path.to_path_buf(),
            existed: file_path.exists(),
            info: info.clone(),
        });
        self.record("addPackage", &[app_id, deployment_id])
    }
}

#[derive(Default)]
pub struct FakeConnector {
    pub service: FakeService,
    urls: Mutex<Vec<String>>,
}

impl FakeConnector {
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl Connector for FakeConnector {
    fn connect(&self, server_url: &str) -> Result<Box<dyn ReleaseService>, ServiceError> {
        self.urls.lock().unwrap().push(server_url.to_string());
        Ok(Box::new(self.service.clone()))
    }
}

/// Replays scripted answers in order; running out is a prompt I/O error.
#[derive(Default)]
pub struct FakePrompt {
    answers: Mutex<VecDeque<io::Result<Response>>>,
    asked: Mutex<Vec<String>>,
}

impl FakePrompt {
    pub fn answer(&self, text: &str) {
        self.answers
            .lock()
            .unwrap()
            .push_back(Ok(Response::Answered(text.to_string())));
    }

    pub fn abort(&self) {
        self.answers
            .lock()
            .unwrap()
            .push_back(Ok(Response::Aborted));
    }

    pub fn fail(&self) {
        let error = io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed");
        self.answers.lock().unwrap().push_back(Err(error));
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompt for FakePrompt {
    fn ask(&self, message: &str, default: Option<&str>) -> io::Result<Response> {
        self.asked.lock().unwrap().push(message.to_string());
        match self.answers.lock().unwrap().pop_front() {
            Some(Ok(Response::Answered(text))) if text.is_empty() => {
                let fallback = default.unwrap_or_default().to_string();
                Ok(Response::Answered(fallback))
            }
            Some(answer) => answer,
            None => Err(io::Error::other("no scripted answer")),
        }
    }
}

#[derive(Default)]
pub struct FakeBrowser {
    opened: Mutex<Vec<String>>,
}

impl FakeBrowser {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Browser for FakeBrowser {
    fn open(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

#[derive(Default)]
pub struct CaptureReporter {
    lines: Mutex<Vec<String>>,
}

impl Reporter for CaptureReporter {
    fn line(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }
}

/// Everything one command needs, wired to fakes and a throwaway session file.
pub struct Harness {
    pub dir: TempDir,
    pub store: SessionStore,
    pub connector: FakeConnector,
    pub prompt: FakePrompt,
    pub browser: FakeBrowser,
    pub out: CaptureReporter,
}

impl Harness {
    pub fn new(service: FakeService) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        Self {
            dir,
            store,
            connector: FakeConnector {
                service,
                urls: Mutex::default(),
            },
            prompt: FakePrompt::default(),
            browser: FakeBrowser::default(),
            out: CaptureReporter::default(),
        }
    }

    pub fn logged_in(service: FakeService) -> Self {
        let harness = Self::new(service);
        harness.store.save(&session()).unwrap();
        harness
    }

    pub fn ctx(&self) -> Context<'_> {
        Context {
            store: &self.store,
            connector: &self.connector,
            prompt: &self.prompt,
            browser: &self.browser,
            out: &self.out,
            work_dir: self.dir.path(),
        }
    }

    pub fn service(&self) -> &FakeService {
        &self.connector.service
    }

    pub fn lines(&self) -> Vec<String> {
        self.out.lines.lock().unwrap().clone()
    }
}

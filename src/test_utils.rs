// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: a scripted in-memory resource client and a mock HTTP
//! service for Kubernetes API responses.

use crate::error::{ClientError, ErrorClass};
use crate::reconcile::client::ResourceClient;
use async_trait::async_trait;
use http::{Request, Response};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Service};
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service as TowerService;

/// A remote call as observed by [`ScriptedClient`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Call {
    CreateNamespace(String),
    DeleteDeployment(String, String, u32),
    CreateDeployment(String, String),
    CreateService(String, String),
    CreateConfigObject(String, String),
}

/// Records every call and succeeds unless a failure was scripted for it.
#[derive(Default)]
pub struct ScriptedClient {
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<Call, ErrorClass>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future occurrence of `call` fail with `class`
    pub fn fail(&self, call: Call, class: ErrorClass) {
        self.failures.lock().unwrap().insert(call, class);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ClientError> {
        let failure = self.failures.lock().unwrap().get(&call).copied();
        self.calls.lock().unwrap().push(call.clone());
        match failure {
            Some(class) => Err(ClientError::new(class, format!("scripted failure for {:?}", call))),
            None => Ok(()),
        }
    }
}

fn name_of(meta: &kube::api::ObjectMeta) -> String {
    meta.name.clone().unwrap_or_default()
}

#[async_trait]
impl ResourceClient for ScriptedClient {
    async fn create_namespace(&self, namespace: &Namespace) -> Result<(), ClientError> {
        self.record(Call::CreateNamespace(name_of(&namespace.metadata)))
    }

    async fn delete_deployment(
        &self,
        namespace: &str,
        name: &str,
        grace_period_seconds: u32,
    ) -> Result<(), ClientError> {
        self.record(Call::DeleteDeployment(
            namespace.to_string(),
            name.to_string(),
            grace_period_seconds,
        ))
    }

    async fn create_deployment(&self, namespace: &str, body: &Deployment) -> Result<(), ClientError> {
        self.record(Call::CreateDeployment(namespace.to_string(), name_of(&body.metadata)))
    }

    async fn create_service(&self, namespace: &str, body: &Service) -> Result<(), ClientError> {
        self.record(Call::CreateService(namespace.to_string(), name_of(&body.metadata)))
    }

    async fn create_config_object(&self, namespace: &str, body: &ConfigMap) -> Result<(), ClientError> {
        self.record(Call::CreateConfigObject(namespace.to_string(), name_of(&body.metadata)))
    }
}

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Add a response for PATCH requests matching the exact path
    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    /// Answer the create calls of a full catalog in `namespace`. Deployment
    /// deletes are left unmatched, so they report NotFound.
    pub fn with_catalog_api(self, namespace: &str) -> Self {
        self.on_post("/api/v1/namespaces", 201, &object_json("v1", "Namespace", namespace))
            .on_post(
                &format!("/apis/apps/v1/namespaces/{}/deployments", namespace),
                201,
                &object_json("apps/v1", "Deployment", "created"),
            )
            .on_post(
                &format!("/api/v1/namespaces/{}/services", namespace),
                201,
                &object_json("v1", "Service", "created"),
            )
            .on_post(
                &format!("/api/v1/namespaces/{}/configmaps", namespace),
                201,
                &object_json("v1", "ConfigMap", "created"),
            )
    }

    /// Add a response for DELETE requests matching the exact path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Requests received so far, as (method, path)
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl TowerService<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path.clone()));
        let response = self.responses.lock().unwrap().get(&(method, path.clone())).cloned();

        Box::pin(async move {
            let (status, body) =
                response.unwrap_or_else(|| (404, status_json(404, "NotFound", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// A `Status` response body as returned by the API server
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    let status = if code < 400 { "Success" } else { "Failure" };
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": status,
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// A minimal object body of the given kind
pub fn object_json(api_version: &str, kind: &str, name: &str) -> String {
    serde_json::json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": {
            "name": name,
            "uid": "test-uid"
        }
    })
    .to_string()
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The remote calls the apply engine needs.

use crate::error::ClientError;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Service};

/// Remote resource operations used by [`apply`](crate::reconcile::engine::apply).
///
/// Implemented against the Kubernetes API by
/// [`KubeResourceClient`](crate::kubernetes::KubeResourceClient); tests use an
/// in-memory implementation.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn create_namespace(&self, namespace: &Namespace) -> Result<(), ClientError>;

    async fn delete_deployment(
        &self,
        namespace: &str,
        name: &str,
        grace_period_seconds: u32,
    ) -> Result<(), ClientError>;

    async fn create_deployment(&self, namespace: &str, body: &Deployment) -> Result<(), ClientError>;

    async fn create_service(&self, namespace: &str, body: &Service) -> Result<(), ClientError>;

    async fn create_config_object(&self, namespace: &str, body: &ConfigMap) -> Result<(), ClientError>;
}

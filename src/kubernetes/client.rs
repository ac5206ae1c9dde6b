// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! [`ResourceClient`] backed by the Kubernetes API

use crate::error::ClientError;
use crate::reconcile::client::ResourceClient;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Service};
use kube::{
    api::{DeleteParams, PostParams},
    Api, Client,
};
use tracing::{debug, instrument};

/// Issues plain create/delete calls; error classification happens in
/// [`ClientError`]'s `From<kube::Error>`.
#[derive(Clone)]
pub struct KubeResourceClient {
    client: Client,
}

impl KubeResourceClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceClient for KubeResourceClient {
    #[instrument(skip_all, fields(namespace = ?namespace.metadata.name))]
    async fn create_namespace(&self, namespace: &Namespace) -> Result<(), ClientError> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        namespaces.create(&PostParams::default(), namespace).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_deployment(
        &self,
        namespace: &str,
        name: &str,
        grace_period_seconds: u32,
    ) -> Result<(), ClientError> {
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let dp = DeleteParams {
            grace_period_seconds: Some(grace_period_seconds),
            ..Default::default()
        };
        deployments.delete(name, &dp).await?;
        debug!("Deleted deployment {}/{}", namespace, name);
        Ok(())
    }

    #[instrument(skip(self, body), fields(name = ?body.metadata.name))]
    async fn create_deployment(&self, namespace: &str, body: &Deployment) -> Result<(), ClientError> {
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        deployments.create(&PostParams::default(), body).await?;
        Ok(())
    }

    #[instrument(skip(self, body), fields(name = ?body.metadata.name))]
    async fn create_service(&self, namespace: &str, body: &Service) -> Result<(), ClientError> {
        let services: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        services.create(&PostParams::default(), body).await?;
        Ok(())
    }

    #[instrument(skip(self, body), fields(name = ?body.metadata.name))]
    async fn create_config_object(&self, namespace: &str, body: &ConfigMap) -> Result<(), ClientError> {
        let config_maps: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        config_maps.create(&PostParams::default(), body).await?;
        Ok(())
    }
}

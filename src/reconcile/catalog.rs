// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Desired-state catalog for one Wordpress instance.

use crate::constants::{labels, names, DATABASE_REPLICAS, OPERATOR_NAME};
use crate::error::CatalogError;
use crate::reconcile::descriptor::{ResourceBody, ResourceDescriptor, ResourceKind};
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    ConfigMap, Container, ContainerPort, EnvVar, Namespace, PodSpec, PodTemplateSpec, Service,
    ServicePort, ServiceSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::api::ObjectMeta;
use std::collections::{BTreeMap, HashSet};

/// Ordered list of resources making up one Wordpress stack.
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredStateCatalog {
    entries: Vec<ResourceDescriptor>,
}

impl DesiredStateCatalog {
    /// Validate and wrap an ordered list of descriptors.
    ///
    /// Entries scoped to a namespace that the catalog itself declares must come
    /// after that namespace. Namespaces not declared in the catalog are assumed
    /// to exist already.
    pub fn new(entries: Vec<ResourceDescriptor>) -> Result<Self, CatalogError> {
        let declared: HashSet<&str> = entries
            .iter()
            .filter(|d| d.kind() == ResourceKind::Namespace)
            .map(|d| d.name())
            .collect();

        let mut seen_namespaces = HashSet::new();
        let mut seen = HashSet::new();

        for entry in &entries {
            entry.check_consistency()?;

            let scope = entry.namespace_scope().unwrap_or_default();
            if !seen.insert((scope, entry.kind(), entry.name())) {
                return Err(CatalogError::Duplicate {
                    kind: entry.kind(),
                    name: entry.name().to_string(),
                    namespace: scope.to_string(),
                });
            }

            match entry.namespace_scope() {
                None => {
                    seen_namespaces.insert(entry.name());
                }
                Some(ns) if declared.contains(ns) && !seen_namespaces.contains(ns) => {
                    return Err(CatalogError::NamespaceOrder {
                        kind: entry.kind(),
                        name: entry.name().to_string(),
                        namespace: ns.to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ResourceDescriptor] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Instance parameters the catalog is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogParams {
    pub namespace: String,
    pub database_image: String,
    pub database_name: String,
    pub database_user: String,
    pub database_password: String,
    pub database_root_password: String,
    pub app_image: String,
    /// Replica count of the application deployment
    pub replicas: i32,
    /// Service type of the application service (e.g. `LoadBalancer`).
    pub app_service_type: String,
    pub app_node_port: Option<i32>,
}

impl CatalogParams {
    /// Defaults matching the stock images, with the given credentials.
    pub fn with_credentials(database_password: &str, database_root_password: &str) -> Self {
        Self {
            namespace: names::NAMESPACE.to_string(),
            database_image: "mysql:latest".to_string(),
            database_name: "wordpress".to_string(),
            database_user: "wordpress".to_string(),
            database_password: database_password.to_string(),
            database_root_password: database_root_password.to_string(),
            app_image: "wordpress:latest".to_string(),
            replicas: 1,
            app_service_type: "LoadBalancer".to_string(),
            app_node_port: None,
        }
    }
}

/// Build the catalog: namespace, database deployment, database service,
/// database config map, application deployment, application service.
pub fn build_catalog(params: &CatalogParams) -> Result<DesiredStateCatalog, CatalogError> {
    let ns = params.namespace.as_str();

    let entries = vec![
        ResourceBody::Namespace(namespace(ns)),
        ResourceBody::Deployment(deployment(
            ns,
            names::DATABASE,
            &params.database_image,
            DATABASE_REPLICAS,
            3306,
            vec![
                env("MYSQL_DATABASE", &params.database_name),
                env("MYSQL_USER", &params.database_user),
                env("MYSQL_ROOT_PASSWORD", &params.database_root_password),
                env("MYSQL_PASSWORD", &params.database_password),
            ],
        )),
        ResourceBody::Service(service(
            ns,
            names::DATABASE_SERVICE,
            names::DATABASE,
            "ClusterIP",
            ServicePort {
                name: Some("mysql".to_string()),
                protocol: Some("TCP".to_string()),
                port: 3306,
                target_port: Some(IntOrString::Int(3306)),
                ..Default::default()
            },
        )),
        ResourceBody::ConfigObject(ConfigMap {
            metadata: metadata(Some(ns), names::DATABASE_CONFIG, names::DATABASE),
            data: Some(BTreeMap::from([(
                "database_url".to_string(),
                names::DATABASE_SERVICE.to_string(),
            )])),
            ..Default::default()
        }),
        ResourceBody::Deployment(deployment(
            ns,
            names::APP,
            &params.app_image,
            params.replicas,
            80,
            vec![
                env("WORDPRESS_DB_HOST", names::DATABASE_SERVICE),
                env("WORDPRESS_DB_NAME", &params.database_name),
                env("WORDPRESS_DB_USER", &params.database_user),
                env("WORDPRESS_DB_PASSWORD", &params.database_password),
            ],
        )),
        ResourceBody::Service(service(
            ns,
            names::APP_SERVICE,
            names::APP,
            &params.app_service_type,
            ServicePort {
                name: Some("http".to_string()),
                protocol: Some("TCP".to_string()),
                port: 80,
                target_port: Some(IntOrString::Int(80)),
                node_port: params.app_node_port,
                ..Default::default()
            },
        )),
    ];

    let descriptors = entries
        .into_iter()
        .map(ResourceDescriptor::new)
        .collect::<Result<Vec<_>, _>>()?;

    DesiredStateCatalog::new(descriptors)
}

fn app_labels(app: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(labels::APP.to_string(), app.to_string())])
}

fn metadata(namespace: Option<&str>, name: &str, app: &str) -> ObjectMeta {
    let mut meta_labels = app_labels(app);
    meta_labels.insert(labels::MANAGED_BY.to_string(), OPERATOR_NAME.to_string());
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: namespace.map(str::to_string),
        labels: Some(meta_labels),
        ..Default::default()
    }
}

fn namespace(name: &str) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(BTreeMap::from([(
                labels::MANAGED_BY.to_string(),
                OPERATOR_NAME.to_string(),
            )])),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn env(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.to_string()),
        ..Default::default()
    }
}

fn deployment(
    namespace: &str,
    name: &str,
    image: &str,
    replicas: i32,
    container_port: i32,
    env: Vec<EnvVar>,
) -> Deployment {
    Deployment {
        metadata: metadata(Some(namespace), name, name),
        spec: Some(DeploymentSpec {
            replicas: Some(replicas),
            selector: LabelSelector {
                match_labels: Some(app_labels(name)),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(app_labels(name)),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: name.to_string(),
                        image: Some(image.to_string()),
                        ports: Some(vec![ContainerPort {
                            container_port,
                            ..Default::default()
                        }]),
                        env: Some(env),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn service(namespace: &str, name: &str, app: &str, type_: &str, port: ServicePort) -> Service {
    Service {
        metadata: metadata(Some(namespace), name, app),
        spec: Some(ServiceSpec {
            type_: Some(type_.to_string()),
            selector: Some(app_labels(app)),
            ports: Some(vec![port]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

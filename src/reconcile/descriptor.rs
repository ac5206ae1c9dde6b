// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! A single managed object and its desired body.

use crate::error::CatalogError;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Service};
use kube::ResourceExt;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Namespace,
    Deployment,
    Service,
    ConfigObject,
}

/// Whether later catalog entries depend on an entry of this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Failure aborts the rest of the catalog.
    Prerequisite,
    /// Failure is recorded and the walk continues.
    Leaf,
}

impl ResourceKind {
    pub fn criticality(self) -> Criticality {
        match self {
            ResourceKind::Namespace | ResourceKind::Deployment => Criticality::Prerequisite,
            ResourceKind::Service | ResourceKind::ConfigObject => Criticality::Leaf,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Namespace => "Namespace",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Service => "Service",
            ResourceKind::ConfigObject => "ConfigMap",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceBody {
    Namespace(Namespace),
    Deployment(Deployment),
    Service(Service),
    ConfigObject(ConfigMap),
}

impl ResourceBody {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceBody::Namespace(_) => ResourceKind::Namespace,
            ResourceBody::Deployment(_) => ResourceKind::Deployment,
            ResourceBody::Service(_) => ResourceKind::Service,
            ResourceBody::ConfigObject(_) => ResourceKind::ConfigObject,
        }
    }

    fn name(&self) -> Option<String> {
        match self {
            ResourceBody::Namespace(o) => o.metadata.name.clone(),
            ResourceBody::Deployment(o) => o.metadata.name.clone(),
            ResourceBody::Service(o) => o.metadata.name.clone(),
            ResourceBody::ConfigObject(o) => o.metadata.name.clone(),
        }
    }
}

/// One entry of a desired-state catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDescriptor {
    name: String,
    namespace_scope: Option<String>,
    body: ResourceBody,
}

impl ResourceDescriptor {
    /// Build a descriptor from a typed body. The namespace is taken from the
    /// body's metadata for namespaced kinds and ignored for namespaces.
    pub fn new(body: ResourceBody) -> Result<Self, CatalogError> {
        let kind = body.kind();
        let name = body.name().ok_or(CatalogError::MissingName(kind))?;
        let namespace_scope = match &body {
            ResourceBody::Namespace(_) => None,
            ResourceBody::Deployment(o) => o.namespace(),
            ResourceBody::Service(o) => o.namespace(),
            ResourceBody::ConfigObject(o) => o.namespace(),
        };
        if kind != ResourceKind::Namespace && namespace_scope.is_none() {
            return Err(CatalogError::MissingNamespace { kind, name });
        }
        Ok(Self {
            name,
            namespace_scope,
            body,
        })
    }

    pub fn kind(&self) -> ResourceKind {
        self.body.kind()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace_scope(&self) -> Option<&str> {
        self.namespace_scope.as_deref()
    }

    pub fn body(&self) -> &ResourceBody {
        &self.body
    }

    /// Deployment selector labels must all appear on the pod template.
    pub(crate) fn check_consistency(&self) -> Result<(), CatalogError> {
        let ResourceBody::Deployment(deployment) = &self.body else {
            return Ok(());
        };
        let Some(spec) = deployment.spec.as_ref() else {
            return Err(CatalogError::SelectorMismatch(self.name.clone()));
        };
        let selector = spec.selector.match_labels.clone().unwrap_or_default();
        let template_labels = spec
            .template
            .metadata
            .as_ref()
            .and_then(|m| m.labels.clone())
            .unwrap_or_default();

        let matches = !selector.is_empty()
            && selector
                .iter()
                .all(|(k, v)| template_labels.get(k) == Some(v));
        if matches {
            Ok(())
        } else {
            Err(CatalogError::SelectorMismatch(self.name.clone()))
        }
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace_scope {
            Some(ns) => write!(f, "{} {}/{}", self.kind(), ns, self.name),
            None => write!(f, "{} {}", self.kind(), self.name),
        }
    }
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::fmt;
use thiserror::Error;

use crate::reconcile::descriptor::ResourceKind;

#[derive(Error, Debug)]
pub enum OperatorError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Invalid catalog: {0}")]
    CatalogError(#[from] CatalogError),

    #[error("Prerequisite {kind} '{name}' failed: {cause}")]
    PrerequisiteFailure {
        kind: ResourceKind,
        name: String,
        cause: String,
    },
}

pub type Result<T> = std::result::Result<T, OperatorError>;

/// Catalog authoring mistakes, detected when a catalog is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{kind} '{name}' has no namespace")]
    MissingNamespace { kind: ResourceKind, name: String },

    #[error("{kind} '{name}' appears more than once in namespace '{namespace}'")]
    Duplicate {
        kind: ResourceKind,
        name: String,
        namespace: String,
    },

    #[error("{kind} '{name}' is scoped to namespace '{namespace}' which is declared later")]
    NamespaceOrder {
        kind: ResourceKind,
        name: String,
        namespace: String,
    },

    #[error("Deployment '{0}' selector does not match its pod template labels")]
    SelectorMismatch(String),

    #[error("Resource of kind {0} has no name")]
    MissingName(ResourceKind),
}

/// Classification of a failed remote call, used by the apply engine to decide
/// whether a step is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    AlreadyExists,
    Conflict,
    Invalid,
    Unauthorized,
    Transport,
    Other,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorClass::NotFound => "NotFound",
            ErrorClass::AlreadyExists => "AlreadyExists",
            ErrorClass::Conflict => "Conflict",
            ErrorClass::Invalid => "Invalid",
            ErrorClass::Unauthorized => "Unauthorized",
            ErrorClass::Transport => "Transport",
            ErrorClass::Other => "Other",
        };
        f.write_str(s)
    }
}

/// Error returned by a [`ResourceClient`](crate::reconcile::client::ResourceClient) call.
#[derive(Error, Debug)]
#[error("{class}: {message}")]
pub struct ClientError {
    class: ErrorClass,
    message: String,
    #[source]
    source: Option<kube::Error>,
}

impl ClientError {
    pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
            source: None,
        }
    }

    pub fn classify(&self) -> ErrorClass {
        self.class
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<kube::Error> for ClientError {
    fn from(err: kube::Error) -> Self {
        let (class, message) = match &err {
            kube::Error::Api(resp) => (classify_status(resp.code, &resp.reason), resp.message.clone()),
            kube::Error::HyperError(e) => (ErrorClass::Transport, e.to_string()),
            kube::Error::Service(e) => (ErrorClass::Transport, e.to_string()),
            kube::Error::Auth(e) => (ErrorClass::Unauthorized, e.to_string()),
            other => (ErrorClass::Other, other.to_string()),
        };
        Self {
            class,
            message,
            source: Some(err),
        }
    }
}

/// Map an API status code (and reason, for 409) to an [`ErrorClass`].
pub fn classify_status(code: u16, reason: &str) -> ErrorClass {
    match code {
        404 => ErrorClass::NotFound,
        409 if reason == "AlreadyExists" => ErrorClass::AlreadyExists,
        409 => ErrorClass::Conflict,
        400 | 422 => ErrorClass::Invalid,
        401 | 403 => ErrorClass::Unauthorized,
        _ => ErrorClass::Other,
    }
}

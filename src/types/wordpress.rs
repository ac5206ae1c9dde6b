// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// A Wordpress site. Creating one provisions the database and application
/// stack configured for the operator; the spec carries no fields yet.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "example.com", version = "v1", kind = "Wordpress", plural = "wordpress")]
#[kube(namespaced)]
#[kube(status = "WordpressStatus")]
#[serde(rename_all = "camelCase")]
pub struct WordpressSpec {}

impl Wordpress {
    /// Whether a previous reconciliation already brought this resource up
    pub fn is_reconciled(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.reconciled)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordpressStatus {
    pub reconciled: bool,
    /// `Kind name: status` per applied resource
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applied: Vec<String>,
    /// Non-fatal failures of the last run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

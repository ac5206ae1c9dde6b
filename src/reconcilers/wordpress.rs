// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Wordpress reconciler - applies the desired-state catalog when a Wordpress
//! resource is created and records the outcome in its status.

use crate::config::Config;
use crate::constants::ERROR_REQUEUE_SECS;
use crate::error::{OperatorError, Result};
use crate::kubernetes::KubeResourceClient;
use crate::reconcile::{apply, build_catalog, ReconciliationOutcome};
use crate::types::wordpress::{Wordpress, WordpressStatus};
use futures::StreamExt;
use kube::{
    api::{Patch, PatchParams},
    runtime::{controller::Action, Controller},
    Api, Client, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

pub struct WordpressReconciler {
    client: Client,
    config: Config,
    /// Statuses of successful runs whose write failed, keyed by namespace/name
    pending_status: Mutex<HashMap<String, WordpressStatus>>,
}

impl WordpressReconciler {
    pub fn new(client: Client, config: Config) -> Self {
        Self {
            client,
            config,
            pending_status: Mutex::new(HashMap::new()),
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let wordpresses: Api<Wordpress> = Api::all(self.client.clone());
        let context = Arc::new(self);

        Controller::new(wordpresses, WatcherConfig::default())
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled wordpress: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

#[instrument(skip(wordpress, ctx), fields(wordpress = %format!("{}/{}", wordpress.namespace().unwrap_or_default(), wordpress.name_any())))]
async fn reconcile(wordpress: Arc<Wordpress>, ctx: Arc<WordpressReconciler>) -> Result<Action> {
    let key = format!("{}/{}", wordpress.namespace().unwrap_or_default(), wordpress.name_any());

    // Only a resource that has never been brought up counts as a creation
    if wordpress.is_reconciled() {
        debug!("Already reconciled, waiting for changes");
        ctx.pending_status.lock().await.remove(&key);
        return Ok(Action::await_change());
    }

    // The stack is already up; only the status write is outstanding
    let pending = ctx.pending_status.lock().await.get(&key).cloned();
    if let Some(status) = pending {
        info!("Retrying status write of the previous reconciliation");
        patch_status(&ctx.client, &wordpress, &status).await?;
        ctx.pending_status.lock().await.remove(&key);
        return Ok(Action::await_change());
    }

    info!("Wordpress created, applying desired state");

    let catalog = build_catalog(&ctx.config.catalog)?;
    let client = KubeResourceClient::new(ctx.client.clone());
    let outcome = apply(&catalog, &client).await;

    let status = status_from_outcome(&outcome);
    if let Err(e) = patch_status(&ctx.client, &wordpress, &status).await {
        if outcome.is_success() {
            error!("Failed to record status, will retry the write: {}", e);
            ctx.pending_status.lock().await.insert(key, status);
            return Err(e);
        }
        // A failed run is re-applied anyway
        warn!("Failed to record status: {}", e);
    }

    outcome.into_result()?;
    Ok(Action::await_change())
}

async fn patch_status(client: &Client, wordpress: &Wordpress, status: &WordpressStatus) -> Result<()> {
    let namespace = wordpress.namespace().unwrap_or_default();
    let api: Api<Wordpress> = Api::namespaced(client.clone(), &namespace);
    let patch = json!({ "status": status });

    api.patch_status(&wordpress.name_any(), &PatchParams::default(), &Patch::Merge(&patch))
        .await?;
    Ok(())
}

/// Summarise an outcome for the resource status
pub fn status_from_outcome(outcome: &ReconciliationOutcome) -> WordpressStatus {
    WordpressStatus {
        reconciled: outcome.is_success(),
        applied: outcome
            .applied
            .iter()
            .map(|a| format!("{} {}: {}", a.descriptor.kind(), a.descriptor.name(), a.status))
            .collect(),
        degraded: outcome.degraded.iter().map(|f| f.to_string()).collect(),
        message: outcome.failure.as_ref().map(|f| f.to_string()),
    }
}

fn error_policy(
    _wordpress: Arc<Wordpress>,
    error: &OperatorError,
    _ctx: Arc<WordpressReconciler>,
) -> Action {
    error!("Reconciliation error: {}", error);
    Action::requeue(Duration::from_secs(ERROR_REQUEUE_SECS))
}

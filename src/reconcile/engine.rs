// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Walks a catalog and applies each entry through a [`ResourceClient`].

use crate::constants::DELETE_GRACE_PERIOD_SECONDS;
use crate::error::{ClientError, ErrorClass};
use crate::reconcile::catalog::DesiredStateCatalog;
use crate::reconcile::client::ResourceClient;
use crate::reconcile::descriptor::{Criticality, ResourceBody, ResourceDescriptor};
use crate::reconcile::outcome::{AppliedResource, ApplyStatus, ReconciliationOutcome, Step, StepFailure};
use tracing::{error, info, instrument, warn};

/// Apply every catalog entry in order.
///
/// Namespace and Deployment failures abort the run; Service and ConfigMap
/// failures are recorded in `degraded` and the walk continues. Nothing is
/// retried.
#[instrument(skip_all, fields(entries = catalog.len()))]
pub async fn apply<C>(catalog: &DesiredStateCatalog, client: &C) -> ReconciliationOutcome
where
    C: ResourceClient + ?Sized,
{
    let mut outcome = ReconciliationOutcome::default();

    for descriptor in catalog.iter() {
        match apply_one(descriptor, client).await {
            Ok(status) => {
                info!("{}: {}", descriptor, status);
                outcome.applied.push(AppliedResource {
                    descriptor: descriptor.clone(),
                    status,
                });
            }
            Err((step, cause)) => {
                let failure = StepFailure {
                    descriptor: descriptor.clone(),
                    step,
                    cause,
                };
                match descriptor.kind().criticality() {
                    Criticality::Prerequisite => {
                        error!("Aborting reconciliation, {}", failure);
                        outcome.failure = Some(failure);
                        break;
                    }
                    Criticality::Leaf => {
                        warn!("Continuing after {}", failure);
                        outcome.degraded.push(failure);
                    }
                }
            }
        }
    }

    info!("Reconciliation finished: {}", outcome.summary());
    outcome
}

async fn apply_one<C>(
    descriptor: &ResourceDescriptor,
    client: &C,
) -> Result<ApplyStatus, (Step, ClientError)>
where
    C: ResourceClient + ?Sized,
{
    let namespace = descriptor.namespace_scope().unwrap_or_default();

    match descriptor.body() {
        ResourceBody::Namespace(body) => match client.create_namespace(body).await {
            Ok(()) => Ok(ApplyStatus::Created),
            Err(e) if e.classify() == ErrorClass::AlreadyExists => {
                info!("Namespace {} already exists", descriptor.name());
                Ok(ApplyStatus::Created)
            }
            Err(e) => Err((Step::Create, e)),
        },
        ResourceBody::Deployment(body) => {
            let status = match client
                .delete_deployment(namespace, descriptor.name(), DELETE_GRACE_PERIOD_SECONDS)
                .await
            {
                Ok(()) => ApplyStatus::Created,
                Err(e) if e.classify() == ErrorClass::NotFound => ApplyStatus::SkippedNotFoundOnDelete,
                Err(e) => return Err((Step::Delete, e)),
            };
            client
                .create_deployment(namespace, body)
                .await
                .map_err(|e| (Step::Create, e))?;
            Ok(status)
        }
        ResourceBody::Service(body) => client
            .create_service(namespace, body)
            .await
            .map(|()| ApplyStatus::Created)
            .map_err(|e| (Step::Create, e)),
        ResourceBody::ConfigObject(body) => client
            .create_config_object(namespace, body)
            .await
            .map(|()| ApplyStatus::Created)
            .map_err(|e| (Step::Create, e)),
    }
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Desired-state catalog and the engine that applies it.

pub mod catalog;
pub mod client;
pub mod descriptor;
pub mod engine;
pub mod outcome;

pub use catalog::{build_catalog, CatalogParams, DesiredStateCatalog};
pub use client::ResourceClient;
pub use descriptor::{Criticality, ResourceBody, ResourceDescriptor, ResourceKind};
pub use engine::apply;
pub use outcome::{AppliedResource, ApplyStatus, ReconciliationOutcome, Step, StepFailure};

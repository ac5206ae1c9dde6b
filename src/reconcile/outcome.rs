// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Result of one apply run.

use crate::error::{ClientError, OperatorError};
use crate::reconcile::descriptor::ResourceDescriptor;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStatus {
    Created,
    /// The cleanup delete found no prior deployment.
    SkippedNotFoundOnDelete,
}

impl fmt::Display for ApplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApplyStatus::Created => "created",
            ApplyStatus::SkippedNotFoundOnDelete => "skipped-not-found-on-delete",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppliedResource {
    pub descriptor: ResourceDescriptor,
    pub status: ApplyStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Delete,
    Create,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Delete => f.write_str("delete"),
            Step::Create => f.write_str("create"),
        }
    }
}

#[derive(Debug)]
pub struct StepFailure {
    pub descriptor: ResourceDescriptor,
    pub step: Step,
    pub cause: ClientError,
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} failed: {}", self.step, self.descriptor, self.cause)
    }
}

#[derive(Debug, Default)]
pub struct ReconciliationOutcome {
    /// Entries that reached their desired state, in catalog order.
    pub applied: Vec<AppliedResource>,
    /// Non-fatal failures of leaf entries.
    pub degraded: Vec<StepFailure>,
    /// The failure that aborted the run, if any.
    pub failure: Option<StepFailure>,
}

impl ReconciliationOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} applied, {} degraded",
            self.applied.len(),
            self.degraded.len()
        );
        if let Some(failure) = &self.failure {
            summary.push_str(&format!(", aborted: {}", failure));
        }
        summary
    }

    /// Convert a fatal outcome into an error for the caller.
    pub fn into_result(mut self) -> Result<Self, OperatorError> {
        match self.failure.take() {
            Some(failure) => Err(OperatorError::PrerequisiteFailure {
                kind: failure.descriptor.kind(),
                name: failure.descriptor.name().to_string(),
                cause: failure.cause.to_string(),
            }),
            None => Ok(self),
        }
    }
}

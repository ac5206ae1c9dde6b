// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The operator name, used as field manager and `managed-by` label value
pub const OPERATOR_NAME: &str = "wordpress-operator";

/// Grace period passed when deleting a stale deployment before re-creating it
pub const DELETE_GRACE_PERIOD_SECONDS: u32 = 0;

/// The database has no shared storage, so it never runs more than one pod
pub const DATABASE_REPLICAS: i32 = 1;

/// Label keys set on managed resources
pub mod labels {
    pub const APP: &str = "app";
    pub const MANAGED_BY: &str = "app.kubernetes.io/managed-by";
}

/// Names of the managed resources
pub mod names {
    pub const NAMESPACE: &str = "wordpress-namespace";
    pub const DATABASE: &str = "mysql";
    pub const DATABASE_SERVICE: &str = "mysql-service";
    pub const DATABASE_CONFIG: &str = "mysql-configmap";
    pub const APP: &str = "wordpress";
    pub const APP_SERVICE: &str = "wordpress-external";
}

/// CRD polling configuration
pub mod crd {
    pub const GROUP: &str = "example.com";
    pub const VERSION: &str = "v1";
    pub const KIND: &str = "Wordpress";
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}

/// Requeue delay after a reconciliation aborted on a prerequisite failure
pub const ERROR_REQUEUE_SECS: u64 = 60;

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::names;
use crate::reconcile::CatalogParams;
use anyhow::{Context, Result};
use std::env;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Parameters every Wordpress catalog is built from
    pub catalog: CatalogParams,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // Credentials come from the deployment's secret, never from defaults
        let database_password = lookup("WORDPRESS_DB_PASSWORD")
            .context("WORDPRESS_DB_PASSWORD environment variable not set")?;
        let database_root_password = lookup("MYSQL_ROOT_PASSWORD")
            .context("MYSQL_ROOT_PASSWORD environment variable not set")?;

        let replicas = or("WORDPRESS_REPLICAS", "1")
            .parse()
            .context("WORDPRESS_REPLICAS must be an integer")?;
        let app_node_port = lookup("WORDPRESS_NODE_PORT")
            .map(|p| p.parse())
            .transpose()
            .context("WORDPRESS_NODE_PORT must be an integer")?;

        Ok(Config {
            catalog: CatalogParams {
                namespace: or("WORDPRESS_NAMESPACE", names::NAMESPACE),
                database_image: or("MYSQL_IMAGE", "mysql:latest"),
                database_name: or("WORDPRESS_DB_NAME", "wordpress"),
                database_user: or("WORDPRESS_DB_USER", "wordpress"),
                database_password,
                database_root_password,
                app_image: or("WORDPRESS_IMAGE", "wordpress:latest"),
                replicas,
                app_service_type: or("WORDPRESS_SERVICE_TYPE", "LoadBalancer"),
                app_node_port,
            },
        })
    }
}

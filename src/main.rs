// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::{info, warn};

use wordpress_operator::config::Config;
use wordpress_operator::kubernetes::wait_for_wordpress_crd;
use wordpress_operator::reconcilers::WordpressReconciler;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting Wordpress operator");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: namespace={}, database_image={}, app_image={}",
        config.catalog.namespace, config.catalog.database_image, config.catalog.app_image
    );

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for Wordpress CRD to become available...");
    wait_for_wordpress_crd(&client).await?;

    WordpressReconciler::new(client, config).run().await?;

    // The controller only returns when its watch stream ends
    warn!("Wordpress reconciler stopped unexpectedly");
    Ok(())
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for CRD discovery and the API-backed resource client.

pub mod client;
pub mod crd;

pub use client::KubeResourceClient;
pub use crd::wait_for_wordpress_crd;

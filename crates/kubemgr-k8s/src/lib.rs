//! Kubernetes client for kubemgr
//!
//! This crate provides the cluster adapter: one async call per resource kind
//! and verb, with API failures classified into [`ClusterError`]. Callers
//! depend on the [`ClusterApi`] trait so the dispatcher can run against an
//! in-memory backend in tests.

mod client;
mod error;
pub mod kubeconfig;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service};

pub use client::{ConnectOptions, KubeClient};
pub use error::ClusterError;

/// Namespace used when the caller does not name one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Read and write calls against a cluster
///
/// Each method is a single request. Scaling is split into
/// [`ClusterApi::get_deployment`] and [`ClusterApi::update_deployment_replicas`]
/// so the caller can tell a failed lookup from a failed update.
/// Nothing is retried and no partial results are returned.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    async fn list_nodes(&self) -> Result<Vec<Node>, ClusterError>;

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, ClusterError>;

    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>, ClusterError>;

    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Deployment, ClusterError>;

    /// Set `spec.replicas` on a fetched deployment and replace it
    ///
    /// The replace carries the fetched `resourceVersion`, so a concurrent
    /// edit fails with [`ClusterError::Conflict`].
    async fn update_deployment_replicas(
        &self,
        namespace: &str,
        deployment: Deployment,
        replicas: i32,
    ) -> Result<Deployment, ClusterError>;

    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>, ClusterError>;

    async fn list_namespaces(&self) -> Result<Vec<Namespace>, ClusterError>;

    /// Last `tail_lines` lines of a pod's log
    async fn get_pod_logs(
        &self,
        namespace: &str,
        name: &str,
        tail_lines: i64,
    ) -> Result<String, ClusterError>;
}

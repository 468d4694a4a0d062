//! Kubernetes client for kubemgr

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service};
use kube::{Api, ResourceExt};
use kube::api::{ListParams, LogParams, PostParams};
use kube::config::KubeConfigOptions;

use crate::{ClusterApi, ClusterError, kubeconfig};

/// How to reach the cluster
#[derive(Clone, Debug, Default)]
pub struct ConnectOptions {
    /// Explicit kubeconfig path; overrides `KUBECONFIG`
    pub kubeconfig: Option<PathBuf>,
    /// Context name; the kubeconfig's current-context when unset
    pub context: Option<String>,
    /// Connect and read timeout for every request
    pub timeout: Option<Duration>,
}

/// Kubernetes client wrapper
pub struct KubeClient {
    client: kube::Client,
}

impl KubeClient {
    /// Load the kubeconfig and build a client for the selected context
    pub async fn connect(options: &ConnectOptions) -> Result<Self, ClusterError> {
        let env_value = std::env::var_os(kubeconfig::KUBECONFIG_ENV);
        let home = dirs::home_dir();
        let paths = kubeconfig::kubeconfig_paths(
            options.kubeconfig.as_deref(),
            env_value.as_deref(),
            home.as_deref(),
        )?;
        let kubeconfig = kubeconfig::load(&paths)?;

        let mut config = kube::Config::from_custom_kubeconfig(
            kubeconfig,
            &KubeConfigOptions {
                context: options.context.clone(),
                ..Default::default()
            },
        )
        .await
        .map_err(ClusterError::Context)?;

        if let Some(timeout) = options.timeout {
            config.connect_timeout = Some(timeout);
            config.read_timeout = Some(timeout);
        }

        tracing::debug!(cluster = %config.cluster_url, "connecting");
        let client = kube::Client::try_from(config).map_err(ClusterError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ClusterApi for KubeClient {
    async fn list_nodes(&self) -> Result<Vec<Node>, ClusterError> {
        tracing::debug!("listing nodes");
        let nodes: Api<Node> = Api::all(self.client.clone());
        let list = nodes.list(&ListParams::default()).await?;
        Ok(list.items)
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, ClusterError> {
        tracing::debug!(namespace, "listing pods");
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = pods.list(&ListParams::default()).await?;
        Ok(list.items)
    }

    async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>, ClusterError> {
        tracing::debug!(namespace, "listing deployments");
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let list = deployments.list(&ListParams::default()).await?;
        Ok(list.items)
    }

    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<Deployment, ClusterError> {
        tracing::debug!(namespace, name, "getting deployment");
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        Ok(deployments.get(name).await?)
    }

    async fn update_deployment_replicas(
        &self,
        namespace: &str,
        mut deployment: Deployment,
        replicas: i32,
    ) -> Result<Deployment, ClusterError> {
        let name = deployment.name_any();
        deployment.spec.get_or_insert_with(Default::default).replicas = Some(replicas);

        tracing::info!(namespace, name = %name, replicas, "updating deployment replicas");
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        Ok(deployments
            .replace(&name, &PostParams::default(), &deployment)
            .await?)
    }

    async fn list_services(&self, namespace: &str) -> Result<Vec<Service>, ClusterError> {
        tracing::debug!(namespace, "listing services");
        let services: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        let list = services.list(&ListParams::default()).await?;
        Ok(list.items)
    }

    async fn list_namespaces(&self) -> Result<Vec<Namespace>, ClusterError> {
        tracing::debug!("listing namespaces");
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let list = namespaces.list(&ListParams::default()).await?;
        Ok(list.items)
    }

    async fn get_pod_logs(
        &self,
        namespace: &str,
        name: &str,
        tail_lines: i64,
    ) -> Result<String, ClusterError> {
        tracing::debug!(namespace, name, tail_lines, "fetching pod logs");
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let params = LogParams {
            tail_lines: Some(tail_lines),
            ..Default::default()
        };
        Ok(pods.logs(name, &params).await?)
    }
}

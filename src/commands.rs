//! Command dispatch: one cluster call, then formatting, per invocation

use std::io::Write;

use chrono::{DateTime, Utc};
use kubemgr_format::{self as format, Table};
use kubemgr_k8s::{ClusterApi, ClusterError};
use serde::Serialize;
use thiserror::Error;

use crate::cli::{Command, OutputFormat};
use crate::config::Settings;
use crate::validate;

/// Why a command produced no output
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to {action}: {source}")]
    Cluster {
        action: &'static str,
        #[source]
        source: ClusterError,
    },

    #[error("invalid replica count '{value}': {reason}")]
    InvalidReplicas { value: String, reason: String },

    #[error("invalid {kind} name '{value}': {reason}")]
    InvalidName {
        kind: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// API failures are reported but do not fail the process; bad
    /// arguments exit like a usage error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Cluster { .. } => 0,
            Self::InvalidReplicas { .. } | Self::InvalidName { .. } => 2,
            Self::Output(_) | Self::Json(_) => 1,
        }
    }
}

fn cluster_err(action: &'static str) -> impl FnOnce(ClusterError) -> CommandError {
    move |source| CommandError::Cluster { action, source }
}

/// Run one command against the cluster, writing its output to `out`
///
/// Nothing is written unless the cluster call succeeds, so a failed list
/// never leaves a bare table header behind.
pub async fn run<C, W>(
    cluster: &C,
    command: &Command,
    settings: &Settings,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<(), CommandError>
where
    C: ClusterApi + ?Sized,
    W: Write,
{
    let namespace = |arg: &Option<String>| -> Result<String, CommandError> {
        let ns = arg.as_deref().unwrap_or(&settings.default_namespace);
        validate::namespace(ns).map(str::to_string)
    };

    match command {
        Command::Nodes => {
            let nodes = cluster
                .list_nodes()
                .await
                .map_err(cluster_err("get nodes"))?;
            let views: Vec<_> = nodes.iter().map(|n| format::node_view(n, now)).collect();
            emit(out, settings.output, &views, format::nodes_table)
        }
        Command::Pods { namespace: ns } => {
            let ns = namespace(ns)?;
            let pods = cluster
                .list_pods(&ns)
                .await
                .map_err(cluster_err("get pods"))?;
            let views: Vec<_> = pods.iter().map(|p| format::pod_view(p, now)).collect();
            emit(out, settings.output, &views, format::pods_table)
        }
        Command::Deploy { namespace: ns } => {
            let ns = namespace(ns)?;
            let deployments = cluster
                .list_deployments(&ns)
                .await
                .map_err(cluster_err("get deployments"))?;
            let views: Vec<_> = deployments
                .iter()
                .map(|d| format::deployment_view(d, now))
                .collect();
            emit(out, settings.output, &views, format::deployments_table)
        }
        Command::Scale {
            deployment,
            replicas,
            namespace: ns,
        } => {
            let name = validate::object_name("deployment", deployment)?;
            let replicas = validate::replicas(replicas)?;
            let ns = namespace(ns)?;

            let deploy = cluster
                .get_deployment(&ns, name)
                .await
                .map_err(cluster_err("get deployment"))?;
            cluster
                .update_deployment_replicas(&ns, deploy, replicas)
                .await
                .map_err(cluster_err("scale deployment"))?;

            writeln!(out, "✓ Scaled deployment {name} to {replicas} replicas")?;
            Ok(())
        }
        Command::Logs {
            pod,
            namespace: ns,
            tail,
        } => {
            let name = validate::object_name("pod", pod)?;
            let ns = namespace(ns)?;
            let tail_lines = tail.unwrap_or(settings.tail_lines);

            let logs = cluster
                .get_pod_logs(&ns, name, tail_lines)
                .await
                .map_err(cluster_err("get logs"))?;

            writeln!(out, "{logs}")?;
            Ok(())
        }
        Command::Svc { namespace: ns } => {
            let ns = namespace(ns)?;
            let services = cluster
                .list_services(&ns)
                .await
                .map_err(cluster_err("get services"))?;
            let views: Vec<_> = services.iter().map(format::service_view).collect();
            emit(out, settings.output, &views, format::services_table)
        }
        Command::Ns => {
            let namespaces = cluster
                .list_namespaces()
                .await
                .map_err(cluster_err("get namespaces"))?;
            let views: Vec<_> = namespaces.iter().map(format::namespace_view).collect();
            emit(out, settings.output, &views, format::namespaces_table)
        }
    }
}

fn emit<T, W>(
    out: &mut W,
    output: OutputFormat,
    views: &[T],
    table: fn(&[T]) -> Table,
) -> Result<(), CommandError>
where
    T: Serialize,
    W: Write,
{
    match output {
        OutputFormat::Table => write!(out, "{}", table(views))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, views)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use k8s_openapi::api::apps::v1::Deployment;
    use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service};
    use kube::core::ErrorResponse;
    use parking_lot::Mutex;
    use serde_json::json;

    /// In-memory cluster that records every call it receives
    #[derive(Default)]
    struct FakeCluster {
        nodes: Vec<Node>,
        pods: Vec<Pod>,
        deployments: Vec<Deployment>,
        services: Vec<Service>,
        namespaces: Vec<Namespace>,
        logs: String,
        fail_with: Option<u16>,
        fail_update_with: Option<u16>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeCluster {
        fn failing(code: u16) -> Self {
            Self {
                fail_with: Some(code),
                ..Default::default()
            }
        }

        fn record(&self, call: String) -> Result<(), ClusterError> {
            self.calls.lock().push(call);
            Self::status(self.fail_with)
        }

        fn status(fail_with: Option<u16>) -> Result<(), ClusterError> {
            match fail_with {
                Some(code) => Err(ClusterError::from(kube::Error::Api(ErrorResponse {
                    status: "Failure".to_string(),
                    message: format!("request failed with {code}"),
                    reason: "Failure".to_string(),
                    code,
                }))),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl ClusterApi for FakeCluster {
        async fn list_nodes(&self) -> Result<Vec<Node>, ClusterError> {
            self.record("list_nodes".to_string())?;
            Ok(self.nodes.clone())
        }

        async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, ClusterError> {
            self.record(format!("list_pods {namespace}"))?;
            Ok(self.pods.clone())
        }

        async fn list_deployments(&self, namespace: &str) -> Result<Vec<Deployment>, ClusterError> {
            self.record(format!("list_deployments {namespace}"))?;
            Ok(self.deployments.clone())
        }

        async fn get_deployment(
            &self,
            namespace: &str,
            name: &str,
        ) -> Result<Deployment, ClusterError> {
            self.record(format!("get_deployment {namespace}/{name}"))?;
            self.deployments
                .iter()
                .find(|d| d.metadata.name.as_deref() == Some(name))
                .cloned()
                .ok_or_else(|| ClusterError::NotFound(format!("deployment {name} not found")))
        }

        async fn update_deployment_replicas(
            &self,
            namespace: &str,
            mut deployment: Deployment,
            replicas: i32,
        ) -> Result<Deployment, ClusterError> {
            let name = deployment.metadata.name.clone().unwrap_or_default();
            self.record(format!("update_replicas {namespace}/{name}={replicas}"))?;
            Self::status(self.fail_update_with)?;
            deployment.spec.get_or_insert_with(Default::default).replicas = Some(replicas);
            Ok(deployment)
        }

        async fn list_services(&self, namespace: &str) -> Result<Vec<Service>, ClusterError> {
            self.record(format!("list_services {namespace}"))?;
            Ok(self.services.clone())
        }

        async fn list_namespaces(&self) -> Result<Vec<Namespace>, ClusterError> {
            self.record("list_namespaces".to_string())?;
            Ok(self.namespaces.clone())
        }

        async fn get_pod_logs(
            &self,
            namespace: &str,
            name: &str,
            tail_lines: i64,
        ) -> Result<String, ClusterError> {
            self.record(format!("get_pod_logs {namespace}/{name} tail={tail_lines}"))?;
            Ok(self.logs.clone())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    async fn run_to_string(
        cluster: &FakeCluster,
        command: Command,
        settings: &Settings,
    ) -> (Result<(), CommandError>, String) {
        let mut out = Vec::new();
        let result = run(cluster, &command, settings, now(), &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    fn deployment(name: &str) -> Deployment {
        serde_json::from_value(json!({
            "metadata": {"name": name, "creationTimestamp": "2024-05-01T10:00:00Z"},
            "spec": {"replicas": 1, "selector": {}, "template": {}},
            "status": {"replicas": 1, "readyReplicas": 1, "updatedReplicas": 1, "availableReplicas": 1}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_pods_default_namespace() {
        let cluster = FakeCluster::default();
        let (result, _) =
            run_to_string(&cluster, Command::Pods { namespace: None }, &Settings::default()).await;
        result.unwrap();
        assert_eq!(cluster.calls(), vec!["list_pods default"]);
    }

    #[tokio::test]
    async fn test_pods_explicit_namespace() {
        let cluster = FakeCluster::default();
        let command = Command::Pods {
            namespace: Some("kube-system".to_string()),
        };
        let (result, _) = run_to_string(&cluster, command, &Settings::default()).await;
        result.unwrap();
        assert_eq!(cluster.calls(), vec!["list_pods kube-system"]);
    }

    #[tokio::test]
    async fn test_configured_default_namespace() {
        let cluster = FakeCluster::default();
        let settings = Settings {
            default_namespace: "apps".to_string(),
            ..Settings::default()
        };
        let (result, _) = run_to_string(&cluster, Command::Svc { namespace: None }, &settings).await;
        result.unwrap();
        assert_eq!(cluster.calls(), vec!["list_services apps"]);
    }

    #[tokio::test]
    async fn test_failed_list_prints_nothing() {
        let cluster = FakeCluster::failing(403);
        let (result, out) = run_to_string(&cluster, Command::Nodes, &Settings::default()).await;

        let err = result.unwrap_err();
        assert!(out.is_empty());
        assert_eq!(err.to_string(), "Failed to get nodes: request failed with 403");
        assert_eq!(err.exit_code(), 0);
        assert!(matches!(
            err,
            CommandError::Cluster {
                source: ClusterError::Forbidden(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_nodes_table() {
        let node: Node = serde_json::from_value(json!({
            "metadata": {
                "name": "node-a",
                "creationTimestamp": "2024-04-30T12:00:00Z",
                "labels": {"kubernetes.io/os": "linux"}
            },
            "status": {"conditions": [{"type": "Ready", "status": "True"}]}
        }))
        .unwrap();
        let cluster = FakeCluster {
            nodes: vec![node],
            ..Default::default()
        };

        let (result, out) = run_to_string(&cluster, Command::Nodes, &Settings::default()).await;
        result.unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME"));
        assert_eq!(lines[1], format::SEPARATOR);
        assert_eq!(
            lines[2],
            format!("{:<20} {:<15} {:<20} {}", "node-a", "Ready", "worker", "24h0m0s")
        );
    }

    #[tokio::test]
    async fn test_deploy_json_output() {
        let cluster = FakeCluster {
            deployments: vec![deployment("web")],
            ..Default::default()
        };
        let settings = Settings {
            output: OutputFormat::Json,
            ..Settings::default()
        };

        let (result, out) = run_to_string(&cluster, Command::Deploy { namespace: None }, &settings).await;
        result.unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "web");
        assert_eq!(value[0]["ready_replicas"], 1);
        assert_eq!(value[0]["age"], "2h0m0s");
    }

    #[tokio::test]
    async fn test_scale_updates_replicas() {
        let cluster = FakeCluster {
            deployments: vec![deployment("web")],
            ..Default::default()
        };
        let command = Command::Scale {
            deployment: "web".to_string(),
            replicas: "3".to_string(),
            namespace: Some("prod".to_string()),
        };

        let (result, out) = run_to_string(&cluster, command, &Settings::default()).await;
        result.unwrap();
        assert_eq!(out, "✓ Scaled deployment web to 3 replicas\n");
        assert_eq!(
            cluster.calls(),
            vec!["get_deployment prod/web", "update_replicas prod/web=3"]
        );
    }

    #[tokio::test]
    async fn test_scale_rejects_non_numeric_replicas() {
        let cluster = FakeCluster {
            deployments: vec![deployment("my-deploy")],
            ..Default::default()
        };
        let command = Command::Scale {
            deployment: "my-deploy".to_string(),
            replicas: "abc".to_string(),
            namespace: None,
        };

        let (result, out) = run_to_string(&cluster, command, &Settings::default()).await;
        let err = result.unwrap_err();
        assert!(matches!(err, CommandError::InvalidReplicas { .. }));
        assert_eq!(err.exit_code(), 2);
        assert!(out.is_empty());
        assert!(cluster.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scale_missing_deployment_reports_get() {
        let cluster = FakeCluster::default();
        let command = Command::Scale {
            deployment: "ghost".to_string(),
            replicas: "2".to_string(),
            namespace: None,
        };

        let (result, out) = run_to_string(&cluster, command, &Settings::default()).await;
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to get deployment: deployment ghost not found"
        );
        assert!(out.is_empty());
        assert_eq!(cluster.calls(), vec!["get_deployment default/ghost"]);
    }

    #[tokio::test]
    async fn test_scale_forbidden_get_skips_update() {
        let cluster = FakeCluster {
            deployments: vec![deployment("web")],
            ..FakeCluster::failing(403)
        };
        let command = Command::Scale {
            deployment: "web".to_string(),
            replicas: "2".to_string(),
            namespace: None,
        };

        let (result, out) = run_to_string(&cluster, command, &Settings::default()).await;
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Failed to get deployment: request failed with 403");
        assert!(out.is_empty());
        assert_eq!(cluster.calls(), vec!["get_deployment default/web"]);
    }

    #[tokio::test]
    async fn test_scale_conflict_reports_update() {
        let cluster = FakeCluster {
            deployments: vec![deployment("web")],
            fail_update_with: Some(409),
            ..Default::default()
        };
        let command = Command::Scale {
            deployment: "web".to_string(),
            replicas: "4".to_string(),
            namespace: None,
        };

        let (result, out) = run_to_string(&cluster, command, &Settings::default()).await;
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Failed to scale deployment: request failed with 409");
        assert!(matches!(
            err,
            CommandError::Cluster {
                source: ClusterError::Conflict(_),
                ..
            }
        ));
        assert_eq!(err.exit_code(), 0);
        assert!(out.is_empty());
        assert_eq!(
            cluster.calls(),
            vec!["get_deployment default/web", "update_replicas default/web=4"]
        );
    }

    #[tokio::test]
    async fn test_logs_default_tail() {
        let cluster = FakeCluster {
            logs: "line one\nline two".to_string(),
            ..Default::default()
        };
        let command = Command::Logs {
            pod: "web-0".to_string(),
            namespace: None,
            tail: None,
        };

        let (result, out) = run_to_string(&cluster, command, &Settings::default()).await;
        result.unwrap();
        assert_eq!(out, "line one\nline two\n");
        assert_eq!(cluster.calls(), vec!["get_pod_logs default/web-0 tail=100"]);
    }

    #[tokio::test]
    async fn test_logs_tail_flag_wins() {
        let cluster = FakeCluster::default();
        let settings = Settings {
            tail_lines: 500,
            ..Settings::default()
        };
        let command = Command::Logs {
            pod: "web-0".to_string(),
            namespace: Some("apps".to_string()),
            tail: Some(25),
        };

        let (result, _) = run_to_string(&cluster, command, &settings).await;
        result.unwrap();
        assert_eq!(cluster.calls(), vec!["get_pod_logs apps/web-0 tail=25"]);
    }

    #[tokio::test]
    async fn test_invalid_namespace_is_rejected_before_request() {
        let cluster = FakeCluster::default();
        let command = Command::Deploy {
            namespace: Some("Not_Valid".to_string()),
        };

        let (result, out) = run_to_string(&cluster, command, &Settings::default()).await;
        assert!(matches!(result, Err(CommandError::InvalidName { kind: "namespace", .. })));
        assert!(out.is_empty());
        assert!(cluster.calls().is_empty());
    }

    #[tokio::test]
    async fn test_services_and_namespaces_tables() {
        let svc: Service = serde_json::from_value(json!({
            "metadata": {"name": "kubernetes"},
            "spec": {"type": "ClusterIP", "clusterIP": "10.96.0.1", "ports": [{"port": 443, "protocol": "TCP"}]}
        }))
        .unwrap();
        let ns: Namespace = serde_json::from_value(json!({
            "metadata": {"name": "default"},
            "status": {"phase": "Active"}
        }))
        .unwrap();
        let cluster = FakeCluster {
            services: vec![svc],
            namespaces: vec![ns],
            ..Default::default()
        };

        let (result, out) =
            run_to_string(&cluster, Command::Svc { namespace: None }, &Settings::default()).await;
        result.unwrap();
        assert!(out.lines().nth(2).unwrap().ends_with("443/TCP"));

        let (result, out) = run_to_string(&cluster, Command::Ns, &Settings::default()).await;
        result.unwrap();
        assert_eq!(out.lines().nth(2), Some("default              Active"));
    }
}

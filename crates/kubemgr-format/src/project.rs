//! Projection of API objects into display views

use chrono::{DateTime, Utc};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kubemgr_types::{
    Age, DeploymentView, NamespacePhase, NamespaceView, NodeView, PodPhase, PodView, ServiceType,
    ServiceView,
};

use crate::fields;

fn name_of(meta: &ObjectMeta) -> String {
    meta.name.clone().unwrap_or_default()
}

fn age_of(meta: &ObjectMeta, now: DateTime<Utc>) -> Option<Age> {
    meta.creation_timestamp
        .as_ref()
        .map(|ts| fields::age(ts.0, now))
}

pub fn node_view(node: &Node, now: DateTime<Utc>) -> NodeView {
    let roles = node
        .metadata
        .labels
        .as_ref()
        .map(fields::node_roles)
        .unwrap_or_else(|| fields::WORKER_ROLE.to_string());

    NodeView {
        name: name_of(&node.metadata),
        status: fields::latest_condition(node),
        roles,
        age: age_of(&node.metadata, now),
    }
}

pub fn pod_view(pod: &Pod, now: DateTime<Utc>) -> PodView {
    let (ready_containers, total_containers) = fields::pod_readiness(pod);
    let phase = pod
        .status
        .as_ref()
        .and_then(|s| s.phase.as_deref())
        .map(PodPhase::from)
        .unwrap_or(PodPhase::Unknown);

    PodView {
        name: name_of(&pod.metadata),
        ready_containers,
        total_containers,
        phase,
        age: age_of(&pod.metadata, now),
    }
}

/// Replica counts come straight from the reported status
pub fn deployment_view(deploy: &Deployment, now: DateTime<Utc>) -> DeploymentView {
    let status = deploy.status.as_ref();

    DeploymentView {
        name: name_of(&deploy.metadata),
        ready_replicas: status.and_then(|s| s.ready_replicas).unwrap_or(0),
        replicas: status.and_then(|s| s.replicas).unwrap_or(0),
        updated_replicas: status.and_then(|s| s.updated_replicas).unwrap_or(0),
        available_replicas: status.and_then(|s| s.available_replicas).unwrap_or(0),
        age: age_of(&deploy.metadata, now),
    }
}

pub fn service_view(svc: &Service) -> ServiceView {
    let spec = svc.spec.as_ref();

    ServiceView {
        name: name_of(&svc.metadata),
        // The API server defaults an omitted type to ClusterIP
        service_type: spec
            .and_then(|s| s.type_.as_deref())
            .map(ServiceType::from)
            .unwrap_or_default(),
        cluster_ip: spec.and_then(|s| s.cluster_ip.clone()).unwrap_or_default(),
        ports: spec
            .and_then(|s| s.ports.as_deref())
            .map(fields::port_summary)
            .unwrap_or_default(),
    }
}

pub fn namespace_view(ns: &Namespace) -> NamespaceView {
    NamespaceView {
        name: name_of(&ns.metadata),
        phase: ns
            .status
            .as_ref()
            .and_then(|s| s.phase.as_deref())
            .map(NamespacePhase::from)
            .unwrap_or(NamespacePhase::Unknown),
    }
}

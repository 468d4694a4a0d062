//! Display fields derived from Kubernetes objects

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::{Node, Pod, ServicePort};
use kubemgr_types::Age;

/// Role shown for nodes with no control-plane label
pub const WORKER_ROLE: &str = "worker";

/// Shown in place of a missing age or condition
pub const UNKNOWN: &str = "Unknown";

const SECONDS_PER_HOUR: i64 = 3600;

/// Time elapsed from `created` to `now`, rounded to the nearest hour
///
/// Half an hour rounds up. Timestamps in the future count as zero.
pub fn age(created: DateTime<Utc>, now: DateTime<Utc>) -> Age {
    let elapsed = (now - created).num_seconds().max(0);
    let hours = (elapsed + SECONDS_PER_HOUR / 2) / SECONDS_PER_HOUR;
    Age::from_hours(hours as u64)
}

/// Age display with a placeholder for objects without a creation timestamp
pub fn age_display(age: Option<Age>) -> String {
    age.map(|a| a.to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}

/// Classify a node's roles from its labels
///
/// Every label whose *value* is `master` or `control-plane` contributes its
/// key followed by a comma; with no match the node is a `worker`.
// NOTE: upstream convention is the `node-role.kubernetes.io/<role>` label
// *key* with an empty value, so this value match misses most control-plane
// nodes. Kept as-is until the intended rule is confirmed.
pub fn node_roles(labels: &BTreeMap<String, String>) -> String {
    let roles: String = labels
        .iter()
        .filter(|(_, value)| value.as_str() == "master" || value.as_str() == "control-plane")
        .map(|(key, _)| format!("{key},"))
        .collect();

    if roles.is_empty() {
        WORKER_ROLE.to_string()
    } else {
        roles
    }
}

/// Type of the last condition in the node's condition list
// Positional on purpose: this is not the `Ready` condition nor the most
// recent transition. Selecting `type == "Ready"` is the open alternative.
pub fn latest_condition(node: &Node) -> String {
    node.status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .and_then(|c| c.last())
        .map(|c| c.type_.clone())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// (ready container statuses, containers in the pod spec)
pub fn pod_readiness(pod: &Pod) -> (usize, usize) {
    let ready = pod
        .status
        .as_ref()
        .and_then(|s| s.container_statuses.as_ref())
        .map(|statuses| statuses.iter().filter(|cs| cs.ready).count())
        .unwrap_or(0);

    let total = pod.spec.as_ref().map(|s| s.containers.len()).unwrap_or(0);

    (ready, total)
}

/// Join service ports as `port/PROTOCOL`, comma separated
pub fn port_summary(ports: &[ServicePort]) -> String {
    ports
        .iter()
        .map(|p| format!("{}/{}", p.port, p.protocol.as_deref().unwrap_or("TCP")))
        .collect::<Vec<_>>()
        .join(",")
}

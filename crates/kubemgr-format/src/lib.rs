//! Resource formatting for kubemgr
//!
//! Pure transforms from Kubernetes API objects to display views, and the
//! fixed-width tables they are printed in. Nothing here touches the network;
//! the evaluation instant is passed in so ages are reproducible.

pub mod fields;
mod project;
mod render;
mod table;

pub use project::{deployment_view, namespace_view, node_view, pod_view, service_view};
pub use render::{deployments_table, namespaces_table, nodes_table, pods_table, services_table};
pub use table::{Column, SEPARATOR, Table};

// Re-export types used in our public API
pub use kubemgr_types::{
    Age, DeploymentView, NamespacePhase, NamespaceView, NodeView, PodPhase, PodView, ServiceType,
    ServiceView,
};

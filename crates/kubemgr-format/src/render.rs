//! Tables for each resource kind

use kubemgr_types::{DeploymentView, NamespaceView, NodeView, PodView, ServiceView};

use crate::fields::age_display;
use crate::table::{Column, Table};

const NODE_COLUMNS: &[Column] = &[
    Column::new("NAME", 20),
    Column::new("STATUS", 15),
    Column::new("ROLES", 20),
    Column::new("AGE", 15),
];

const POD_COLUMNS: &[Column] = &[
    Column::new("NAME", 30),
    Column::new("READY", 15),
    Column::new("STATUS", 10),
    Column::new("AGE", 15),
];

const DEPLOYMENT_COLUMNS: &[Column] = &[
    Column::new("NAME", 25),
    Column::new("READY", 10),
    Column::new("UP-TO-DATE", 15),
    Column::new("AVAILABLE", 15),
    Column::new("AGE", 15),
];

const SERVICE_COLUMNS: &[Column] = &[
    Column::new("NAME", 25),
    Column::new("TYPE", 20),
    Column::new("CLUSTER-IP", 15),
    Column::new("PORT(S)", 15),
];

const NAMESPACE_COLUMNS: &[Column] = &[Column::new("NAME", 20), Column::new("STATUS", 15)];

pub fn nodes_table(nodes: &[NodeView]) -> Table {
    let mut table = Table::new(NODE_COLUMNS);
    for node in nodes {
        table.push_row(vec![
            node.name.clone(),
            node.status.clone(),
            node.roles.clone(),
            age_display(node.age),
        ]);
    }
    table
}

pub fn pods_table(pods: &[PodView]) -> Table {
    let mut table = Table::new(POD_COLUMNS);
    for pod in pods {
        table.push_row(vec![
            pod.name.clone(),
            pod.ready_ratio(),
            pod.phase.to_string(),
            age_display(pod.age),
        ]);
    }
    table
}

pub fn deployments_table(deployments: &[DeploymentView]) -> Table {
    let mut table = Table::new(DEPLOYMENT_COLUMNS);
    for d in deployments {
        table.push_row(vec![
            d.name.clone(),
            d.ready_ratio(),
            d.updated_replicas.to_string(),
            d.available_replicas.to_string(),
            age_display(d.age),
        ]);
    }
    table
}

pub fn services_table(services: &[ServiceView]) -> Table {
    let mut table = Table::new(SERVICE_COLUMNS);
    for svc in services {
        table.push_row(vec![
            svc.name.clone(),
            svc.service_type.to_string(),
            svc.cluster_ip.clone(),
            svc.ports.clone(),
        ]);
    }
    table
}

pub fn namespaces_table(namespaces: &[NamespaceView]) -> Table {
    let mut table = Table::new(NAMESPACE_COLUMNS);
    for ns in namespaces {
        table.push_row(vec![ns.name.clone(), ns.phase.to_string()]);
    }
    table
}

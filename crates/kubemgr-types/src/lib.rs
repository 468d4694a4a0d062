//! Shared types for kubemgr
//!
//! This crate contains the display views built from Kubernetes API objects.
//! Every view is a read-only projection of a single object fetched during the
//! current invocation.

use serde::{Serialize, Serializer};
use std::fmt;

// ============================================================================
// Age
// ============================================================================

/// Time since a resource was created, rounded to whole hours
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age {
    hours: u64,
}

impl Age {
    pub fn from_hours(hours: u64) -> Self {
        Self { hours }
    }
}

impl fmt::Display for Age {
    /// Formats like a Go duration: `0s`, `1h0m0s`, `27h0m0s`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours == 0 {
            f.write_str("0s")
        } else {
            write!(f, "{}h0m0s", self.hours)
        }
    }
}

impl Serialize for Age {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Resource Views
// ============================================================================

/// Node row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub name: String,
    /// Type of the last condition reported for the node
    pub status: String,
    pub roles: String,
    pub age: Option<Age>,
}

/// Pod row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PodView {
    pub name: String,
    pub ready_containers: usize,
    pub total_containers: usize,
    pub phase: PodPhase,
    pub age: Option<Age>,
}

impl PodView {
    /// Format container readiness as "ready/total"
    pub fn ready_ratio(&self) -> String {
        format!("{}/{}", self.ready_containers, self.total_containers)
    }
}

/// Deployment row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeploymentView {
    pub name: String,
    pub ready_replicas: i32,
    pub replicas: i32,
    pub updated_replicas: i32,
    pub available_replicas: i32,
    pub age: Option<Age>,
}

impl DeploymentView {
    /// Format replica status as "ready/total"
    pub fn ready_ratio(&self) -> String {
        format!("{}/{}", self.ready_replicas, self.replicas)
    }
}

/// Service row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServiceView {
    pub name: String,
    pub service_type: ServiceType,
    pub cluster_ip: String,
    /// Comma separated `port/PROTOCOL` list
    pub ports: String,
}

/// Namespace row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamespaceView {
    pub name: String,
    pub phase: NamespacePhase,
}

// ============================================================================
// Phases and Types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl PodPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<&str> for PodPhase {
    fn from(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Running" => Self::Running,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NamespacePhase {
    Active,
    Terminating,
    /// The API reported no phase
    Unknown,
}

impl NamespacePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Terminating => "Terminating",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<&str> for NamespacePhase {
    fn from(s: &str) -> Self {
        match s {
            "Active" => Self::Active,
            "Terminating" => Self::Terminating,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for NamespacePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kubernetes service type
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ServiceType {
    #[default]
    ClusterIp,
    NodePort,
    LoadBalancer,
    ExternalName,
    /// A type this client does not know about, shown verbatim
    Other(String),
}

impl ServiceType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ClusterIp => "ClusterIP",
            Self::NodePort => "NodePort",
            Self::LoadBalancer => "LoadBalancer",
            Self::ExternalName => "ExternalName",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for ServiceType {
    fn from(s: &str) -> Self {
        match s {
            "ClusterIP" => Self::ClusterIp,
            "NodePort" => Self::NodePort,
            "LoadBalancer" => Self::LoadBalancer,
            "ExternalName" => Self::ExternalName,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ServiceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

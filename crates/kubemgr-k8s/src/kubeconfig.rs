//! Kubeconfig discovery
//!
//! Resolution order: an explicit path, then the `KUBECONFIG` environment
//! variable (which may list several files), then `~/.kube/config`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use kube::config::Kubeconfig;

use crate::ClusterError;

/// Environment variable consulted when no explicit path is given
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Work out which kubeconfig files to load
pub fn kubeconfig_paths(
    explicit: Option<&Path>,
    env_value: Option<&OsStr>,
    home: Option<&Path>,
) -> Result<Vec<PathBuf>, ClusterError> {
    if let Some(path) = explicit {
        return Ok(vec![path.to_path_buf()]);
    }

    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        let paths: Vec<PathBuf> = std::env::split_paths(value)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        if !paths.is_empty() {
            return Ok(paths);
        }
    }

    home.map(|h| vec![h.join(".kube").join("config")])
        .ok_or(ClusterError::NoKubeconfig)
}

/// Read and merge the given kubeconfig files, first file winning
pub fn load(paths: &[PathBuf]) -> Result<Kubeconfig, ClusterError> {
    let mut merged: Option<Kubeconfig> = None;

    for path in paths {
        tracing::debug!(path = %path.display(), "reading kubeconfig");
        let next = Kubeconfig::read_from(path).map_err(|source| ClusterError::Kubeconfig {
            path: path.clone(),
            source,
        })?;

        merged = Some(match merged {
            None => next,
            Some(current) => current
                .merge(next)
                .map_err(|source| ClusterError::Kubeconfig {
                    path: path.clone(),
                    source,
                })?,
        });
    }

    merged.ok_or(ClusterError::NoKubeconfig)
}

use std::path::PathBuf;

use kube::config::KubeconfigError;
use thiserror::Error;

/// Errors returned by the cluster adapter
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("no kubeconfig found: set KUBECONFIG or pass --kubeconfig")]
    NoKubeconfig,

    #[error("failed to load kubeconfig {}: {source}", .path.display())]
    Kubeconfig {
        path: PathBuf,
        #[source]
        source: KubeconfigError,
    },

    #[error("failed to load kubeconfig context: {0}")]
    Context(#[source] KubeconfigError),

    #[error("failed to create client: {0}")]
    Client(#[source] kube::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{message} ({code} {reason})")]
    Api {
        code: u16,
        reason: String,
        message: String,
    },

    #[error("request failed: {0}")]
    Transport(#[source] kube::Error),
}

impl From<kube::Error> for ClusterError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(resp) => match resp.code {
                401 => Self::Unauthorized(resp.message),
                403 => Self::Forbidden(resp.message),
                404 => Self::NotFound(resp.message),
                409 => Self::Conflict(resp.message),
                code => Self::Api {
                    code,
                    reason: resp.reason,
                    message: resp.message,
                },
            },
            other => Self::Transport(other),
        }
    }
}

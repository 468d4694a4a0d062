use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// kubemgr - list and scale Kubernetes resources
#[derive(Parser, Debug)]
#[command(name = "kubemgr")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Kubeconfig file (defaults to $KUBECONFIG, then ~/.kube/config)
    #[arg(long, global = true, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context (defaults to the current context)
    #[arg(long, global = true, value_name = "CONTEXT")]
    pub context: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format for list commands
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Config file (defaults to <config dir>/kubemgr/config.toml)
    #[arg(long, global = true, env = "KUBEMGR_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all nodes
    Nodes,

    /// List pods in a namespace
    Pods { namespace: Option<String> },

    /// List deployments in a namespace
    Deploy { namespace: Option<String> },

    /// Scale a deployment
    Scale {
        deployment: String,
        #[arg(allow_hyphen_values = true)]
        replicas: String,
        namespace: Option<String>,
    },

    /// Get logs from a pod
    Logs {
        pod: String,
        namespace: Option<String>,

        /// Number of lines from the end of the log
        #[arg(long, value_name = "LINES", value_parser = clap::value_parser!(i64).range(1..))]
        tail: Option<i64>,
    },

    /// List services in a namespace
    Svc { namespace: Option<String> },

    /// List all namespaces
    Ns,
}

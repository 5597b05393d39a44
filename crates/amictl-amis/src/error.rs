//! Error types for amictl-amis

use thiserror::Error;

/// Result type alias using amictl-amis's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by AMI resolution
#[derive(Error, Debug)]
pub enum Error {
    /// Kubernetes version discovery failed or found nothing
    #[error("unable to discover k8s version: {message}")]
    Discovery { message: String },

    /// A parameter store or image metadata call failed
    #[error("{operation} failed: {source}")]
    Lookup {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// The query produced no parameter keys, or the keys matched nothing
    #[error("no AMIs found")]
    NoMatch,

    /// Unknown AMI alias
    #[error("unknown AMI alias: {alias}. Valid aliases: {valid}")]
    InvalidAlias { alias: String, valid: String },

    /// Unknown CPU architecture
    #[error("unknown CPU architecture: {architecture}. Valid architectures: amd64, arm64")]
    InvalidArchitecture { architecture: String },
}

impl Error {
    /// Create a discovery error
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery {
            message: message.into(),
        }
    }

    /// Wrap a collaborator failure as a lookup error
    pub fn lookup(operation: &'static str, source: anyhow::Error) -> Self {
        Self::Lookup { operation, source }
    }
}

//! Collaborator trait definitions
//!
//! The resolver talks to three services. Production code backs them with the
//! AWS SDK (see [`crate::aws`]); tests substitute mocks.

use crate::types::{Image, Parameter};
use anyhow::Result;
use async_trait::async_trait;

/// Batch read access to a hierarchical parameter store (SSM)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Fetch the named parameters
    ///
    /// Names that do not exist are left out of the result; only transport or
    /// authorization failures are errors.
    async fn get_parameters(&self, names: &[String]) -> Result<Vec<Parameter>>;
}

/// Image metadata lookup (EC2)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageCatalog: Send + Sync {
    /// Describe images by ID, in the order the service returns them
    ///
    /// An empty result is not an error.
    async fn describe_images(&self, ids: &[String], include_deprecated: bool)
        -> Result<Vec<Image>>;
}

/// Supported Kubernetes versions of the managed control plane (EKS)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterVersionSource: Send + Sync {
    /// Supported major.minor versions, most relevant first
    async fn supported_versions(&self) -> Result<Vec<String>>;
}

//! EKS-optimized AMI resolution for amictl
//!
//! This crate provides functionality for:
//! - Building SSM parameter paths for the EKS-optimized AMI families
//!   (Amazon Linux 2, Bottlerocket, Ubuntu, Windows)
//! - Resolving those parameters and describing the images they point at
//! - Deriving display attributes (build version, Kubernetes version, OS, GPU
//!   support) from AMI names
//!
//! # Example
//!
//! ```no_run
//! use amictl_amis::{Alias, Architecture, GpuPreference, Query, Resolver};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//!     let resolver = Resolver::from_sdk_config(&config);
//!
//!     let query = Query::by_alias(Alias::Bottlerocket)
//!         .with_k8s_version("1.27")
//!         .with_architecture(Some(Architecture::Arm64))
//!         .with_gpu(GpuPreference::Excluded);
//!
//!     for image in resolver.get(&query).await? {
//!         println!("{} {}", image.image.image_id, image.version);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aws;
pub mod enrich;
pub mod error;
pub mod paths;
pub mod resolver;
pub mod traits;
pub mod types;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use resolver::Resolver;
pub use traits::{ClusterVersionSource, ImageCatalog, ParameterStore};
pub use types::{Alias, Architecture, GpuPreference, Image, ImageOutput, Parameter, Query};

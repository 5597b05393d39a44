use crate::aws::{Ec2ImageCatalog, EksClusterVersions, SsmParameterStore};
use crate::enrich::enrich;
use crate::error::{Error, Result};
use crate::paths::{parameter_paths, PathParams};
use crate::traits::{ClusterVersionSource, ImageCatalog, ParameterStore};
use crate::types::{ImageOutput, Query};
use aws_config::SdkConfig;
use tracing::{debug, info};

/// Resolves AMI aliases and IDs into enriched image metadata
pub struct Resolver {
    parameters: Box<dyn ParameterStore>,
    images: Box<dyn ImageCatalog>,
    versions: Box<dyn ClusterVersionSource>,
}

impl Resolver {
    /// Create a resolver over explicit collaborators
    pub fn new(
        parameters: Box<dyn ParameterStore>,
        images: Box<dyn ImageCatalog>,
        versions: Box<dyn ClusterVersionSource>,
    ) -> Self {
        Self {
            parameters,
            images,
            versions,
        }
    }

    /// Create a resolver backed by SSM, EC2 and EKS clients
    pub fn from_sdk_config(config: &SdkConfig) -> Self {
        Self::new(
            Box::new(SsmParameterStore::new(config)),
            Box::new(Ec2ImageCatalog::new(config)),
            Box::new(EksClusterVersions::new(config)),
        )
    }

    /// Resolve a query: direct ID lookup when an ID is set, alias lookup otherwise
    pub async fn get(&self, query: &Query) -> Result<Vec<ImageOutput>> {
        match &query.id {
            Some(id) => self.get_by_id(std::slice::from_ref(id)).await,
            None => self.get_by_alias(query).await,
        }
    }

    /// Describe images by ID, deprecated ones included
    ///
    /// Results keep the order the image service returned them in.
    pub async fn get_by_id(&self, ids: &[String]) -> Result<Vec<ImageOutput>> {
        let images = self
            .images
            .describe_images(ids, true)
            .await
            .map_err(|e| Error::lookup("ec2:DescribeImages", e))?;

        debug!("Described {} of {} requested images", images.len(), ids.len());
        Ok(images.into_iter().map(enrich).collect())
    }

    /// Expand an alias into SSM parameter paths and resolve the AMIs they point at
    pub async fn get_by_alias(&self, query: &Query) -> Result<Vec<ImageOutput>> {
        let k8s_version = match &query.k8s_version {
            Some(version) => version.clone(),
            None => self.default_k8s_version().await?,
        };

        let params = PathParams {
            k8s_version: &k8s_version,
            ami_version: query.ami_version.as_deref(),
            architecture: query.architecture,
            gpu: query.gpu,
        };
        let names = query
            .alias
            .map(|alias| parameter_paths(alias, &params))
            .unwrap_or_default();

        if names.is_empty() {
            debug!("No parameter paths for {:?}", query);
            return Err(Error::NoMatch);
        }
        debug!("Resolving parameters: {:?}", names);

        let parameters = self
            .parameters
            .get_parameters(&names)
            .await
            .map_err(|e| Error::lookup("ssm:GetParameters", e))?;

        if parameters.is_empty() {
            debug!("None of the {} parameters exist", names.len());
            return Err(Error::NoMatch);
        }

        let ids: Vec<String> = parameters.into_iter().map(|param| param.value).collect();
        self.get_by_id(&ids).await
    }

    /// The first version EKS reports as supported
    async fn default_k8s_version(&self) -> Result<String> {
        let versions = self
            .versions
            .supported_versions()
            .await
            .map_err(|e| Error::discovery(format!("{:#}", e)))?;

        let version = versions
            .into_iter()
            .next()
            .ok_or_else(|| Error::discovery("no supported versions returned"))?;

        info!("Using EKS default k8s version {}", version);
        Ok(version)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

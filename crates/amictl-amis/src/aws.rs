//! AWS SDK backed collaborators
//!
//! Each adapter makes exactly one SDK call per invocation. Errors are
//! flattened with `DisplayErrorContext` so the service message survives.

use crate::traits::{ClusterVersionSource, ImageCatalog, ParameterStore};
use crate::types::{Image, Parameter};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Add-on whose compatibility metadata tracks every supported EKS version
const VERSION_PROBE_ADDON: &str = "vpc-cni";

/// SSM Parameter Store
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_ssm::Client::new(config),
        }
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameters(&self, names: &[String]) -> Result<Vec<Parameter>> {
        debug!("ssm:GetParameters for {} names", names.len());

        let output = self
            .client
            .get_parameters()
            .set_names(Some(names.to_vec()))
            .send()
            .await
            .map_err(|e| anyhow!("{}", aws_sdk_ssm::error::DisplayErrorContext(&e)))?;

        if !output.invalid_parameters().is_empty() {
            debug!("Parameters not found: {:?}", output.invalid_parameters());
        }

        Ok(output
            .parameters()
            .iter()
            .filter_map(|param| match (param.name(), param.value()) {
                (Some(name), Some(value)) => Some(Parameter::new(name, value)),
                _ => None,
            })
            .collect())
    }
}

/// EC2 image metadata
pub struct Ec2ImageCatalog {
    client: aws_sdk_ec2::Client,
}

impl Ec2ImageCatalog {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_ec2::Client::new(config),
        }
    }
}

#[async_trait]
impl ImageCatalog for Ec2ImageCatalog {
    async fn describe_images(
        &self,
        ids: &[String],
        include_deprecated: bool,
    ) -> Result<Vec<Image>> {
        debug!(
            "ec2:DescribeImages for {:?} (include_deprecated={})",
            ids, include_deprecated
        );

        let output = self
            .client
            .describe_images()
            .set_image_ids(Some(ids.to_vec()))
            .include_deprecated(include_deprecated)
            .send()
            .await
            .map_err(|e| anyhow!("{}", aws_sdk_ec2::error::DisplayErrorContext(&e)))?;

        let now = Utc::now();
        Ok(output
            .images()
            .iter()
            .map(|image| convert_image(image, now))
            .collect())
    }
}

fn convert_image(image: &aws_sdk_ec2::types::Image, now: DateTime<Utc>) -> Image {
    let deprecation_time = image.deprecation_time().map(str::to_string);
    Image {
        image_id: image.image_id().unwrap_or_default().to_string(),
        name: image.name().unwrap_or_default().to_string(),
        platform: image.platform().map(|p| p.as_str().to_string()),
        architecture: image.architecture().map(|a| a.as_str().to_string()),
        deprecated: is_deprecated(deprecation_time.as_deref(), now),
        creation_date: image.creation_date().map(str::to_string),
        deprecation_time,
        description: image.description().map(str::to_string),
    }
}

/// An image is deprecated once its RFC 3339 deprecation time has passed
fn is_deprecated(deprecation_time: Option<&str>, now: DateTime<Utc>) -> bool {
    deprecation_time
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .is_some_and(|t| t.with_timezone(&Utc) <= now)
}

/// EKS supported versions, read from add-on compatibility metadata
pub struct EksClusterVersions {
    client: aws_sdk_eks::Client,
}

impl EksClusterVersions {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_eks::Client::new(config),
        }
    }
}

#[async_trait]
impl ClusterVersionSource for EksClusterVersions {
    async fn supported_versions(&self) -> Result<Vec<String>> {
        let output = self
            .client
            .describe_addon_versions()
            .addon_name(VERSION_PROBE_ADDON)
            .max_results(1)
            .send()
            .await
            .map_err(|e| anyhow!("{}", aws_sdk_eks::error::DisplayErrorContext(&e)))?;

        let [addon] = output.addons() else {
            return Err(anyhow!(
                "unable to find eks supported versions by inspecting {} add-on versions",
                VERSION_PROBE_ADDON
            ));
        };

        let versions: Vec<String> = addon
            .addon_versions()
            .first()
            .map(|version| {
                version
                    .compatibilities()
                    .iter()
                    .filter_map(|compat| compat.cluster_version().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        debug!("EKS supported versions: {:?}", versions);
        Ok(versions)
    }
}

//! SSM parameter paths for EKS-optimized AMIs
//!
//! Each OS family publishes its current AMI IDs under its own parameter
//! namespace. The builders here are pure string construction; the templates
//! must match the public parameter names exactly.

use crate::types::{Alias, Architecture, GpuPreference};

const AL2_LATEST: &str = "recommended";
const BOTTLEROCKET_LATEST: &str = "latest";
const UBUNTU_LATEST: &str = "current";
/// Windows Server release, not a date
const WINDOWS_LATEST: &str = "2022";

/// Inputs shared by every family's path builder
#[derive(Debug, Clone, Copy)]
pub struct PathParams<'a> {
    pub k8s_version: &'a str,
    pub ami_version: Option<&'a str>,
    pub architecture: Option<Architecture>,
    pub gpu: GpuPreference,
}

impl PathParams<'_> {
    /// Requested architectures, arm64 first
    fn architectures(&self) -> Vec<Architecture> {
        match self.architecture {
            Some(arch) => vec![arch],
            None => vec![Architecture::Arm64, Architecture::Amd64],
        }
    }
}

/// Build every parameter path for an alias
///
/// `Alias::All` accumulates the paths of every family; a family that yields
/// nothing for the given filters does not stop the others.
pub fn parameter_paths(alias: Alias, params: &PathParams<'_>) -> Vec<String> {
    match alias {
        Alias::Al2 => al2_paths(params),
        Alias::Bottlerocket => bottlerocket_paths(params),
        Alias::Ubuntu => ubuntu_paths(params),
        Alias::Windows => windows_paths(params),
        Alias::All => Alias::FAMILIES
            .iter()
            .flat_map(|family| parameter_paths(*family, params))
            .collect(),
    }
}

/// Amazon Linux 2: the GPU variant replaces the per-architecture paths
pub fn al2_paths(params: &PathParams<'_>) -> Vec<String> {
    let k8s = params.k8s_version;
    let version = params.ami_version.unwrap_or(AL2_LATEST);
    let segment = |node: &str| {
        if version == AL2_LATEST {
            version.to_string()
        } else {
            format!("amazon-eks{}-node-{}-{}", node, k8s, version)
        }
    };

    if params.gpu == GpuPreference::Required {
        return vec![format!(
            "/aws/service/eks/optimized-ami/{}/amazon-linux-2-gpu/{}/image_id",
            k8s,
            segment("-gpu")
        )];
    }

    params
        .architectures()
        .into_iter()
        .map(|arch| {
            let suffix = match arch {
                Architecture::Arm64 => "-arm64",
                Architecture::Amd64 => "",
            };
            format!(
                "/aws/service/eks/optimized-ami/{}/amazon-linux-2{}/{}/image_id",
                k8s,
                suffix,
                segment(suffix)
            )
        })
        .collect()
}

/// Bottlerocket: the `-nvidia` variant lives next to the standard one
pub fn bottlerocket_paths(params: &PathParams<'_>) -> Vec<String> {
    let version = params
        .ami_version
        .map(strip_v)
        .unwrap_or(BOTTLEROCKET_LATEST);
    let variants: &[&str] = match params.gpu {
        GpuPreference::Unspecified => &["", "-nvidia"],
        GpuPreference::Required => &["-nvidia"],
        GpuPreference::Excluded => &[""],
    };

    let mut paths = Vec::new();
    for arch in params.architectures() {
        for variant in variants {
            paths.push(format!(
                "/aws/service/bottlerocket/aws-k8s-{}{}/{}/{}/image_id",
                params.k8s_version,
                variant,
                arch.ec2_name(),
                version
            ));
        }
    }
    paths
}

/// Canonical Ubuntu 20.04 EKS images; there is no GPU variant
pub fn ubuntu_paths(params: &PathParams<'_>) -> Vec<String> {
    if params.gpu == GpuPreference::Required {
        return Vec::new();
    }
    let version = params.ami_version.map(strip_v).unwrap_or(UBUNTU_LATEST);

    params
        .architectures()
        .into_iter()
        .map(|arch| {
            format!(
                "/aws/service/canonical/ubuntu/eks/20.04/{}/stable/{}/{}/hvm/ebs-gp2/ami-id",
                params.k8s_version,
                version,
                arch.as_str()
            )
        })
        .collect()
}

/// Windows Server Core: amd64 only, no GPU variant
pub fn windows_paths(params: &PathParams<'_>) -> Vec<String> {
    if params.gpu == GpuPreference::Required
        || params.architecture == Some(Architecture::Arm64)
    {
        return Vec::new();
    }
    let version = params.ami_version.unwrap_or(WINDOWS_LATEST);

    vec![format!(
        "/aws/service/ami-windows-latest/Windows_Server-{}-English-Core-EKS_Optimized-{}/image_id",
        version, params.k8s_version
    )]
}

fn strip_v(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

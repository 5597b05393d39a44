use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// EKS-optimized AMI family alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alias {
    #[serde(rename = "eks-al2")]
    Al2,
    #[serde(rename = "eks-ubuntu")]
    Ubuntu,
    #[serde(rename = "eks-bottlerocket")]
    Bottlerocket,
    #[serde(rename = "eks-windows")]
    Windows,
    /// Every family at once
    #[serde(rename = "eks-all")]
    All,
}

impl Alias {
    /// Concrete OS families, in the order keys are built for `eks-all`
    pub const FAMILIES: [Alias; 4] = [
        Alias::Al2,
        Alias::Bottlerocket,
        Alias::Ubuntu,
        Alias::Windows,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Alias::Al2 => "eks-al2",
            Alias::Ubuntu => "eks-ubuntu",
            Alias::Bottlerocket => "eks-bottlerocket",
            Alias::Windows => "eks-windows",
            Alias::All => "eks-all",
        }
    }

    /// All accepted alias strings
    pub fn variants() -> [&'static str; 5] {
        [
            Alias::Al2.as_str(),
            Alias::Bottlerocket.as_str(),
            Alias::Ubuntu.as_str(),
            Alias::Windows.as_str(),
            Alias::All.as_str(),
        ]
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alias {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eks-al2" => Ok(Alias::Al2),
            "eks-ubuntu" => Ok(Alias::Ubuntu),
            "eks-bottlerocket" => Ok(Alias::Bottlerocket),
            "eks-windows" => Ok(Alias::Windows),
            "eks-all" => Ok(Alias::All),
            _ => Err(Error::InvalidAlias {
                alias: s.to_string(),
                valid: Alias::variants().join(", "),
            }),
        }
    }
}

/// CPU architecture filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Amd64,
    Arm64,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Amd64 => "amd64",
            Architecture::Arm64 => "arm64",
        }
    }

    /// Architecture name as used by EC2 and the Bottlerocket parameter namespace
    pub fn ec2_name(&self) -> &'static str {
        match self {
            Architecture::Amd64 => "x86_64",
            Architecture::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amd64" | "x86_64" => Ok(Architecture::Amd64),
            "arm64" | "aarch64" => Ok(Architecture::Arm64),
            _ => Err(Error::InvalidArchitecture {
                architecture: s.to_string(),
            }),
        }
    }
}

/// GPU compatibility preference
///
/// `Unspecified` never drops CPU images. It adds GPU variants only where the
/// family publishes them alongside the CPU path (Bottlerocket).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GpuPreference {
    #[default]
    Unspecified,
    Required,
    Excluded,
}

impl From<Option<bool>> for GpuPreference {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            None => GpuPreference::Unspecified,
            Some(true) => GpuPreference::Required,
            Some(false) => GpuPreference::Excluded,
        }
    }
}

/// A request to resolve one or more AMIs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Family alias; ignored when `id` is set
    pub alias: Option<Alias>,
    /// Direct AMI ID lookup
    pub id: Option<String>,
    /// AMI build version; `None` selects the family's latest keyword
    pub ami_version: Option<String>,
    /// `None` means both architectures
    pub architecture: Option<Architecture>,
    /// Kubernetes major.minor; `None` discovers the current EKS default
    pub k8s_version: Option<String>,
    pub gpu: GpuPreference,
}

impl Query {
    /// Query by family alias
    pub fn by_alias(alias: Alias) -> Self {
        Self {
            alias: Some(alias),
            ..Default::default()
        }
    }

    /// Query a single AMI by ID
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: non_empty(id.into()),
            ..Default::default()
        }
    }

    pub fn with_ami_version(mut self, version: impl Into<String>) -> Self {
        self.ami_version = non_empty(version.into());
        self
    }

    pub fn with_architecture(mut self, architecture: Option<Architecture>) -> Self {
        self.architecture = architecture;
        self
    }

    pub fn with_k8s_version(mut self, version: impl Into<String>) -> Self {
        self.k8s_version = non_empty(version.into());
        self
    }

    pub fn with_gpu(mut self, gpu: GpuPreference) -> Self {
        self.gpu = gpu;
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// A resolved SSM parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// EC2 image metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub image_id: String,
    pub name: String,
    /// EC2 platform tag; only set for Windows images
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// EC2 architecture (`x86_64`, `arm64`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Image {
    pub fn new(image_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = Some(architecture.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

/// An image plus attributes derived from its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOutput {
    #[serde(flatten)]
    pub image: Image,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<Alias>,
    pub version: String,
    pub k8s_version: String,
    pub os: String,
    pub gpu_compatible: bool,
}

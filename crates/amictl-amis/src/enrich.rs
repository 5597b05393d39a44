//! Display attributes derived from AMI names
//!
//! Vendors encode the family, build version and Kubernetes version in the
//! AMI name. Each extractor is a small pure function so a naming change in
//! one family stays a local edit.

use crate::types::{Alias, Image, ImageOutput};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// `v20230607` / `20230616` build stamps (AL2, Ubuntu)
static DATE_STAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?20\d{6}").expect("date stamp regex is valid"));

/// `v1.14.1` release versions (Bottlerocket)
static SEMVER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?\d+\.\d+\.\d+").expect("semver regex is valid"));

/// `-2022-` Windows Server release
static WINDOWS_RELEASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-20\d{2}-").expect("windows release regex is valid"));

/// `1.27-` or `1.27/`
static K8S_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d\.\d{2}[-/]").expect("k8s version regex is valid"));

const DEFAULT_OS: &str = "linux";

/// Derive every display attribute for an image
pub fn enrich(image: Image) -> ImageOutput {
    let alias = alias_from_name(&image.name);
    let output = ImageOutput {
        version: version_from_name(alias, &image.name),
        k8s_version: k8s_version_from_name(&image.name),
        os: os_from_platform(image.platform.as_deref()),
        gpu_compatible: is_gpu_compatible(&image.name),
        alias,
        image,
    };
    trace!(
        "Enriched {} ({}): alias={:?} version={} k8s={}",
        output.image.image_id,
        output.image.name,
        output.alias,
        output.version,
        output.k8s_version
    );
    output
}

/// Identify the OS family from an AMI name
pub fn alias_from_name(name: &str) -> Option<Alias> {
    if name.contains("bottlerocket") {
        Some(Alias::Bottlerocket)
    } else if name.contains("amazon-eks-") {
        Some(Alias::Al2)
    } else if name.contains("ubuntu-eks") {
        Some(Alias::Ubuntu)
    } else if name.contains("English-Core-EKS_Optimized") {
        Some(Alias::Windows)
    } else {
        None
    }
}

/// Extract the family-specific build version, or an empty string
pub fn version_from_name(alias: Option<Alias>, name: &str) -> String {
    let found = match alias {
        Some(Alias::Al2) | Some(Alias::Ubuntu) => {
            DATE_STAMP_RE.find(name).map(|m| m.as_str().to_string())
        }
        Some(Alias::Bottlerocket) => SEMVER_RE.find(name).map(|m| m.as_str().to_string()),
        Some(Alias::Windows) => WINDOWS_RELEASE_RE
            .find(name)
            .map(|m| m.as_str().replace('-', "")),
        Some(Alias::All) | None => None,
    };
    found.unwrap_or_default()
}

/// Extract the Kubernetes major.minor embedded in the name, or an empty string
pub fn k8s_version_from_name(name: &str) -> String {
    K8S_VERSION_RE
        .find(name)
        .map(|m| m.as_str().replace(['-', '/'], ""))
        .unwrap_or_default()
}

pub fn os_from_platform(platform: Option<&str>) -> String {
    match platform {
        Some(platform) if !platform.is_empty() => platform.to_string(),
        _ => DEFAULT_OS.to_string(),
    }
}

pub fn is_gpu_compatible(name: &str) -> bool {
    name.contains("-gpu") || name.contains("-nvidia")
}

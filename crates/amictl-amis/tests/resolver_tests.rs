//! Resolver integration tests
//!
//! Exercises full alias and ID resolution against the in-memory AWS mock:
//! - Parameter path expansion per family
//! - Version discovery
//! - Error mapping
//! - Enrichment of the returned images

mod common;

use amictl_amis::{Alias, Architecture, Error, GpuPreference, Image, Query};
use common::*;

const AL2_ARM64: &str = "/aws/service/eks/optimized-ami/1.27/amazon-linux-2-arm64/recommended/image_id";
const AL2_AMD64: &str = "/aws/service/eks/optimized-ami/1.27/amazon-linux-2/recommended/image_id";
const AL2_GPU: &str = "/aws/service/eks/optimized-ami/1.27/amazon-linux-2-gpu/recommended/image_id";
const BR_ARM64: &str = "/aws/service/bottlerocket/aws-k8s-1.27/arm64/latest/image_id";
const BR_NVIDIA_AMD64: &str = "/aws/service/bottlerocket/aws-k8s-1.27-nvidia/x86_64/latest/image_id";
const WINDOWS: &str =
    "/aws/service/ami-windows-latest/Windows_Server-2022-English-Core-EKS_Optimized-1.27/image_id";

fn account() -> MockAws {
    MockAws::new()
        .with_versions(&["1.27", "1.26", "1.25"])
        .with_parameter(AL2_ARM64, "ami-0a1")
        .with_parameter(AL2_AMD64, "ami-0a2")
        .with_parameter(AL2_GPU, "ami-0a3")
        .with_parameter(BR_ARM64, "ami-0b1")
        .with_parameter(BR_NVIDIA_AMD64, "ami-0b2")
        .with_parameter(WINDOWS, "ami-0c1")
        .with_image(Image::new("ami-0a1", "amazon-eks-arm64-node-1.27-v20230607").with_architecture("arm64"))
        .with_image(Image::new("ami-0a2", "amazon-eks-node-1.27-v20230607").with_architecture("x86_64"))
        .with_image(Image::new("ami-0a3", "amazon-eks-gpu-node-1.27-v20230607").with_architecture("x86_64"))
        .with_image(
            Image::new("ami-0b1", "bottlerocket-aws-k8s-1.27-aarch64-v1.14.1-716e9ebd")
                .with_architecture("arm64"),
        )
        .with_image(
            Image::new("ami-0b2", "bottlerocket-aws-k8s-1.27-nvidia-x86_64-v1.14.1-716e9ebd")
                .with_architecture("x86_64"),
        )
        .with_image(
            Image::new("ami-0c1", "Windows_Server-2022-English-Core-EKS_Optimized-1.27-2023.06.14")
                .with_architecture("x86_64")
                .with_platform("windows"),
        )
}

#[tokio::test]
async fn test_al2_resolves_both_architectures() {
    let aws = account();
    let query = Query::by_alias(Alias::Al2).with_k8s_version("1.27");

    let images = aws.resolver().get(&query).await.unwrap();

    let ids: Vec<_> = images.iter().map(|i| i.image.image_id.as_str()).collect();
    assert_eq!(ids, vec!["ami-0a1", "ami-0a2"]);
    assert!(images.iter().all(|i| i.alias == Some(Alias::Al2)));
    assert!(images.iter().all(|i| !i.gpu_compatible));
    assert_eq!(
        aws.calls()[0],
        format!("get_parameters({},{})", AL2_ARM64, AL2_AMD64)
    );
    assert!(!aws.was_called("supported_versions"));
}

#[tokio::test]
async fn test_missing_k8s_version_uses_first_supported() {
    let aws = account();
    let query = Query::by_alias(Alias::Al2).with_gpu(GpuPreference::Required);

    let images = aws.resolver().get(&query).await.unwrap();

    assert_eq!(images.len(), 1);
    assert_eq!(images[0].image.image_id, "ami-0a3");
    assert!(images[0].gpu_compatible);
    let calls = aws.calls();
    assert_eq!(calls[0], "supported_versions()");
    assert_eq!(calls.iter().filter(|c| c.starts_with("supported_versions")).count(), 1);
}

#[tokio::test]
async fn test_all_families_with_gpu_required() {
    let aws = account();
    let query = Query::by_alias(Alias::All)
        .with_k8s_version("1.27")
        .with_gpu(GpuPreference::Required);

    let images = aws.resolver().get(&query).await.unwrap();

    let ids: Vec<_> = images.iter().map(|i| i.image.image_id.as_str()).collect();
    assert_eq!(ids, vec!["ami-0a3", "ami-0b2"]);
    assert!(images.iter().all(|i| i.gpu_compatible));
}

#[tokio::test]
async fn test_all_families_keep_partial_parameter_hits() {
    let aws = account();
    let query = Query::by_alias(Alias::All)
        .with_k8s_version("1.27")
        .with_architecture(Some(Architecture::Amd64))
        .with_gpu(GpuPreference::Excluded);

    let images = aws.resolver().get(&query).await.unwrap();

    let aliases: Vec<_> = images.iter().filter_map(|i| i.alias).collect();
    assert_eq!(aliases, vec![Alias::Al2, Alias::Windows]);
    assert_eq!(images[1].os, "windows");
    assert_eq!(images[1].version, "2022");
}

#[tokio::test]
async fn test_direct_id_includes_deprecated() {
    let mut deprecated = Image::new("ami-0d1", "amazon-eks-node-1.23-v20221101");
    deprecated.deprecated = true;
    let aws = MockAws::new().with_image(deprecated);

    let images = aws.resolver().get(&Query::by_id("ami-0d1")).await.unwrap();

    assert_eq!(images.len(), 1);
    assert!(images[0].image.deprecated);
    assert_eq!(images[0].k8s_version, "1.23");
    assert_eq!(aws.calls(), vec!["describe_images(ami-0d1, include_deprecated=true)"]);
}

#[tokio::test]
async fn test_unknown_id_is_empty_not_error() {
    let aws = account();
    let images = aws.resolver().get(&Query::by_id("ami-0ffff")).await.unwrap();
    assert!(images.is_empty());
}

#[tokio::test]
async fn test_no_published_parameters_is_no_match() {
    let aws = account();
    let query = Query::by_alias(Alias::Ubuntu).with_k8s_version("1.27");

    let err = aws.resolver().get(&query).await.unwrap_err();

    assert!(matches!(err, Error::NoMatch));
    assert_eq!(err.to_string(), "no AMIs found");
    assert!(!aws.was_called("describe_images"));
}

#[tokio::test]
async fn test_service_failures_map_to_error_kinds() {
    let query = Query::by_alias(Alias::Bottlerocket);

    let err = account().failing("eks").resolver().get(&query).await.unwrap_err();
    assert!(matches!(err, Error::Discovery { .. }));

    let err = account().failing("ssm").resolver().get(&query).await.unwrap_err();
    assert!(matches!(err, Error::Lookup { operation: "ssm:GetParameters", .. }));

    let err = account().failing("ec2").resolver().get(&query).await.unwrap_err();
    assert!(matches!(err, Error::Lookup { operation: "ec2:DescribeImages", .. }));
}

#[tokio::test]
async fn test_repeated_queries_are_identical() {
    let aws = account();
    let resolver = aws.resolver();
    let query = Query::by_alias(Alias::All).with_k8s_version("1.27");

    let first = resolver.get(&query).await.unwrap();
    let second = resolver.get(&query).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

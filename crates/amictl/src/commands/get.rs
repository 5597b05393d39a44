//! `amictl get` - resolve AMIs by ID or alias

use crate::cli::GetArgs;
use crate::config::Settings;
use crate::output;
use amictl_amis::{Alias, Architecture, GpuPreference, Query, Resolver};
use anyhow::{Context, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static AMI_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ami-[0-9a-f]+$").expect("ami id regex is valid"));

/// Execute get command
pub async fn run(args: GetArgs, settings: &Settings) -> Result<()> {
    let query = build_query(&args, settings)?;
    debug!("Query: {:?}", query);

    let sdk_config = settings.sdk_config().await;
    let region = sdk_config
        .region()
        .map(|r| r.to_string())
        .unwrap_or_default();

    let images = Resolver::from_sdk_config(&sdk_config).get(&query).await?;

    let rendered = output::render_images(&images, settings.output, &region)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Translate CLI arguments into a resolver query
fn build_query(args: &GetArgs, settings: &Settings) -> Result<Query> {
    let target = args.target.as_deref().map(str::trim).unwrap_or_default();
    if is_ami_id(target) {
        return Ok(Query::by_id(target));
    }

    let alias = if target.is_empty() {
        Alias::All
    } else {
        target.parse::<Alias>()?
    };
    let architecture = args
        .cpu_arch
        .as_deref()
        .filter(|arch| !arch.is_empty())
        .map(str::parse::<Architecture>)
        .transpose()
        .context("Invalid --cpu-arch")?;
    let k8s_version = args
        .k8s_version
        .clone()
        .or_else(|| settings.k8s_version.clone())
        .unwrap_or_default();

    Ok(Query::by_alias(alias)
        .with_k8s_version(k8s_version)
        .with_architecture(architecture)
        .with_gpu(GpuPreference::from(args.gpu_compatible))
        .with_ami_version(args.ami_version.clone().unwrap_or_default()))
}

fn is_ami_id(target: &str) -> bool {
    AMI_ID_RE.is_match(target)
}

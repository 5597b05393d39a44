//! CLI argument parsing with clap

use amictl_amis::Alias;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// amictl - Find and inspect EKS-optimized AMIs
#[derive(Parser, Debug)]
#[command(name = "amictl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short, long, value_enum, global = true, env = "AMICTL_OUTPUT")]
    pub output: Option<OutputFormat>,

    /// AWS region
    #[arg(long, global = true, env = "AMICTL_REGION")]
    pub region: Option<String>,

    /// AWS shared config profile
    #[arg(long, global = true, env = "AMICTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to config file (default: <config dir>/amictl/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find information about an AMI
    #[command(long_about = get_long_about())]
    Get(GetArgs),
}

fn get_long_about() -> String {
    format!(
        "Finds information about an AMI by ID or alias. Valid AMI aliases are: {}",
        Alias::variants().join(", ")
    )
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// AMI ID (ami-...) or alias; defaults to every EKS family
    #[arg(value_name = "AMI_OR_ALIAS")]
    pub target: Option<String>,

    /// K8s major.minor version (e.g. 1.27)
    #[arg(short, long = "k8s-version", env = "AMICTL_K8S_VERSION")]
    pub k8s_version: Option<String>,

    /// CPU architecture [amd64 or arm64]
    #[arg(short = 'c', long = "cpu-arch")]
    pub cpu_arch: Option<String>,

    /// GPU compatible; omit to leave GPU variants to each family's default
    #[arg(
        short = 'g',
        long = "gpu-compatible",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub gpu_compatible: Option<bool>,

    /// AMI version; if empty use latest (e.g. v20230607 for eks-al2 or 1.14.1 for Bottlerocket)
    #[arg(short, long = "ami-version")]
    pub ami_version: Option<String>,
}

/// Rendering of resolved AMIs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table with the main columns
    #[default]
    Short,
    /// Table with every column
    Wide,
    Yaml,
    Json,
}

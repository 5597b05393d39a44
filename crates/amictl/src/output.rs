//! Terminal output utilities

use crate::cli::OutputFormat;
use amictl_amis::ImageOutput;
use anyhow::{Context, Result};
use console::style;
use tabled::{settings::Style, Table, Tabled};

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Row of the short table
#[derive(Tabled)]
struct ImageRow {
    name: String,
    alias: String,
    version: String,
    #[tabled(rename = "ami-id")]
    ami_id: String,
    architecture: String,
}

/// Row of the wide table
#[derive(Tabled)]
struct WideImageRow {
    name: String,
    alias: String,
    version: String,
    #[tabled(rename = "ami-id")]
    ami_id: String,
    architecture: String,
    #[tabled(rename = "gpu compatible")]
    gpu_compatible: String,
    #[tabled(rename = "k8s version")]
    k8s_version: String,
    os: String,
    region: String,
}

impl WideImageRow {
    fn from_image(image: &ImageOutput, region: &str) -> Self {
        Self {
            name: image.image.name.clone(),
            alias: image.alias.map(|a| a.to_string()).unwrap_or_default(),
            version: image.version.clone(),
            ami_id: image.image.image_id.clone(),
            architecture: display_architecture(image.image.architecture.as_deref()),
            gpu_compatible: if image.gpu_compatible { "yes" } else { "no" }.to_string(),
            k8s_version: image.k8s_version.clone(),
            os: image.os.clone(),
            region: region.to_string(),
        }
    }
}

impl From<WideImageRow> for ImageRow {
    fn from(row: WideImageRow) -> Self {
        Self {
            name: row.name,
            alias: row.alias,
            version: row.version,
            ami_id: row.ami_id,
            architecture: row.architecture,
        }
    }
}

fn display_architecture(architecture: Option<&str>) -> String {
    match architecture {
        Some("x86_64") => "x86_64 / amd64".to_string(),
        Some(arch) => arch.to_string(),
        None => String::new(),
    }
}

/// Render resolved images in the requested format
pub fn render_images(images: &[ImageOutput], format: OutputFormat, region: &str) -> Result<String> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml_ng::to_string(images).context("Failed to encode images as YAML")
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(images).context("Failed to encode images as JSON")
        }
        OutputFormat::Short | OutputFormat::Wide => {
            let mut rows: Vec<WideImageRow> = images
                .iter()
                .map(|image| WideImageRow::from_image(image, region))
                .collect();
            rows.sort_by_key(|row| row.name.to_lowercase());

            let mut table = if format == OutputFormat::Wide {
                Table::new(rows)
            } else {
                Table::new(rows.into_iter().map(ImageRow::from))
            };
            table.with(Style::blank());
            Ok(table.to_string())
        }
    }
}

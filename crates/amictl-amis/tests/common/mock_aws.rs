//! In-memory SSM, EC2 and EKS stand-ins
//!
//! `MockAws` holds canned parameters, images and versions and records every
//! call so tests can assert on what the resolver asked for.

use amictl_amis::{ClusterVersionSource, Image, ImageCatalog, Parameter, ParameterStore, Resolver};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    parameters: HashMap<String, String>,
    images: Vec<Image>,
    versions: Vec<String>,
    fail: Option<&'static str>,
    calls: Vec<String>,
}

/// Mock AWS account shared by all three collaborators
#[derive(Clone, Default)]
pub struct MockAws {
    state: Arc<Mutex<State>>,
}

impl MockAws {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(self, name: &str, image_id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .parameters
            .insert(name.to_string(), image_id.to_string());
        self
    }

    pub fn with_image(self, image: Image) -> Self {
        self.state.lock().unwrap().images.push(image);
        self
    }

    pub fn with_versions(self, versions: &[&str]) -> Self {
        self.state.lock().unwrap().versions = versions.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Make the named operation fail (`ssm`, `ec2` or `eks`)
    pub fn failing(self, service: &'static str) -> Self {
        self.state.lock().unwrap().fail = Some(service);
        self
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(
            Box::new(self.clone()),
            Box::new(self.clone()),
            Box::new(self.clone()),
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn was_called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(prefix))
    }

    fn record(&self, service: &'static str, call: String) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.fail {
            Some(failing) if failing == service => Err(anyhow!("{} unavailable", service)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ParameterStore for MockAws {
    async fn get_parameters(&self, names: &[String]) -> Result<Vec<Parameter>> {
        self.record("ssm", format!("get_parameters({})", names.join(",")))?;
        let state = self.state.lock().unwrap();
        Ok(names
            .iter()
            .filter_map(|name| {
                state
                    .parameters
                    .get(name)
                    .map(|value| Parameter::new(name.clone(), value.clone()))
            })
            .collect())
    }
}

#[async_trait]
impl ImageCatalog for MockAws {
    async fn describe_images(&self, ids: &[String], include_deprecated: bool) -> Result<Vec<Image>> {
        self.record(
            "ec2",
            format!(
                "describe_images({}, include_deprecated={})",
                ids.join(","),
                include_deprecated
            ),
        )?;
        let state = self.state.lock().unwrap();
        Ok(state
            .images
            .iter()
            .filter(|image| ids.contains(&image.image_id))
            .filter(|image| include_deprecated || !image.deprecated)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ClusterVersionSource for MockAws {
    async fn supported_versions(&self) -> Result<Vec<String>> {
        self.record("eks", "supported_versions()".to_string())?;
        Ok(self.state.lock().unwrap().versions.clone())
    }
}

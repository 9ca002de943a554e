// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of software packages and instance types against the farm catalog.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use sgf_adapters::RenderFarm;
use sgf_core::{InstanceType, Package};

/// A package requested by product name and version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSpec {
    pub product: String,
    pub version: String,
    /// Required for plugins: the host product they load into.
    #[serde(default)]
    pub host_product: Option<String>,
}

impl PackageSpec {
    pub fn host(product: impl Into<String>, version: impl Into<String>) -> Self {
        Self { product: product.into(), version: version.into(), host_product: None }
    }

    pub fn plugin(product: impl Into<String>, version: impl Into<String>, host: impl Into<String>) -> Self {
        Self { product: product.into(), version: version.into(), host_product: Some(host.into()) }
    }

    fn matches(&self, package: &Package) -> bool {
        package.product == self.product
            && version_matches(&self.version, &package.version)
            && match &self.host_product {
                Some(host) => package.host_product.as_deref() == Some(host.as_str()),
                None => true,
            }
    }
}

impl std::fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.product, self.version)?;
        if let Some(host) = &self.host_product {
            write!(f, " (plugin for {host})")?;
        }
        Ok(())
    }
}

/// Version components; `.` and `v` both separate (`11.3v5` → 11, 3, 5).
fn version_parts(version: &str) -> Vec<&str> {
    version.split(|c: char| c == '.' || c == 'v').filter(|part| !part.is_empty()).collect()
}

/// `wanted` equals `candidate` or is a leading run of its components.
fn version_matches(wanted: &str, candidate: &str) -> bool {
    let wanted = version_parts(wanted);
    let candidate = version_parts(candidate);
    !wanted.is_empty() && candidate.starts_with(&wanted)
}

/// A snapshot of the farm's package and instance catalog
#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
    packages: Vec<Package>,
    instance_types: Vec<InstanceType>,
}

impl PackageRegistry {
    pub fn new(packages: Vec<Package>, instance_types: Vec<InstanceType>) -> Self {
        Self { packages, instance_types }
    }

    pub async fn fetch(farm: &dyn RenderFarm) -> Result<Self, EngineError> {
        let packages = farm.packages().await?;
        let instance_types = farm.instance_types().await?;
        tracing::debug!(packages = packages.len(), instance_types = instance_types.len(), "fetched farm catalog");
        Ok(Self::new(packages, instance_types))
    }

    /// An exact version match wins over a prefix match.
    pub fn resolve(&self, spec: &PackageSpec) -> Result<&Package, EngineError> {
        let mut candidates = self.packages.iter().filter(|p| spec.matches(p)).peekable();
        let first = candidates.peek().copied();
        candidates
            .find(|p| version_parts(&p.version) == version_parts(&spec.version))
            .or(first)
            .ok_or_else(|| EngineError::UnresolvedPackage(spec.to_string()))
    }

    pub fn resolve_all(&self, specs: &[PackageSpec]) -> Result<Vec<Package>, EngineError> {
        specs.iter().map(|spec| self.resolve(spec).cloned()).collect()
    }

    /// Machine name of the instance type with the given description.
    pub fn resolve_instance_type(&self, label: &str) -> Result<&str, EngineError> {
        self.instance_types
            .iter()
            .find(|instance| instance.description == label)
            .map(|instance| instance.name.as_str())
            .ok_or_else(|| EngineError::UnresolvedInstanceType(label.to_string()))
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

//! Packages: one import batch, and the guarded file loader.
//!
//! The loader performs the size/substrate pre-validation that import layers
//! owe the validator: oversized, NUL-bearing or non-UTF-8 documents never
//! reach deserialization.

use crate::item::{InstanceRef, Item};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_MAX_PACKAGE_BYTES: usize = 16 * 1024 * 1024;

/// A flat, ordered collection of items plus package-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Package {
    #[serde(alias = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(alias = "@graph")]
    pub graph: Vec<Item>,
}

impl Package {
    pub fn from_json_str(text: &str) -> Result<Self, PackageError> {
        serde_json::from_str(text).map_err(|e| PackageError::Parse(e.to_string()))
    }

    /// Instances (anEntity / aRelationship) with their graph index.
    pub fn instances(&self) -> impl Iterator<Item = (usize, InstanceRef<'_>)> {
        self.graph
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.as_instance().map(|instance| (index, instance)))
    }
}

/// Import limits applied before deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageLimits {
    pub max_package_bytes: usize,
}

impl Default for PackageLimits {
    fn default() -> Self {
        Self {
            max_package_bytes: DEFAULT_MAX_PACKAGE_BYTES,
        }
    }
}

/// A package together with provenance of the document it came from.
#[derive(Debug, Clone)]
pub struct LoadedPackage {
    pub package: Package,
    /// `sha256:<hex>` over the raw document bytes.
    pub digest: String,
    pub byte_len: usize,
}

/// Read a package document from any reader.
pub fn read_package(
    reader: impl Read,
    limits: PackageLimits,
) -> Result<LoadedPackage, PackageError> {
    let mut bytes = Vec::new();
    let cap = u64::try_from(limits.max_package_bytes)
        .unwrap_or(u64::MAX)
        .saturating_add(1);
    reader
        .take(cap)
        .read_to_end(&mut bytes)
        .map_err(|e| PackageError::Io(e.to_string()))?;
    if bytes.len() > limits.max_package_bytes {
        return Err(PackageError::TooLarge {
            limit: limits.max_package_bytes,
        });
    }
    load_bytes(&bytes)
}

/// Read a package document from a file path.
pub fn read_package_from_path(
    path: impl AsRef<Path>,
    limits: PackageLimits,
) -> Result<LoadedPackage, PackageError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PackageError::Io(format!("{}: {e}", path.display())))?;
    if let Ok(metadata) = file.metadata()
        && metadata.len() > limits.max_package_bytes as u64
    {
        return Err(PackageError::TooLarge {
            limit: limits.max_package_bytes,
        });
    }
    read_package(file, limits).map_err(|error| match error {
        PackageError::Io(message) => PackageError::Io(format!("{}: {message}", path.display())),
        PackageError::Corrupt(message) => {
            PackageError::Corrupt(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

fn load_bytes(bytes: &[u8]) -> Result<LoadedPackage, PackageError> {
    if bytes.contains(&0) {
        return Err(PackageError::Corrupt("contains NUL byte(s)".to_string()));
    }
    let text = std::str::from_utf8(bytes)
        .map_err(|_| PackageError::Corrupt("contains non-UTF-8 byte sequence(s)".to_string()))?;
    let package = Package::from_json_str(text)?;
    Ok(LoadedPackage {
        package,
        digest: package_digest(bytes),
        byte_len: bytes.len(),
    })
}

/// Content digest of a package document.
pub fn package_digest(bytes: &[u8]) -> String {
    let hash = Sha256::digest(bytes);
    let hex: String = hash.iter().map(|byte| format!("{byte:02x}")).collect();
    format!("sha256:{hex}")
}

/// Errors from package loading.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("package document exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("corrupted package document: {0}")]
    Corrupt(String),

    #[error("parse error: {0}")]
    Parse(String),
}

//! Organization records returned by the model server.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One image's placement within an organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganizedImage {
    /// Absolute path of the image file.
    pub path: PathBuf,
    /// Model-assigned rating.
    pub rating: f64,
    /// Index of the cluster this image was assigned to.
    pub cluster: u32,
}

/// A clustering/rating assignment over one directory's images.
///
/// Clusters and the images within them are ordered as the model server
/// returned them. The record is what gets persisted to the per-directory
/// cache file, so the serialized form is the cache format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrganizationRecord {
    /// Ordered clusters, each an ordered sequence of images.
    pub clusters: Vec<Vec<OrganizedImage>>,
}

impl OrganizationRecord {
    /// Returns the number of clusters.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Returns the total number of images across all clusters.
    pub fn image_count(&self) -> usize {
        self.clusters.iter().map(Vec::len).sum()
    }

    /// Returns `true` if the record contains no clusters.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Iterates over all images in cluster order.
    pub fn images(&self) -> impl Iterator<Item = &OrganizedImage> {
        self.clusters.iter().flatten()
    }
}

//! Read-only view of the APT package database.
//!
//! The database is reached through the [`AptDatabase`] trait so the scanner
//! can run against fixture-backed fakes in tests. The production
//! implementation lives in [`system`] and queries the host's apt tooling.

pub mod error;
pub mod indextargets;
pub mod policy;
pub mod system;

pub use error::AptError;

use anyhow::Result;

/// One package index file known to the cache.
///
/// The `description` is the file as APT's policy listing renders it, e.g.
/// `http://deb.debian.org/debian stable/main amd64 Packages` or
/// `/var/lib/dpkg/status`. All other metadata is optional; fields the
/// queryable surface does not expose stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFile {
    pub id: usize,
    pub description: String,
    pub architecture: Option<String>,
    pub archive: Option<String>,
    pub codename: Option<String>,
    pub component: Option<String>,
    pub filename: Option<String>,
    pub index_type: Option<String>,
    pub label: Option<String>,
    pub not_automatic: Option<bool>,
    pub not_source: Option<bool>,
    pub origin: Option<String>,
    pub site: Option<String>,
    pub size: Option<u64>,
    pub version: Option<String>,
}

/// Source-list entry resolved for a package file.
///
/// Not every file has one: the dpkg status pseudo-file is part of the cache
/// but comes from no configured source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIndex {
    pub description: String,
    /// Whether the index was cryptographically verified.
    pub trusted: bool,
}

/// Interface over the package cache, policy and source list.
pub trait AptDatabase {
    /// Origin files backing the candidate version of `package`, in the
    /// order the backend reports them.
    fn candidate_origins(&self, package: &str) -> Result<Vec<PackageFile>>;

    /// Resolve a package file back to its source-list entry, if it has one.
    fn find_index(&self, file: &PackageFile) -> Option<SourceIndex>;

    /// Pin priority of a package file. Files unknown to the policy report 0.
    fn priority(&self, file: &PackageFile) -> i32;

    /// Every package file known to the cache.
    fn all_files(&self) -> &[PackageFile];
}

//! System-backed [`AptDatabase`] implementation.
//!
//! Builds the package file table by joining two read-only queries against
//! the host's apt tooling: `apt-cache policy` for the file listing with pin
//! priorities and release tags, and `apt-get indextargets` for the trusted
//! flag and on-disk metadata of files that come from a configured source.
//! Candidate origins are fetched per package with `apt-cache policy <pkg>`.

use std::collections::HashMap;
use std::fs;

use anyhow::{Context, Result};
use duct::cmd;

use crate::apt::indextargets::parse_index_targets;
use crate::apt::policy::{CandidateReport, parse_candidate_report, parse_file_listing};
use crate::apt::{AptDatabase, AptError, PackageFile, SourceIndex};

const STATUS_FILE: &str = "/var/lib/dpkg/status";

pub struct SystemApt {
    files: Vec<PackageFile>,
    by_description: HashMap<String, usize>,
    priorities: HashMap<String, i32>,
    indexes: HashMap<String, SourceIndex>,
}

impl SystemApt {
    /// Query the host database. Fails when the apt tooling is missing or
    /// one of the invocations errors.
    pub fn load() -> Result<Self> {
        which::which("apt-cache").map_err(|_| AptError::ToolMissing("apt-cache"))?;
        which::which("apt-get").map_err(|_| AptError::ToolMissing("apt-get"))?;

        let listing = run_apt("apt-cache", &["policy"])?;
        let targets = run_apt("apt-get", &["indextargets"])?;
        Self::from_output(&listing, &targets)
    }

    /// Build the database from captured command output.
    pub fn from_output(listing: &str, targets: &str) -> Result<Self> {
        let entries = parse_file_listing(listing).context("parsing apt-cache policy listing")?;

        let mut indexes = HashMap::new();
        let mut metadata = HashMap::new();
        for target in parse_index_targets(targets) {
            indexes.insert(
                target.description.clone(),
                SourceIndex {
                    description: target.description.clone(),
                    trusted: target.trusted,
                },
            );
            metadata.insert(target.description.clone(), target);
        }

        let mut files = Vec::with_capacity(entries.len());
        let mut by_description = HashMap::new();
        let mut priorities = HashMap::new();
        for (id, entry) in entries.into_iter().enumerate() {
            let target = metadata.get(&entry.description);

            let filename = target
                .and_then(|t| t.filename.clone())
                .or_else(|| entry.description.starts_with('/').then(|| entry.description.clone()));
            let size = filename.as_deref().and_then(|path| {
                fs::metadata(path).ok().map(|meta| meta.len())
            });

            priorities.insert(entry.description.clone(), entry.priority);
            by_description.insert(entry.description.clone(), id);
            files.push(PackageFile {
                id,
                index_type: index_type_for(&entry.description),
                architecture: entry.architecture,
                archive: entry.archive,
                codename: entry.codename.or_else(|| target.and_then(|t| t.codename.clone())),
                component: entry.component,
                filename,
                label: entry.label,
                not_automatic: None,
                not_source: None,
                origin: entry.origin,
                site: entry.site.or_else(|| target.and_then(|t| t.site.clone())),
                size,
                version: entry.version,
                description: entry.description,
            });
        }

        Ok(Self {
            files,
            by_description,
            priorities,
            indexes,
        })
    }

    /// Map a parsed per-package report onto the file table. Origins the
    /// table does not know are carried through as bare files.
    pub fn origins_for_report(&self, report: &CandidateReport) -> Vec<PackageFile> {
        report
            .origins
            .iter()
            .map(|origin| match self.by_description.get(&origin.description) {
                Some(&id) => self.files[id].clone(),
                None => PackageFile {
                    id: self.files.len(),
                    description: origin.description.clone(),
                    ..Default::default()
                },
            })
            .collect()
    }
}

impl AptDatabase for SystemApt {
    fn candidate_origins(&self, package: &str) -> Result<Vec<PackageFile>> {
        let output = run_apt("apt-cache", &["policy", package])?;
        let report = parse_candidate_report(package, &output)?;
        Ok(self.origins_for_report(&report))
    }

    fn find_index(&self, file: &PackageFile) -> Option<SourceIndex> {
        self.indexes.get(&file.description).cloned()
    }

    fn priority(&self, file: &PackageFile) -> i32 {
        self.priorities.get(&file.description).copied().unwrap_or(0)
    }

    fn all_files(&self) -> &[PackageFile] {
        &self.files
    }
}

fn index_type_for(description: &str) -> Option<String> {
    if description == STATUS_FILE {
        Some("Debian dpkg status file".to_string())
    } else if description.ends_with(" Packages") {
        Some("Debian Package Index".to_string())
    } else if description.ends_with(" Sources") {
        Some("Debian Source Index".to_string())
    } else {
        None
    }
}

fn run_apt(program: &str, args: &[&str]) -> Result<String, AptError> {
    cmd(program, args)
        .env("LC_ALL", "C")
        .read()
        .map_err(|e| AptError::CommandFailed {
            command: format!("{} {}", program, args.join(" ")),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"Package files:
 100 /var/lib/dpkg/status
     release a=now
 500 http://deb.debian.org/debian unstable/main amd64 Packages
     release o=Debian,a=unstable,n=sid,l=Debian,c=main,b=amd64
     origin deb.debian.org
 990 http://deb.debian.org/debian stable/main amd64 Packages
     release v=13.1,o=Debian,a=stable,n=trixie,l=Debian,c=main,b=amd64
     origin deb.debian.org
Pinned packages:
"#;

    const TARGETS: &str = r#"MetaKey: main/binary-amd64/Packages
Description: http://deb.debian.org/debian stable/main amd64 Packages
Identifier: Packages
Site: deb.debian.org
Suite: stable
Codename: trixie
Trusted: yes

MetaKey: main/binary-amd64/Packages
Description: http://deb.debian.org/debian unstable/main amd64 Packages
Identifier: Packages
Site: deb.debian.org
Suite: unstable
Codename: sid
Trusted: no
"#;

    fn database() -> SystemApt {
        SystemApt::from_output(LISTING, TARGETS).unwrap()
    }

    #[test]
    fn test_file_table_join() {
        let db = database();
        assert_eq!(db.all_files().len(), 3);

        let status = &db.all_files()[0];
        assert_eq!(status.archive.as_deref(), Some("now"));
        assert_eq!(status.filename.as_deref(), Some(STATUS_FILE));
        assert_eq!(status.index_type.as_deref(), Some("Debian dpkg status file"));
        assert!(db.find_index(status).is_none());

        let stable = &db.all_files()[2];
        assert_eq!(stable.id, 2);
        assert_eq!(stable.archive.as_deref(), Some("stable"));
        assert_eq!(stable.codename.as_deref(), Some("trixie"));
        assert_eq!(stable.index_type.as_deref(), Some("Debian Package Index"));
        assert_eq!(db.priority(stable), 990);
        assert!(db.find_index(stable).is_some_and(|index| index.trusted));
    }

    #[test]
    fn test_untrusted_index_resolves_as_untrusted() {
        let db = database();
        let unstable = &db.all_files()[1];
        let index = db.find_index(unstable).unwrap();
        assert!(!index.trusted);
    }

    #[test]
    fn test_origins_for_report() {
        let db = database();
        let report = parse_candidate_report(
            "base-files",
            r#"base-files:
  Installed: 13.1
  Candidate: 13.1
  Version table:
 *** 13.1 990
        990 http://deb.debian.org/debian stable/main amd64 Packages
        100 /var/lib/dpkg/status
"#,
        )
        .unwrap();

        let origins = db.origins_for_report(&report);
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0].archive.as_deref(), Some("stable"));
        assert_eq!(origins[1].description, STATUS_FILE);
    }

    #[test]
    fn test_unknown_origin_reports_zero_priority() {
        let db = database();
        let file = PackageFile {
            description: "http://unknown.example.org/debian stable/main amd64 Packages".to_string(),
            ..Default::default()
        };
        assert_eq!(db.priority(&file), 0);
        assert!(db.find_index(&file).is_none());
    }
}

//! Parsers for `apt-cache policy` output.
//!
//! Two forms are consumed: the bare invocation's `Package files:` listing,
//! which enumerates every index file the cache knows together with its pin
//! priority and release tags, and the per-package report, which names the
//! candidate version and the origin files backing each version. Both are
//! parsed line by line; the invocations run with `LC_ALL=C` so the layout
//! is stable.

use crate::apt::AptError;

/// One entry of the `Package files:` listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileEntry {
    pub priority: i32,
    pub description: String,
    pub architecture: Option<String>,
    pub archive: Option<String>,
    pub codename: Option<String>,
    pub component: Option<String>,
    pub label: Option<String>,
    pub origin: Option<String>,
    pub site: Option<String>,
    pub version: Option<String>,
}

/// One origin line of a per-package version table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionOrigin {
    pub priority: i32,
    pub description: String,
}

/// Candidate version of a package plus the origin files backing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateReport {
    pub candidate: String,
    pub origins: Vec<VersionOrigin>,
}

/// Parse the `Package files:` section of a bare `apt-cache policy` call.
pub fn parse_file_listing(output: &str) -> Result<Vec<FileEntry>, AptError> {
    let mut entries: Vec<FileEntry> = Vec::new();
    let mut in_files = false;

    for line in output.lines() {
        if line.starts_with("Package files:") {
            in_files = true;
            continue;
        }
        if !in_files {
            continue;
        }
        // Any other unindented header ends the section.
        if !line.starts_with(' ') {
            break;
        }

        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("release ") {
            if let Some(entry) = entries.last_mut() {
                apply_release_tags(entry, rest);
            }
        } else if let Some(rest) = trimmed.strip_prefix("origin ") {
            if let Some(entry) = entries.last_mut() {
                entry.site = Some(rest.trim().to_string());
            }
        } else if let Some((prio, description)) = split_priority_line(trimmed) {
            entries.push(FileEntry {
                priority: prio,
                description: description.to_string(),
                ..Default::default()
            });
        } else {
            return Err(AptError::MalformedOutput {
                command: "apt-cache policy".to_string(),
                message: format!("unparseable package file line: {trimmed:?}"),
            });
        }
    }

    Ok(entries)
}

/// Parse a per-package `apt-cache policy <package>` report.
///
/// Only the origin lines listed under the candidate version are kept; other
/// versions in the table are irrelevant to the caller.
pub fn parse_candidate_report(package: &str, output: &str) -> Result<CandidateReport, AptError> {
    let mut candidate: Option<String> = None;
    let mut in_table = false;
    let mut in_candidate_section = false;
    let mut origins: Vec<VersionOrigin> = Vec::new();

    for line in output.lines() {
        let trimmed = line.trim_start();

        if !in_table {
            if let Some(value) = trimmed.strip_prefix("Candidate:") {
                candidate = Some(value.trim().to_string());
            } else if trimmed.starts_with("Version table:") {
                in_table = true;
            }
            continue;
        }

        // Version headers sit at shallow indentation (` *** ` marks the
        // installed version); origin lines are indented further.
        let indent = line.len() - trimmed.len();
        let is_header = line.starts_with(" *** ") || (indent <= 5 && !trimmed.is_empty());
        if is_header {
            let version = trimmed
                .trim_start_matches("*** ")
                .split_whitespace()
                .next()
                .unwrap_or("");
            in_candidate_section = Some(version) == candidate.as_deref();
        } else if in_candidate_section {
            if let Some((prio, description)) = split_priority_line(trimmed) {
                origins.push(VersionOrigin {
                    priority: prio,
                    description: description.to_string(),
                });
            }
        }
    }

    match candidate {
        Some(version) if version != "(none)" => Ok(CandidateReport {
            candidate: version,
            origins,
        }),
        _ => Err(AptError::NoCandidate(package.to_string())),
    }
}

/// Split `500 http://... stable/main amd64 Packages` into priority and
/// description. Returns `None` when the line does not start with a number.
fn split_priority_line(line: &str) -> Option<(i32, &str)> {
    let (first, rest) = line.split_once(' ')?;
    let priority = first.parse::<i32>().ok()?;
    Some((priority, rest.trim_start()))
}

fn apply_release_tags(entry: &mut FileEntry, tags: &str) {
    for tag in tags.split(',') {
        let Some((key, value)) = tag.split_once('=') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "a" => entry.archive = Some(value.to_string()),
            "b" => entry.architecture = Some(value.to_string()),
            "c" => entry.component = Some(value.to_string()),
            "l" => entry.label = Some(value.to_string()),
            "n" => entry.codename = Some(value.to_string()),
            "o" => entry.origin = Some(value.to_string()),
            "v" => entry.version = Some(value.to_string()),
            _ => {}
        }
    }
}

//! Default release detection.
//!
//! The default release is the archive (stable, testing or unstable) whose
//! origin has the highest pin priority among the trusted origins backing
//! the candidate version of the baseline package.

pub mod dump;

use anyhow::Result;
use colored::Colorize;

use crate::apt::AptDatabase;

/// Package whose candidate origins decide the default release. Present on
/// every Debian system, so every configured archive offers it.
pub const BASELINE_PACKAGE: &str = "base-files";

/// Archive names the scanner recognizes as releases.
pub const RELEASE_ARCHIVES: [&str; 3] = ["stable", "testing", "unstable"];

/// Scan the candidate origins of the baseline package and return the
/// recognized archive with the highest pin priority.
///
/// Origins without a source-list entry, untrusted origins and origins
/// outside [`RELEASE_ARCHIVES`] are skipped with a note on stderr. The
/// comparison is strictly greater-than, so the first origin seen at the
/// maximum priority wins ties, and the initial maximum of -1 keeps
/// negative priorities from ever winning.
pub fn find_default_release(db: &dyn AptDatabase) -> Result<Option<String>> {
    let origins = db.candidate_origins(BASELINE_PACKAGE)?;

    let mut highest_prio = -1;
    let mut highest_archive: Option<String> = None;

    for file in &origins {
        eprintln!("processing: {}", file.description);

        let index = match db.find_index(file) {
            Some(index) => index,
            None => {
                eprintln!("  no source-list entry, {}", "skipping".yellow());
                continue;
            }
        };
        if !index.trusted {
            eprintln!("  index is not trusted, {}", "skipping".yellow());
            continue;
        }

        let archive = match file.archive.as_deref() {
            Some(name) if RELEASE_ARCHIVES.contains(&name) => name,
            Some(name) => {
                eprintln!("  archive {} is not a release archive, {}", name, "skipping".yellow());
                continue;
            }
            None => {
                eprintln!("  origin has no archive name, {}", "skipping".yellow());
                continue;
            }
        };

        let priority = db.priority(file);
        if priority > highest_prio {
            highest_prio = priority;
            highest_archive = Some(archive.to_string());
        }
    }

    Ok(highest_archive)
}

//! Failure diagnostics: dump every package file the cache knows.

use colored::Colorize;

use crate::apt::{AptDatabase, PackageFile};

/// Print every known package file with its metadata and pin priority to
/// stderr. Called when no trusted stable, testing or unstable origin was
/// found, so the operator can see what the cache actually contains.
pub fn print_package_files(db: &dyn AptDatabase) {
    eprintln!(
        "{}",
        "no trusted stable, testing or unstable archive found".red().bold()
    );
    for file in db.all_files() {
        eprintln!("========================");
        print_file(file);
        eprintln!("priority: {}", db.priority(file));
    }
}

fn print_file(file: &PackageFile) {
    eprintln!("architecture: {}", text(&file.architecture));
    eprintln!("archive: {}", text(&file.archive));
    eprintln!("codename: {}", text(&file.codename));
    eprintln!("component: {}", text(&file.component));
    eprintln!("filename: {}", text(&file.filename));
    eprintln!("id: {}", file.id);
    eprintln!("index_type: {}", text(&file.index_type));
    eprintln!("label: {}", text(&file.label));
    eprintln!("not_automatic: {}", flag(file.not_automatic));
    eprintln!("not_source: {}", flag(file.not_source));
    eprintln!("origin: {}", text(&file.origin));
    eprintln!("site: {}", text(&file.site));
    eprintln!(
        "size: {}",
        file.size.map_or_else(|| "none".to_string(), |s| s.to_string())
    );
    eprintln!("version: {}", text(&file.version));
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("none")
}

fn flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "true",
        Some(false) => "false",
        None => "none",
    }
}

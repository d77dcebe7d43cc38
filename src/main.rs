use anyhow::Result;
use clap::Parser;

use apt_default_release::apt::system::SystemApt;
use apt_default_release::release;

/// Print the APT release archive (stable, testing or unstable) with the
/// highest installation priority for the base system.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();

    match run() {
        Ok(Some(archive)) => println!("{}", archive),
        Ok(None) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<Option<String>> {
    let db = SystemApt::load()?;
    let archive = release::find_default_release(&db)?;
    match &archive {
        Some(name) => eprintln!("highest archive priority: {}", name),
        None => release::dump::print_package_files(&db),
    }
    Ok(archive)
}

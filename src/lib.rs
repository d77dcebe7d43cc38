//! Query the local APT database for the release archive that currently has
//! the highest installation priority for the base system.

pub mod apt;
pub mod release;

//! Clap derive structures for the `auprint` CLI.

use clap::Parser;

/// auprint -- install AU network printers into CUPS
#[derive(Debug, Parser)]
#[command(
    name = "auprint",
    version,
    about = "Manages installed printers at AU",
    long_about = "Install printers from the AU print server as local CUPS queues.\n\n\
        Without flags, asks for a building and installs one of its printers.\n\
        Credentials are prompted for once and remembered between runs."
)]
pub struct Cli {
    /// Update passwords used for printers
    #[arg(long)]
    pub update_passwords: bool,
}

//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the order demo
#[derive(Debug, Parser)]
pub struct DemoOrderArgs {
    /// Fixture set to use for the menu
    #[clap(short, long, default_value = "pizzeria")]
    pub fixture: String,

    /// Directory holding the persisted cart slot (a temporary directory when omitted)
    #[clap(short, long)]
    pub storage: Option<PathBuf>,

    /// Search term to filter the menu before ordering
    #[clap(long)]
    pub search: Option<String>,
}

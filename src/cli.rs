//! Command Line Interface

use std::path::PathBuf;

use clap::Parser;

use crate::models::config::PortalConfig;

#[derive(Clone, Debug, Parser)]
#[command(name = "payslip-downloader", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ~/.payslip4u-downloader.json)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,
}

impl Cli {
    /// Apply command line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut PortalConfig) {
        if self.headed {
            config.browser.headless = false;
        }
    }
}

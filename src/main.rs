// Payslip Downloader - command line entry point

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use payslip_downloader::cli::Cli;
use payslip_downloader::storage::ConfigService;
use payslip_downloader::utils::logging::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Config problems abort before any browser is launched.
    let mut config = match ConfigService::new(cli.config.as_deref()) {
        Ok(service) => service.into_config(),
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut config);

    match payslip_downloader::run(&config).await {
        Ok(summary) => {
            // Per-document failures were already logged as they happened.
            info!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

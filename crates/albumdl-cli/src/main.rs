use albumdl_core::logging;
use albumdl_core::DownloadError;

mod cli;

use crate::cli::CliCommand;

/// Exit status after Ctrl-C, as shells report for SIGINT.
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        if err
            .downcast_ref::<DownloadError>()
            .is_some_and(DownloadError::is_cancelled)
        {
            eprintln!("albumdl: cancelled");
            std::process::exit(EXIT_CANCELLED);
        }
        eprintln!("albumdl error: {:#}", err);
        std::process::exit(1);
    }
}

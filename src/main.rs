//! ci-triage binary entry point.

use ci_triage::cli::{self, Cli, Commands};
use ci_triage::config::TriageConfig;
use ci_triage::logs::LogFetcher;
use ci_triage::provider::create_client;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "ci_triage=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> ci_triage::error::Result<()> {
    let mut stdout = std::io::stdout();

    match cli.command_or_default() {
        Commands::Analyze(args) => {
            let config = TriageConfig::from_env()?;
            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("interrupt received, cancelling chat");
                    on_interrupt.cancel();
                }
            });
            cli::run_analyze(&args, config, create_client, cancel, &mut stdout).await?;
        }
        Commands::FetchLogs(args) => {
            cli::run_fetch_logs(&args, &LogFetcher::new(), &mut stdout).await?;
        }
    }
    Ok(())
}

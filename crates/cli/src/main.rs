//! Community Probe CLI - checks that a community exists and is enabled
//!
//! Usage: `community-probe communities exists -n <name> -u <org> [-w <minutes>] [--json]`

mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use community_probe_core::application::constants::DEFAULT_TIMELIMIT_MINUTES;
use community_probe_core::application::{cancel_channel, poll_until_true, ExistenceProbe, PollConfig};
use community_probe_infra_http::{create_client, load_settings, HttpCommunitySource};
use output::{ErrorReport, OrgContext};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(name = "community-probe")]
#[command(about = "Check whether a community exists and is enabled", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file with registered orgs
    #[arg(long, global = true, env = "COMMUNITY_PROBE_CONFIG")]
    config: Option<PathBuf>,

    /// Format output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Community commands
    Communities {
        #[command(subcommand)]
        command: CommunitiesCommand,
    },
}

#[derive(Subcommand)]
enum CommunitiesCommand {
    /// Wait until a community exists and is enabled
    Exists(ExistsArgs),
}

#[derive(Args, Debug)]
struct ExistsArgs {
    /// Name of the community
    #[arg(short = 'n', long)]
    name: String,

    /// Maximum time to wait, in minutes
    #[arg(short = 'w', long, default_value_t = DEFAULT_TIMELIMIT_MINUTES)]
    timelimit: u64,

    /// Username or alias of the target org
    #[arg(short = 'u', long = "target-org")]
    target_org: String,

    /// Seconds between checks (default: the configured poll interval)
    #[arg(long)]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    let json = cli.json;
    match run(cli).await {
        Ok(exists) => {
            println!("{}", output::render_success(exists, json));
            ExitCode::SUCCESS
        }
        Err(err) => {
            let report = ErrorReport::from_error(&err);
            let rendered = output::render_error(&report, json);
            if json {
                println!("{}", rendered);
            } else {
                eprintln!("{}", rendered);
            }
            ExitCode::from(report.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Communities {
            command: CommunitiesCommand::Exists(args),
        } => exists(args, cli.config.as_deref()).await,
    }
}

async fn exists(args: ExistsArgs, config_path: Option<&Path>) -> Result<bool> {
    // Configuration errors surface before any polling
    let settings = load_settings(config_path)?;
    let connection = settings.resolve(&args.target_org)?;

    let interval = args
        .interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| settings.poll_interval());
    let deadline = Duration::from_secs(args.timelimit.saturating_mul(60));

    debug!(
        timelimit_minutes = args.timelimit,
        interval_secs = interval.as_secs(),
        "Polling timeout configured"
    );

    let org_context = OrgContext {
        username: connection.username.clone(),
        org_id: connection.org_id.clone(),
        name: args.name.clone(),
    };

    let client = create_client(settings.request_timeout())?;
    let source = Arc::new(HttpCommunitySource::new(client, connection));
    let probe = ExistenceProbe::new(source);

    let (cancel_tx, cancel_rx) = cancel_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, canceling community check");
            cancel_tx.cancel();
        }
    });

    let config = PollConfig::new(args.name, interval, deadline);
    poll_until_true(&probe, &config, cancel_rx)
        .await
        .context(org_context)
}

//! hubcast — submit signed governance actions to a hub.
//!
//! Exit codes: 0 on an accepted submission, 1 when every endpoint and
//! attempt is exhausted, 2 on configuration errors. The receipt goes to
//! stdout as a single JSON line; all diagnostics go to stderr.

mod config;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use hubcast_engine::SubmissionEngine;
use hubcast_hub::HubClient;
use hubcast_payload::{ProposalBody, ProposalParams, SignedEnvelope, SpaceSettings};
use hubcast_types::{SubmissionOutcome, SubmissionRequest};

use crate::config::SubmitConfig;

#[derive(Parser)]
#[command(name = "hubcast", about = "Submit signed governance actions to a hub")]
struct Cli {
    /// Primary hub endpoint URL.
    #[arg(long, env = "HUBCAST_PRIMARY_URL")]
    primary_url: Option<String>,

    /// Secondary (fallback) hub endpoint URL.
    #[arg(long, env = "HUBCAST_SECONDARY_URL")]
    secondary_url: Option<String>,

    /// Attempt cycles before giving up.
    #[arg(long, env = "HUBCAST_MAX_ATTEMPTS")]
    max_attempts: Option<u32>,

    /// Delay before the second attempt cycle, in milliseconds.
    #[arg(long, env = "HUBCAST_INITIAL_DELAY_MS")]
    initial_delay_ms: Option<u64>,

    /// Multiplier applied to the delay after each failed cycle.
    #[arg(long, env = "HUBCAST_BACKOFF_MULTIPLIER")]
    backoff_multiplier: Option<u32>,

    /// Log level when RUST_LOG is unset: "trace", "debug", "info",
    /// "warn", "error".
    #[arg(long, default_value = "info", env = "HUBCAST_LOG_LEVEL")]
    log_level: String,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Submit a proposal to the hub.
    Proposal(ProposalArgs),
    /// Update a space's settings on the hub.
    Space(SpaceArgs),
}

#[derive(clap::Args)]
struct ProposalArgs {
    /// Target space (e.g. gov.example.eth).
    #[arg(long, env = "HUBCAST_SPACE")]
    space: String,

    /// Proposal title.
    #[arg(long)]
    title: String,

    /// Abstract section of the proposal body.
    #[arg(long = "abstract")]
    abstract_text: String,

    /// Background section of the proposal body.
    #[arg(long, default_value = "")]
    background: String,

    /// Additional section of the proposal body.
    #[arg(long, default_value = "")]
    additional: String,

    /// Proposal choice (repeatable). Defaults to Yes/No/Abstain.
    #[arg(long = "choice")]
    choices: Vec<String>,

    /// Voting window start (unix seconds). Defaults to now.
    #[arg(long)]
    start: Option<u64>,

    /// Voting window length in hours.
    #[arg(long, default_value_t = 48)]
    duration_hours: u64,

    /// Block number the voting power snapshot is taken at.
    #[arg(long)]
    snapshot: u64,

    /// Chain id of the space's network.
    #[arg(long, default_value = "1")]
    network: String,

    /// App tag recorded with the message.
    #[arg(long, default_value = "hubcast")]
    app: String,

    /// Account that signed the message.
    #[arg(long, env = "HUBCAST_ADDRESS")]
    address: String,

    /// 0x-hex signature over the typed message.
    #[arg(long, env = "HUBCAST_SIGNATURE")]
    sig: String,
}

#[derive(clap::Args)]
struct SpaceArgs {
    /// Target space (e.g. gov.example.eth).
    #[arg(long, env = "HUBCAST_SPACE")]
    space: String,

    /// Path to the space settings JSON file.
    #[arg(long)]
    settings: PathBuf,

    /// Override the quorum value from the settings file.
    #[arg(long)]
    quorum: Option<u64>,

    /// Account that signed the message.
    #[arg(long, env = "HUBCAST_ADDRESS")]
    address: String,

    /// 0x-hex signature over the typed message.
    #[arg(long, env = "HUBCAST_SIGNATURE")]
    sig: String,
}

/// Exit code for configuration faults (nothing was submitted).
const EXIT_CONFIG: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    hubcast_utils::init_tracing(&cli.log_level);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let (endpoints, policy) = match config.endpoints().and_then(|endpoints| {
        let policy = config.retry_policy()?;
        Ok((endpoints, policy))
    }) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let request = match build_request(&cli.command) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let client = match HubClient::new() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let engine = SubmissionEngine::new(client);
    match engine.submit(&request, &endpoints, &policy).await {
        SubmissionOutcome::Success(receipt) => {
            // Machine-parseable ack for a calling orchestrator.
            println!(
                "{}",
                serde_json::to_string(&receipt).expect("receipt serializes to JSON")
            );
            ExitCode::SUCCESS
        }
        SubmissionOutcome::Failure(e) => {
            tracing::error!("submission failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Merge the optional config file with CLI flags and env vars; flags win.
fn load_config(cli: &Cli) -> Result<SubmitConfig, config::ConfigError> {
    let base = match &cli.config {
        Some(path) => SubmitConfig::from_toml_file(&path.to_string_lossy())?,
        None => SubmitConfig::default(),
    };

    Ok(SubmitConfig {
        primary_url: cli.primary_url.clone().or(base.primary_url),
        secondary_url: cli.secondary_url.clone().or(base.secondary_url),
        max_attempts: cli.max_attempts.unwrap_or(base.max_attempts),
        initial_delay_ms: cli.initial_delay_ms.unwrap_or(base.initial_delay_ms),
        backoff_multiplier: cli.backoff_multiplier.unwrap_or(base.backoff_multiplier),
        max_delay_ms: base.max_delay_ms,
        log_level: cli.log_level.clone(),
    })
}

/// Assemble the signed submission request for the chosen action.
fn build_request(command: &Command) -> anyhow::Result<SubmissionRequest> {
    match command {
        Command::Proposal(args) => {
            let body = ProposalBody {
                abstract_text: args.abstract_text.clone(),
                background: args.background.clone(),
                additional: args.additional.clone(),
            };
            let start = args.start.unwrap_or_else(unix_now);

            let mut params = ProposalParams::new(
                &args.space,
                &args.title,
                body,
                start,
                args.snapshot,
                &args.network,
                &args.app,
            )
            .with_end(start + args.duration_hours * 3600);
            if !args.choices.is_empty() {
                params = params.with_choices(args.choices.clone());
            }

            let message = params.to_message()?;
            let envelope = SignedEnvelope::new(&args.address, &args.sig, message)?;
            Ok(envelope.into_request(&args.space)?)
        }
        Command::Space(args) => {
            let content = std::fs::read_to_string(&args.settings)?;
            let mut settings: SpaceSettings = serde_json::from_str(&content)?;
            if let Some(quorum) = args.quorum {
                settings = settings.with_quorum(quorum);
            }

            let message = settings.to_message(&args.space)?;
            let envelope = SignedEnvelope::new(&args.address, &args.sig, message)?;
            Ok(envelope.into_request(&args.space)?)
        }
    }
}

/// Current unix time in seconds.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_secs()
}

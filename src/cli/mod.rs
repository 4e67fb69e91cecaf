//! CLI entry point for ci-triage.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::config::TriageConfig;
use crate::error::Result;
use crate::logs::LogFetcher;
use crate::orchestrator::{ChatEvent, ChatResult, ChatState};
use crate::provider::ChatModelClient;
use crate::triage::{self, ASSISTANT_NAME, PROMPT, SYSTEM_MESSAGE};
use crate::types::{ChatMessage, ContentPart};

pub const START_BANNER: &str = "--- Starting chat with Tool Use ---";

/// Triage OpenShift CI failures with a tool-using chat model.
#[derive(Parser, Debug)]
#[command(name = "ci-triage", version, about = "Analyze CI job failures with an LLM")]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the assistant for plausible root causes (default)
    Analyze(AnalyzeArgs),
    /// Download the raw build log for a Prow job URL
    FetchLogs(FetchLogsArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct AnalyzeArgs {
    /// Model to use (overrides TRIAGE_MODEL)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Maximum assistant turns (overrides TRIAGE_MAX_TURNS)
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Per-tool timeout in seconds (overrides TRIAGE_TOOL_TIMEOUT_SECS)
    #[arg(long, value_name = "SECS")]
    pub tool_timeout: Option<u64>,

    /// Print each conversation message to stderr as it is appended
    #[arg(long)]
    pub transcript: bool,
}

impl AnalyzeArgs {
    /// Layer flag overrides on top of `config`.
    pub fn apply_to(&self, config: &mut TriageConfig) {
        if let Some(ref model) = self.model {
            config.model = model.clone();
        }
        if let Some(max_turns) = self.max_turns {
            config.max_turns = max_turns;
        }
        if let Some(secs) = self.tool_timeout {
            config.tool_timeout = Duration::from_secs(secs);
        }
    }
}

/// Arguments for the `fetch-logs` subcommand.
#[derive(Args, Debug, Clone)]
pub struct FetchLogsArgs {
    /// Prow job URL, e.g. https://prow.ci.openshift.org/job/<job>
    pub job_url: String,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The requested command; `analyze` with defaults when none was given.
    pub fn command_or_default(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Analyze(AnalyzeArgs::default()))
    }
}

/// Handle `ci-triage analyze`.
///
/// The credential is checked before `make_client` is called, so a missing
/// `API_KEY` never reaches the network layer.
pub async fn run_analyze<F, W>(
    args: &AnalyzeArgs,
    mut config: TriageConfig,
    make_client: F,
    cancel: CancellationToken,
    out: &mut W,
) -> Result<ChatResult>
where
    F: FnOnce(&TriageConfig, Option<String>) -> Result<Arc<dyn ChatModelClient>>,
    W: Write,
{
    args.apply_to(&mut config);
    config.validate()?;
    config.require_api_key()?;

    let client = make_client(&config, Some(SYSTEM_MESSAGE.to_string()))?;
    let mut orchestrator = triage::build_orchestrator(client, &config)?;
    if args.transcript {
        orchestrator = orchestrator.with_event_sink(Arc::new(print_transcript_event));
    }

    writeln!(out, "{START_BANNER}")?;
    let result = orchestrator.initiate(PROMPT, &cancel).await?;

    writeln!(out, "\n=== {ASSISTANT_NAME} Analysis ===\n")?;
    match result.state {
        ChatState::Completed => {
            writeln!(out, "{}", result.summary.as_deref().unwrap_or_default())?;
        }
        _ => {
            let reason = result
                .abort_reason
                .map(|r| r.to_string())
                .unwrap_or_else(|| result.state.to_string());
            match result.last_assistant_text() {
                Some(text) => writeln!(out, "{text}")?,
                None => writeln!(out, "(no assistant reply)")?,
            }
            writeln!(out, "\n[chat ended without a final answer: {reason}]")?;
        }
    }

    Ok(result)
}

/// Handle `ci-triage fetch-logs <JOB_URL>`.
pub async fn run_fetch_logs<W: Write>(
    args: &FetchLogsArgs,
    fetcher: &LogFetcher,
    out: &mut W,
) -> Result<()> {
    let body = fetcher.fetch(&args.job_url).await?;
    out.write_all(body.as_bytes())?;
    if !body.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

fn print_transcript_event(event: ChatEvent) {
    if let ChatEvent::MessageAppended { message } = event {
        eprintln!("{}", render_message(&message));
    }
}

/// One-block rendering of a conversation message for `--transcript`.
pub fn render_message(message: &ChatMessage) -> String {
    let speaker = match message.name {
        Some(ref name) => format!("{} ({})", name, message.role),
        None => message.role.to_string(),
    };
    let mut lines = vec![format!("[{}] {speaker}:", message.position)];
    for part in &message.content {
        match part {
            ContentPart::Text { text } => lines.push(text.clone()),
            ContentPart::ToolCall(call) => {
                lines.push(format!("-> {}({}) [{}]", call.name, call.arguments, call.id))
            }
            ContentPart::ToolResult(result) => {
                let marker = if result.is_error { "error" } else { "ok" };
                lines.push(format!("<- {} [{marker}]", result.tool_name));
                lines.push(result.content.clone());
            }
        }
    }
    lines.join("\n")
}

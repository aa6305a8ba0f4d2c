mod cmd;
mod output;
mod prompt;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use minitools_core::DiskBackend;
use minitools_core::analytics::{Sink, TracingSink};
use minitools_core::types::{AppConfig, Config};
use output::OutputMode;
use prompt::StdinConfirm;
use std::env;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "minitools: benefit tracker, memo notebook and text tools",
    long_about = None
)]
struct Cli {
    /// Directory holding the database and config.toml.
    #[arg(long, global = true, env = "MINITOOLS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Answer yes to every confirmation.
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Track shareholder benefits until they expire",
        after_help = "EXAMPLES:\n    minitools benefits add --title QUOカード --company ビックカメラ --expires 2026-03-31\n    minitools benefits list --tab this-month"
    )]
    Benefits {
        #[command(subcommand)]
        command: cmd::benefits::BenefitsCommand,
    },

    #[command(about = "Keep per-issue benefit notes")]
    Memo {
        #[command(subcommand)]
        command: cmd::memo::MemoCommand,
    },

    #[command(about = "Manage the memo tag registry")]
    Tag {
        #[command(subcommand)]
        command: cmd::memo::TagCommand,
    },

    #[command(
        about = "Sum one number per line",
        after_help = "EXAMPLES:\n    printf '1,200\\n300円\\n' | minitools total -"
    )]
    Total(cmd::text::TextArgs),

    #[command(about = "Count characters against post-length limits")]
    Charcount(cmd::text::TextArgs),
}

/// Everything a command needs, resolved once from the global flags.
pub struct Context {
    pub backend: DiskBackend,
    pub settings: AppConfig,
    pub output: OutputMode,
    pub confirm: StdinConfirm,
    pub sink: TracingSink,
}

impl Context {
    fn open(cli: &Cli) -> anyhow::Result<Self> {
        let base_path = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .context("could not determine a data directory; pass --data-dir")?
                .join("minitools"),
        };
        let config = Config { base_path };

        let backend = DiskBackend::open(&config)
            .with_context(|| format!("failed to open {}", config.db_path().display()))?;

        let settings = AppConfig::load(&config.config_path())
            .with_context(|| format!("failed to read {}", config.config_path().display()))?;
        for problem in settings.validate() {
            warn!(%problem, "invalid setting replaced with default");
        }

        Ok(Self {
            backend,
            settings: settings.with_defaults_for_invalid(),
            output: if cli.json {
                OutputMode::Json
            } else {
                OutputMode::Human
            },
            confirm: StdinConfirm::new(cli.yes),
            sink: TracingSink,
        })
    }

    pub fn track(&self, tool: &str, action: &str) {
        self.sink.track("tool_action", &[("tool", tool), ("action", action)]);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MINITOOLS_LOG")
        .unwrap_or_else(|_| EnvFilter::new("minitools=info,warn"));

    let format = env::var("MINITOOLS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let ctx = Context::open(&cli)?;

    match cli.command {
        Commands::Benefits { command } => cmd::benefits::run(command, &ctx),
        Commands::Memo { command } => cmd::memo::run_memo(command, &ctx),
        Commands::Tag { command } => cmd::memo::run_tag(command, &ctx),
        Commands::Total(args) => cmd::text::run_total(&args, &ctx),
        Commands::Charcount(args) => cmd::text::run_charcount(&args, &ctx),
    }
}

//! # Taskdeck
//!
//! A terminal client for a remote task service. Taskdeck lists the service's
//! tasks in a color-coded table, generates new tasks and changes a task's
//! status, either interactively (TUI) or from single CLI commands.
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! ```bash
//! taskdeck
//! # or explicitly
//! taskdeck ui
//! ```
//!
//! #### TUI Key Bindings
//!
//! *   `q` / `Esc`: Quit
//! *   `j` / `k`: Move selection
//! *   `g`: Generate a new task
//! *   `r`: Refresh from the server
//! *   `s` / `Enter`: Change the selected task's status
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! taskdeck list
//! taskdeck generate
//! taskdeck status 3 "in progress"
//! ```
//!
//! ## Server
//!
//! Requests go to `https://localhost:7269` unless `--base-url` or the
//! `TASKS_API_URL` environment variable says otherwise. Use `--insecure` for
//! a development server with a self-signed certificate.
//!
//! ## Row Colors
//!
//! | Status      | Color       |
//! |-------------|-------------|
//! | pending     | light yellow |
//! | in progress | light blue  |
//! | completed   | light green |
//! | overdue     | light red   |

use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use taskdeck::commands::{cmd_generate, cmd_list, cmd_status};
use taskdeck::tui::run_tui;
use taskdeck::{ClientConfig, Result, TaskClient, TaskStatus, TaskView, DEFAULT_BASE_URL};

#[derive(Parser)]
#[command(name = "taskdeck", version)]
#[command(about = "Terminal client for a remote task service", long_about = None)]
struct Cli {
    /// Base address of the task service
    #[arg(long, global = true, env = "TASKS_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, global = true, env = "TASKS_API_TIMEOUT")]
    timeout: Option<u64>,
    /// Accept invalid TLS certificates
    #[arg(long, global = true)]
    insecure: bool,
    /// Log filter, e.g. "info" or "taskdeck=debug"
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    /// Write logs to this file (the TUI discards logs otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all tasks
    List,
    /// Ask the server to generate a new task
    Generate,
    /// Change the status of a task
    Status {
        id: u64,
        /// pending, "in progress", completed or overdue
        status: TaskStatus,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: Shell,
    },
    /// Open interactive TUI
    Ui,
}

fn log_filter(level: &str) -> std::result::Result<EnvFilter, String> {
    EnvFilter::try_new(level).map_err(|e| format!("invalid log level '{}': {}", level, e))
}

fn init_tracing(
    level: &str,
    log_file: Option<&PathBuf>,
    tui: bool,
) -> std::result::Result<(), Box<dyn Error>> {
    let filter = log_filter(level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    // A failed try_init means a subscriber is already installed; keep it.
    match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        None if tui => {
            let _ = builder.with_writer(io::sink).try_init();
        }
        None => {
            let _ = builder.with_writer(io::stderr).try_init();
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "taskdeck", &mut io::stdout());
        return Ok(());
    }

    let config = ClientConfig {
        base_url: cli.base_url,
        timeout: cli.timeout.map(Duration::from_secs),
        accept_invalid_certs: cli.insecure,
    };
    info!(base_url = %config.base_url, "using task service");
    let mut view = TaskView::new(TaskClient::with_config(config)?);

    let mut out = io::stdout();
    match cli.command {
        Some(Commands::List) => cmd_list(&mut view, &mut out).await,
        Some(Commands::Generate) => cmd_generate(&mut view, &mut out).await,
        Some(Commands::Status { id, status }) => cmd_status(&mut view, id, status, &mut out).await,
        Some(Commands::Ui) | None => run_tui(view).await,
        Some(Commands::Completions { .. }) => Ok(()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let tui = matches!(cli.command, Some(Commands::Ui) | None);
    if let Err(e) = init_tracing(&cli.log_level, cli.log_file.as_ref(), tui) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

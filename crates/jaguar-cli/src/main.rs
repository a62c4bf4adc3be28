#![forbid(unsafe_code)]

mod artifacts;
mod cmd;
mod config;
mod output;
mod session;
mod tools;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "jaguar: dependency graphs, state spaces and limit cycles of polynomial dynamical systems",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides --json and the FORMAT env var).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Config file (default: ./jaguar.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Print the variable dependency graph",
        long_about = "Extract the variable dependency graph of an equation system and print it as Graphviz DOT.",
        after_help = "EXAMPLES:\n    # Dependency DOT of a system file\n    jaguar deps system.pds\n\n    # Render it directly\n    jaguar deps system.pds | dot -Tsvg > deps.svg\n\n    # Nodes, edges and feedback loops as JSON\n    jaguar deps system.pds --json"
    )]
    Deps(cmd::deps::DepsArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Reorder a state-space graph",
        long_about = "Sort the edge statements of a simulator state-space DOT by source state so the rendering is layered.",
        after_help = "EXAMPLES:\n    # Canonicalize simulator output\n    jaguar canon system-statespace.dot\n\n    # From stdin\n    cat system-statespace.dot | jaguar canon"
    )]
    Canon(cmd::canon::CanonArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "List attractors of a state-space graph",
        long_about = "List the fixed points and limit cycles of a state-space DOT.",
        after_help = "EXAMPLES:\n    # Attractors of simulator output\n    jaguar cycles system-statespace.dot\n\n    # Emit machine-readable output\n    jaguar cycles system-statespace.dot --json"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        next_help_heading = "Pipeline",
        about = "Run the full analysis",
        long_about = "Simulate an equation system, render its state space and dependency graph, and report its limit cycles. The system becomes the session's last system.",
        after_help = "EXAMPLES:\n    # Analyse a system and keep the artifacts\n    jaguar run system.pds --out-dir out\n\n    # Re-run the last system\n    jaguar run\n\n    # Emit machine-readable output\n    jaguar run system.pds --json"
    )]
    Run(cmd::run::RunArgs),

    #[command(
        next_help_heading = "Pipeline",
        about = "Print one rendered graph",
        long_about = "Recompute the session's last system and print the requested SVG.",
        after_help = "EXAMPLES:\n    # State-space SVG\n    jaguar view statespace > statespace.svg\n\n    # Dependency SVG\n    jaguar view dependency > dependency.svg"
    )]
    View(cmd::view::ViewArgs),

    #[command(next_help_heading = "Pipeline", about = "Inspect or reset the stored system")]
    Session {
        #[command(subcommand)]
        command: cmd::session::SessionCommand,
    },

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Bash completions\n    jaguar completions bash > ~/.local/share/bash-completion/completions/jaguar"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("JAGUAR_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "jaguar=debug,info"
        } else {
            "jaguar=info,warn"
        })
    });

    let format = env::var("JAGUAR_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

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
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = std::env::current_dir()?;
    let output = cli.output_mode();
    let config = config::load_config(&project_root, cli.config.as_deref())?;
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Deps(ref args) => cmd::deps::run_deps(args, output, &config),
        Commands::Canon(ref args) => cmd::canon::run_canon(args, output),
        Commands::Cycles(ref args) => cmd::cycles::run_cycles(args, output),
        Commands::Run(ref args) => cmd::run::run_run(args, output, &config, &project_root),
        Commands::View(ref args) => cmd::view::run_view(args, output, &config, &project_root),
        Commands::Session { ref command } => {
            cmd::session::run_session(command, output, &config, &project_root)
        }
        Commands::Completions(ref args) => {
            cmd::completions::run_completions(args.shell, &mut Cli::command())
        }
    }
}

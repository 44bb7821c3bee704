//! svcgen CLI - Go backend service scaffolding

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use svcgen_core::tui::CreateArgs;
use svcgen_core::{ConfigFormat, Database, HttpFramework, TaskRunner};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "svcgen")]
#[command(about = "CLI for scaffolding Go backend services")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub create: CliCreateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Go service
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project name, also used as the Go module path
    pub name: Option<String>,

    /// Project directory to create (defaults to ./<name>)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// YAML preset with default choices
    #[arg(short, long)]
    pub preset: Option<PathBuf>,

    /// HTTP framework
    #[arg(short, long, value_enum)]
    pub framework: Option<HttpFramework>,

    /// Database engine
    #[arg(long, value_enum)]
    pub database: Option<Database>,

    /// Task runner file
    #[arg(long = "task-runner", value_enum)]
    pub task_runner: Option<TaskRunner>,

    /// Configuration file format
    #[arg(long = "config-format", value_enum)]
    pub config_format: Option<ConfigFormat>,

    /// Add a gorilla/websocket hub
    #[arg(long)]
    pub websocket: bool,

    /// Add a Telegram bot integration
    #[arg(long)]
    pub bot: bool,

    /// Add HTML template rendering
    #[arg(long)]
    pub html: bool,

    /// Only write files; skip go mod init, go mod tidy and goimports
    #[arg(long = "skip-toolchain")]
    pub skip_toolchain: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            directory: args.directory,
            preset: args.preset,
            framework: args.framework,
            database: args.database,
            task_runner: args.task_runner,
            config_format: args.config_format,
            websocket: args.websocket,
            bot: args.bot,
            html: args.html,
            skip_toolchain: args.skip_toolchain,
            yes: args.yes,
        }
    }
}

fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let result = run(Args::parse());

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args,
        // No subcommand provided, default to create behavior
        None => args.create,
    };

    svcgen_core::run(create_args.into())
}

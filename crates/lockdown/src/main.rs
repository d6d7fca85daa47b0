mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lockdown",
    version,
    about = "A foreground-window lockdown utility for Windows"
)]
struct Cli {
    /// Directory holding the rule file and record log
    /// (default: ~/.config/lockdown)
    #[arg(long, global = true, value_name = "PATH")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Monitor the foreground window until the panel password is entered
    Run,
    /// Create the default rule file
    Init,
    /// Parse the rule file and show the effective settings
    Check {
        /// Print the parsed rule file as JSON
        #[arg(long)]
        json: bool,
    },
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
}

#[derive(Subcommand)]
enum DebugCommands {
    /// List all titled top-level windows and their owning processes
    List,
}

fn main() {
    let cli = Cli::parse();
    let dir = cli.dir.as_deref();

    match cli.command {
        Commands::Run => commands::run::execute(dir),
        Commands::Init => commands::init::execute(dir),
        Commands::Check { json } => commands::check::execute(dir, json),
        Commands::Debug { command } => match command {
            DebugCommands::List => commands::debug::list::execute(),
        },
    }
}

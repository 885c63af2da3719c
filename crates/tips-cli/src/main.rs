// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TREASURY TIPS CLI - inspect tips and plan median endorsements
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Reads tip records exported from a node (JSON), derives the tip view for the
// locally configured accounts, and builds batch endorsement plans.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "tips-cli")]
#[command(about = "Treasury tips - inspect tips & plan median endorsements", long_about = None)]
#[command(version)]
struct Cli {
    /// Config directory (default: ~/.tips)
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,

    /// Local accounts, comma separated (overrides config + TIPS_ACCOUNTS)
    #[arg(short, long, global = true, value_delimiter = ',')]
    accounts: Vec<String>,

    /// Suppress the banner
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the derived state of one or more tips
    Show {
        /// JSON file with a tip entry or an array of entries
        file: PathBuf,

        /// Only show the tip with this hash
        #[arg(long)]
        hash: Option<String>,

        /// Best known block (enables phase display)
        #[arg(short, long)]
        best_block: Option<u32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List all tips, soonest-closing first
    List {
        /// JSON file with an array of tip entries
        file: PathBuf,

        /// Best known block
        #[arg(short, long, default_value_t = 0)]
        best_block: u32,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Build a batch endorsement plan (each selected tip at its median)
    Batch {
        /// JSON file with an array of tip entries
        file: PathBuf,

        /// Tip hash to endorse (repeatable)
        #[arg(short, long)]
        select: Vec<String>,

        /// Endorse every tip that already has endorsements
        #[arg(long)]
        all_tipped: bool,

        /// Write the plan to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Local configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

impl Commands {
    /// Whether the command writes machine-readable JSON to stdout
    fn emits_json(&self) -> bool {
        match self {
            Commands::Show { json, .. } | Commands::List { json, .. } => *json,
            Commands::Batch { output, .. } => output.is_none(),
            Commands::Config { .. } => false,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // JSON on stdout must stay parseable
    if !cli.quiet && !cli.command.emits_json() {
        print_banner();
    }

    std::process::exit(exit_code(run(cli)));
}

/// Report a failed run once, in the CLI's own format, and pick the exit status
fn exit_code(result: Result<(), Box<dyn std::error::Error>>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            print_error(&e.to_string());
            1
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Get config directory
    let config_dir = cli.config_dir.unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(".tips")
    });
    let load = || commands::common::Context::load(&config_dir, &cli.accounts);

    match cli.command {
        Commands::Show {
            file,
            hash,
            best_block,
            json,
        } => commands::show::handle(&load()?, &file, hash.as_deref(), best_block, json),
        Commands::List {
            file,
            best_block,
            json,
        } => commands::list::handle(&load()?, &file, best_block, json),
        Commands::Batch {
            file,
            select,
            all_tipped,
            output,
        } => commands::batch::handle(&load()?, &file, &select, all_tipped, output.as_deref()),
        Commands::Config { action } => match action {
            ConfigCommands::Init { force } => commands::config::init(&config_dir, force),
            ConfigCommands::Show => commands::config::show(&load()?),
        },
    }
}

fn print_banner() {
    println!(
        "{}",
        "╔═══════════════════════════════════════════════╗".cyan()
    );
    println!(
        "{}",
        "║         TREASURY TIPS - CLI v0.3.0            ║"
            .cyan()
            .bold()
    );
    println!(
        "{}",
        "╚═══════════════════════════════════════════════╝".cyan()
    );
    println!();
}

fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

// ─────────────────────────────────────────────────────────────────
// UNIT TESTS
// ─────────────────────────────────────────────────────────────────

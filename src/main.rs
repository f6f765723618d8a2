use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ggc",
    version,
    about = "Governance Graph Compiler: turn a markdown policy into a section/rule graph",
    arg_required_else_help = true
)]
struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile policy markdown into graph.json and graph.dot
    Compile {
        /// Path to the policy markdown file
        #[arg(long)]
        policy: PathBuf,

        /// Output directory
        #[arg(long, default_value = "out")]
        out: PathBuf,

        /// Escape quotes and backslashes in DOT labels
        #[arg(long)]
        escape_labels: bool,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    init_tracing(cli.verbose);

    match cli.command {
        Command::Compile {
            policy,
            out,
            escape_labels,
        } => {
            let options = ggc::DotOptions { escape_labels };
            match ggc::compile_file(&policy, &out, &options) {
                Ok(files) => {
                    println!("Graph JSON written to {}", files.json.display());
                    println!("DOT written to {}", files.dot.display());
                }
                Err(e) => {
                    eprintln!("ERROR: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

//! swagforge CLI - Swagger documents from parsed API definitions.
//!
//! # Commands
//!
//! - `swagforge swagger` - Generate a Swagger 2.0 document from a plugin payload
//! - `swagforge completions` - Generate shell completions

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use swagforge_log::Level;

mod commands;
mod error;

use commands::swagger;
use error::CliResult;

/// swagforge - Swagger 2.0 generator
#[derive(Parser)]
#[command(name = "swagforge")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Generate Swagger 2.0 documents from parsed API definitions")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} swagforge swagger --input api.json --dir docs\n  {} cat api.json | swagforge swagger --pack Response --stdout",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Swagger 2.0 document
    #[command(alias = "s")]
    Swagger(SwaggerArgs),

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct SwaggerArgs {
    /// Plugin payload (JSON), `-` for stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Configuration file (json, toml or env)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (defaults to the payload's `dir`, then `.`)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Output file name
    #[arg(long)]
    filename: Option<String>,

    /// Document host
    #[arg(long)]
    host: Option<String>,

    /// Document base path
    #[arg(long = "basepath")]
    base_path: Option<String>,

    /// Comma separated schemes (http, https, ws, wss)
    #[arg(long)]
    schemes: Option<String>,

    /// Name of the response wrapper definition
    #[arg(long)]
    pack: Option<String>,

    /// Wrapper fields as a JSON array (requires --pack)
    #[arg(long)]
    response: Option<String>,

    /// Naming style for group tags (lower, upper, snake, kebab, camel, pascal)
    #[arg(long)]
    tag_naming: Option<String>,

    /// Print the document instead of writing it
    #[arg(long)]
    stdout: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    swagforge_log::install();
    if cli.verbose {
        swagforge_log::set_level(Level::Debug);
    } else if cli.quiet {
        swagforge_log::set_level(Level::Error);
    }

    let result: CliResult<()> = match cli.command {
        Commands::Swagger(args) => {
            let options = swagger::SwaggerOptions {
                input: args.input,
                config: args.config,
                dir: args.dir,
                filename: args.filename,
                host: args.host,
                base_path: args.base_path,
                schemes: args.schemes,
                pack: args.pack,
                response: args.response,
                tag_naming: args.tag_naming,
                stdout: args.stdout,
                quiet: cli.quiet,
            };
            swagger::run(options)
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "swagforge", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        std::process::exit(1);
    };
}

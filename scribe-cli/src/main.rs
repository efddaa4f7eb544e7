mod demo;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use scribe_ui::{OutputFormat, ScribeConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scribe")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Show debug logs and full error chains
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON element tree
    Render {
        /// Path to the tree, or `-` for stdin
        file: PathBuf,
        /// Output format
        #[arg(short, long)]
        format: Option<Format>,
        /// Indent nested elements, 2 spaces unless N is given
        #[arg(long, alias = "indent", value_name = "N", num_args = 0..=1, default_missing_value = "2")]
        pretty: Option<usize>,
        /// Prepend an XML declaration
        #[arg(long)]
        declaration: bool,
        /// Fold all-text children into their element
        #[arg(long)]
        collapse_text: bool,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render the built-in hello world tree
    Demo,
    /// List supported element tags
    Tags,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Xml,
    Outline,
}

impl From<Format> for OutputFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Xml => OutputFormat::Xml,
            Format::Outline => OutputFormat::Outline,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli) {
        if verbose {
            eprintln!("{} {:?}", "❌".red(), e);
        } else {
            eprintln!("{} {:#}", "❌".red(), e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ScribeConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ScribeConfig::default(),
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Render {
            file,
            format,
            pretty,
            declaration,
            collapse_text,
            output,
        } => render::run_render(
            render::RenderOptions {
                input: file,
                format: format.map(Into::into),
                indent: pretty,
                declaration,
                collapse_text,
                output,
            },
            config,
        ),
        Commands::Demo => demo::run_demo(&config),
        Commands::Tags => {
            let factory = config.factory()?;
            for tag in factory.tags() {
                println!("{}", tag);
            }
            Ok(())
        }
    }
}

fn init_logging(config: &ScribeConfig, verbose: bool) {
    if !verbose && !config.logging_enabled() {
        return;
    }
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

//! Sitemark CLI - build a static site from markdown pages
//!
//! Usage:
//!   sitemark build [OPTIONS]
//!   sitemark render <FILE>
//!   sitemark inspect [--json] <FILE>
//!
//! Commands:
//!   build     Copy the static tree and generate every page
//!   render    Print the HTML of a single markdown file
//!   inspect   List the blocks of a markdown file

mod error;
mod inspect;
mod site;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use error::{CliError, SiteError};
use site::SiteConfig;

/// Sitemark - markdown to HTML static-site generator.
#[derive(Parser)]
#[command(name = "sitemark", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy static files and generate a page for every markdown file.
    Build(BuildArgs),
    /// Print the rendered HTML of one markdown file.
    Render {
        /// Markdown file to render.
        file: PathBuf,
    },
    /// Print each block of a markdown file with its classification.
    Inspect {
        /// Markdown file to inspect.
        file: PathBuf,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// Arguments for the build command.
#[derive(Args)]
struct BuildArgs {
    /// Directory copied verbatim into the output.
    #[arg(long = "static", default_value = "static")]
    static_dir: PathBuf,

    /// Directory of markdown pages.
    #[arg(long = "content", default_value = "content")]
    content_dir: PathBuf,

    /// HTML template with `{{ Title }}` and `{{ Content }}` placeholders.
    #[arg(long, default_value = "template.html")]
    template: PathBuf,

    /// Output directory, replaced on every build.
    #[arg(long = "out", default_value = "docs")]
    output_dir: PathBuf,

    /// Prefix for root-relative links, for sites not served from `/`.
    #[arg(long, default_value = "/")]
    base_path: String,

    /// Log every generated page.
    #[arg(short, long)]
    verbose: bool,
}

impl From<BuildArgs> for SiteConfig {
    fn from(args: BuildArgs) -> Self {
        SiteConfig {
            static_dir: args.static_dir,
            content_dir: args.content_dir,
            template: args.template,
            output_dir: args.output_dir,
            base_path: args.base_path,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Build(args) => cmd_build(args.into()),
        Commands::Render { file } => cmd_render(&file),
        Commands::Inspect { file, json } => cmd_inspect(&file, json),
    }
}

// =============================================================================
// Commands
// =============================================================================

fn cmd_build(config: SiteConfig) -> Result<(), CliError> {
    let summary = site::build(&config)?;
    println!(
        "Built {} page(s) and copied {} static file(s) into {}",
        summary.pages,
        summary.static_files,
        config.output_dir.display()
    );
    Ok(())
}

fn cmd_render(file: &Path) -> Result<(), CliError> {
    let input = read_markdown(file)?;
    let html = sitemark_core::compile_document(&input)
        .and_then(|root| root.render())
        .map_err(|source| SiteError::Compile {
            path: file.to_path_buf(),
            source,
        })?;
    println!("{html}");
    Ok(())
}

fn cmd_inspect(file: &Path, json: bool) -> Result<(), CliError> {
    let input = read_markdown(file)?;
    let doc = inspect::inspect(&input).map_err(|source| SiteError::Compile {
        path: file.to_path_buf(),
        source,
    })?;
    if json {
        println!("{}", inspect::to_json(&doc)?);
    } else {
        print!("{}", inspect::to_text(&doc));
    }
    Ok(())
}

fn read_markdown(file: &Path) -> Result<String, SiteError> {
    fs::read_to_string(file).map_err(SiteError::io(file))
}

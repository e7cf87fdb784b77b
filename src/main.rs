//! Command-line interface for the relnotes binary.
//!
//! The CLI exposes subcommands for generating release notes from a settings
//! document and for checking a settings document without contacting GitHub.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process,
    time::Duration,
};

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use relnotes::{
    EnvCredentialProvider, Error, GeneratorSettings, GitHubConnector, ReleaseNotesGenerator,
    io_error, load_settings,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line interface for generating milestone release notes.
#[derive(Debug, Parser,)]
#[command(name = "relnotes", version, about = "Generate Markdown release notes from a GitHub milestone")]
struct Cli
{
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Generate release notes for the milestone named by the settings.
    Generate(GenerateArgs,),
    /// Parse a settings document and check its required fields offline.
    Check(CheckArgs,),
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `generate` subcommand.
struct GenerateArgs
{
    /// Path to the YAML or JSON settings document.
    #[arg(long = "settings", value_name = "PATH")]
    settings: PathBuf,

    /// File receiving the Markdown document. Defaults to stdout.
    #[arg(long = "output", value_name = "PATH")]
    output: Option<PathBuf,>,

    /// Overrides the `version` setting.
    #[arg(long = "version-tag", value_name = "VERSION", env = "RELNOTES_VERSION")]
    version_tag: Option<String,>,

    /// Overrides the `releaseType` setting.
    #[arg(long = "release-type", value_name = "TYPE", env = "RELNOTES_RELEASE_TYPE")]
    release_type: Option<String,>,
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `check` subcommand.
struct CheckArgs
{
    /// Path to the YAML or JSON settings document.
    #[arg(long = "settings", value_name = "PATH")]
    settings: PathBuf,
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main()
{
    init_tracing();

    if let Err(error,) = run() {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),);
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(io::stderr,).init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors from settings loading, validation and generation.
fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args,) => run_generate(args,),
        Command::Check(args,) => run_check(&args,),
    }
}

fn run_generate(args: GenerateArgs,) -> Result<(), Error,>
{
    let settings = prepare_settings(&args,)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::service(format!("failed to start async runtime: {e}"),),)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}",)
            .map_err(|e| Error::service(format!("invalid progress template: {e}"),),)?,
    );
    pb.enable_steady_tick(Duration::from_millis(100,),);
    pb.set_message(format!(
        "Generating release notes for {}/{}...",
        settings.owner_name, settings.repo_name
    ),);

    let generator = ReleaseNotesGenerator::new(GitHubConnector::default(), EnvCredentialProvider,);
    let result = runtime.block_on(generator.generate_notes(&settings,),);
    pb.finish_and_clear();

    let document = result?;
    write_document(args.output.as_deref(), &document,)
}

fn prepare_settings(args: &GenerateArgs,) -> Result<GeneratorSettings, Error,>
{
    let mut settings = load_settings(&args.settings,)?;

    if let Some(version,) = &args.version_tag {
        settings.version = Some(version.clone(),);
    }
    if let Some(release_type,) = &args.release_type {
        settings.release_type = Some(release_type.clone(),);
    }

    Ok(settings,)
}

fn write_document(output: Option<&Path,>, document: &str,) -> Result<(), Error,>
{
    match output {
        Some(path,) => {
            fs::write(path, document,).map_err(|source| io_error(path, source,),)?;
            info!("Release notes written to {}", path.display());
        }
        None => println!("{document}"),
    }

    Ok((),)
}

fn run_check(args: &CheckArgs,) -> Result<(), Error,>
{
    let settings = load_settings(&args.settings,)?;
    settings.check_required()?;

    println!("{}: settings for {}/{} are complete", args.settings.display(), settings.owner_name, settings.repo_name);
    Ok((),)
}

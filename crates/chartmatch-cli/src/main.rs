use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod chart;
mod commands;

#[derive(Debug, Parser)]
#[command(name = "chartmatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Match a chart file against the catalog
    ///
    /// Reads a ranked chart (JSON array of {rank, title, artist}), searches
    /// the catalog for each entry, and selects the best candidate per entry
    /// using the weighted scorer. For each entry:
    ///
    /// - Builds a structured query (track:"..." artist:"...")
    /// - Falls back to a plain query when the structured search is empty
    /// - Scores candidates on popularity, similarity, release metadata,
    ///   and cover/remix keyword penalties
    ///
    /// A failing entry never aborts the run; its error is recorded in the
    /// report. Press Ctrl-C to stop early and keep the partial results.
    ///
    /// Output:
    /// - Per-entry match lines as the run progresses
    /// - Summary of matched vs. unmatched entries
    /// - Full report written as JSON (see --output / report_path config)
    Run {
        /// Path to the chart file (JSON)
        chart: PathBuf,

        /// Candidates requested per search (more improves selection)
        #[arg(long)]
        limit: Option<u32>,

        /// Where to write the match report (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Build a playlist from a match report
    Playlist {
        /// Path to a report produced by `chartmatch run`
        report: PathBuf,

        /// Playlist name
        #[arg(long)]
        name: String,

        /// Replace the contents of an existing playlist instead
        #[arg(long)]
        replace: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Create the default config file if it doesn't exist
    Init,
    /// Show the current effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            chart,
            limit,
            output,
        } => {
            commands::run_match(chart, limit, output).await?;
        }
        Commands::Playlist {
            report,
            name,
            replace,
        } => {
            commands::build_playlist(report, name, replace).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::init_config()?,
            ConfigAction::Show => commands::show_config()?,
        },
    }

    Ok(())
}

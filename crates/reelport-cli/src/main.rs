use clap::{ArgAction, Parser, Subcommand};
use reelport_models::ListKind;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelport")]
#[command(about = "Replay IMDb list exports into a JustWatch account")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ImportArgs {
    /// Path to the CSV export (defaults to the configured exports directory)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Pause between API calls, overriding the configured value
    #[arg(long, value_name = "MILLIS")]
    delay_ms: Option<u64>,

    /// Path to a config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import exports/watchlist.csv into the JustWatch watchlist
    #[command(long_about = "Read an IMDb watchlist export and add every title to the JustWatch watchlist. Requires JUSTWATCH_AUTH_TOKEN in the environment (or a .env file).")]
    Watchlist(ImportArgs),

    /// Import exports/ratings.csv into the JustWatch seenlist
    #[command(long_about = "Read an IMDb ratings export and mark every rated title as seen on JustWatch. Requires JUSTWATCH_AUTH_TOKEN in the environment (or a .env file).")]
    Seenlist(ImportArgs),
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Token may live in a local .env; absence of the file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Watchlist(args) => {
            commands::import::run(ListKind::Watchlist, args.file, args.delay_ms, args.config, &output).await
        }
        Commands::Seenlist(args) => {
            commands::import::run(ListKind::Seenlist, args.file, args.delay_ms, args.config, &output).await
        }
    }
}

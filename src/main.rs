use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use santa_ais::config::Config;
use santa_ais::error::AisResult;
use santa_ais::scorer::loader;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/family_data.csv")]
    data: PathBuf,

    /// JSON run configuration. Flags typed on the command line win.
    #[arg(global = true, short, long)]
    config: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Optimize(cmd::optimize::OptimizeArgs),
    Evaluate(cmd::evaluate::EvaluateArgs),
}

fn main() {
    // 1. Parse raw matches (to distinguish user input from defaults)
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    if let Err(e) = execute(cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn execute(cli: Cli, matches: &ArgMatches) -> AisResult<()> {
    info!("📂 Loading families: {}", cli.data.display());
    let families = Arc::new(loader::load_families(&cli.data)?);

    match cli.command {
        Commands::Optimize(args) => {
            let config = resolve_config(cli.config.as_ref(), &args.config, matches)?;
            cmd::optimize::run(args, config, families)
        }
        Commands::Evaluate(args) => cmd::evaluate::run(args, &families),
    }
}

/// File config as the base, explicit command-line flags on top.
fn resolve_config(
    path: Option<&PathBuf>,
    cli_config: &Config,
    matches: &ArgMatches,
) -> AisResult<Config> {
    let Some(path) = path else {
        return Ok(cli_config.clone());
    };

    info!("⚖️  Loading config from: {}", path.display());
    let mut config = Config::load_from_file(path)?;
    if let Some(sub) = matches.subcommand_matches("optimize") {
        config.merge_from_cli(cli_config, sub);
    }
    Ok(config)
}

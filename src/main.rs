use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use subforge::config::Config;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with search and model settings; command-line flags win
    #[arg(global = true, long)]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a transition model from a text corpus
    Train(cmd::train::TrainArgs),
    /// Encipher text with a given or random key
    Encipher(cmd::encipher::EncipherArgs),
    /// Recover the key of an enciphered message
    Solve(cmd::solve::SolveArgs),
    /// Score a message decoded with a given key
    Score(cmd::score::ScoreArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing SubForge...");

    let (cli_config, sub_matches) = match &cli.command {
        Commands::Train(args) => (&args.config, matches.subcommand_matches("train")),
        Commands::Encipher(args) => (&args.config, matches.subcommand_matches("encipher")),
        Commands::Solve(args) => (&args.config, matches.subcommand_matches("solve")),
        Commands::Score(args) => (&args.config, matches.subcommand_matches("score")),
    };

    let config = match (&cli.config_file, sub_matches) {
        (Some(path), Some(sub_matches)) => {
            info!("⚙️  Loading Config from: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("❌ {}", e);
                process::exit(1);
            });
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        _ => cli_config.clone(),
    };

    let result = match &cli.command {
        Commands::Train(args) => cmd::train::run(args, &config),
        Commands::Encipher(args) => cmd::encipher::run(args, &config),
        Commands::Solve(args) => cmd::solve::run(args, &config),
        Commands::Score(args) => cmd::score::run(args, &config),
    };

    if let Err(e) = result {
        error!("❌ FATAL: {}", e);
        process::exit(1);
    }
}

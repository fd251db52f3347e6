use super::InputArgs;
use crate::reports;
use clap::Args;
use std::time::Instant;
use subforge::api;
use subforge::cipher::Permutation;
use subforge::config::Config;
use subforge::error::SfResult;
use subforge::model::loader::load_model;
use subforge::model::ModelFormat;
use subforge::optimizer::SearchOptions;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub input: InputArgs,

    #[arg(short, long)]
    pub model: String,

    #[arg(long)]
    pub model_format: Option<ModelFormat>,

    /// Print the report as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &SolveArgs, config: &Config) -> SfResult<()> {
    let alphabet = config.model.alphabet()?;
    let model = load_model(&args.model, args.model_format)?;
    let message = args.input.read()?;
    let options = SearchOptions::from(&config.search);

    info!(
        "🔎 Solving {} symbols with {} chain(s) x {} iterations",
        message.chars().count(),
        options.chains,
        options.max_iterations
    );

    let started = Instant::now();
    let progress = move |iteration: usize, best_score: f64, best: &Permutation| {
        info!(
            "Iter {:6} | Best: {:.2} | {} | {:.1}s",
            iteration,
            best_score,
            best,
            started.elapsed().as_secs_f32()
        );
        true
    };

    let report = api::solve(alphabet.clone(), model, &message, options, progress)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n=== 🏆 FINAL RESULT ===");
    println!("Score: {:.6}", report.score);
    println!("Key: {}", report.cipher);
    println!("Reverse key: {}", report.key);
    reports::print_key_table(&alphabet, &report.cipher);
    reports::print_search_summary(&report);
    println!("\n{}", report.plaintext);
    Ok(())
}

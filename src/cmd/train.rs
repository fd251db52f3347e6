use crate::reports;
use clap::Args;
use subforge::config::Config;
use subforge::error::SfResult;
use subforge::model::loader::save_model;
use subforge::model::{ModelFormat, TransitionModelBuilder};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub config: Config,

    /// Plain-text reference corpus
    #[arg(long)]
    pub corpus: String,

    /// Where to write the model
    #[arg(short, long)]
    pub output: String,

    /// json, csv or tsv; inferred from the output extension when omitted
    #[arg(long)]
    pub format: Option<ModelFormat>,
}

pub fn run(args: &TrainArgs, config: &Config) -> SfResult<()> {
    let alphabet = config.model.alphabet()?;
    info!(
        "🔤 Alphabet: {} symbols, floor e^{}",
        alphabet.len(),
        config.model.floor_exponent
    );

    let model = TransitionModelBuilder::new(alphabet)
        .with_floor_exponent(config.model.floor_exponent)
        .train_file(&args.corpus)?;

    save_model(&model, &args.output, args.format)?;

    reports::print_model_summary(&model, 10);
    println!("Model written to {}", args.output);
    Ok(())
}

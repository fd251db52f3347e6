use super::InputArgs;
use clap::Args;
use subforge::api;
use subforge::cipher::{self, Permutation};
use subforge::config::Config;
use subforge::error::SfResult;
use subforge::model::loader::load_model;
use subforge::model::ModelFormat;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub input: InputArgs,

    #[arg(short, long)]
    pub model: String,

    #[arg(long)]
    pub model_format: Option<ModelFormat>,

    /// Decoding key: alphabet[i] in the message reads as key[i]
    #[arg(short, long)]
    pub key: String,
}

pub fn run(args: &ScoreArgs, config: &Config) -> SfResult<()> {
    let alphabet = config.model.alphabet()?;
    let model = load_model(&args.model, args.model_format)?;
    let message = args.input.read()?;
    let key = Permutation::parse(&alphabet, &args.key)?;

    let score = api::score_key(&alphabet, &model, &message, &key)?;

    println!("Score: {:.6}", score);
    println!("{}", cipher::decode(&message, &alphabet, &key)?);
    Ok(())
}

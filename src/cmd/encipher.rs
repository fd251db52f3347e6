use super::InputArgs;
use clap::Args;
use subforge::api;
use subforge::cipher::{self, Permutation};
use subforge::config::Config;
use subforge::error::SfResult;

#[derive(Args, Debug, Clone)]
pub struct EncipherArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub input: InputArgs,

    /// Cipher key (the alphabet reordered); random when omitted
    #[arg(short, long)]
    pub key: Option<String>,
}

pub fn run(args: &EncipherArgs, config: &Config) -> SfResult<()> {
    let alphabet = config.model.alphabet()?;
    let text = args.input.read()?;

    let (key, ciphertext) = match &args.key {
        Some(k) => {
            let key = Permutation::parse(&alphabet, k)?;
            let ciphertext = cipher::encipher(&text, &alphabet, &key)?;
            (key, ciphertext)
        }
        None => api::encipher_random(&alphabet, &text, config.search.seed)?,
    };

    println!("Key: {}", key);
    println!("{}", ciphertext);
    Ok(())
}

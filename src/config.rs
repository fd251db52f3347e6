use crate::alphabet::Alphabet;
use crate::consts::{
    DEFAULT_ALPHABET, DEFAULT_FLOOR_EXPONENT, DEFAULT_MAX_ITERATIONS, DEFAULT_REPORT_INTERVAL,
};
use crate::error::{SfResult, SubForgeError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub model: ModelParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Iterations per chain
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,
    /// Independent chains run in parallel
    #[arg(long, default_value_t = 1)]
    pub chains: usize,
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
    /// Wall-clock limit in seconds, checked between batches
    #[arg(short = 'T', long)]
    pub time_limit: Option<u64>,
    #[arg(long, default_value_t = DEFAULT_REPORT_INTERVAL)]
    pub report_interval: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            chains: 1,
            seed: None,
            time_limit: None,
            report_interval: DEFAULT_REPORT_INTERVAL,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Ordered symbols of the cipher alphabet
    #[arg(long, default_value = DEFAULT_ALPHABET)]
    pub alphabet: String,
    /// Zero-count transitions get probability e^FLOOR_EXPONENT
    #[arg(long, default_value_t = DEFAULT_FLOOR_EXPONENT, allow_negative_numbers = true)]
    pub floor_exponent: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            floor_exponent: DEFAULT_FLOOR_EXPONENT,
        }
    }
}

impl ModelParams {
    pub fn alphabet(&self) -> SfResult<Alphabet> {
        self.alphabet.parse()
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SubForgeError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies onto `self` only the values the user typed on the command line,
    /// so file settings survive clap defaults.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(search.max_iterations);
        update_if_present!(search.chains);
        update_if_present!(search.seed);
        update_if_present!(search.time_limit);
        update_if_present!(search.report_interval);

        update_if_present!(model.alphabet);
        update_if_present!(model.floor_exponent);
    }
}

use super::TransitionModel;
use crate::alphabet::Alphabet;
use crate::consts::DEFAULT_FLOOR_EXPONENT;
use crate::error::{SfResult, SubForgeError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Counts bigrams of a reference corpus and turns them into a [`TransitionModel`].
pub struct TransitionModelBuilder {
    alphabet: Alphabet,
    floor_exponent: f64,
    counts: Vec<u64>,
    total: u64,
    lines_read: usize,
}

impl TransitionModelBuilder {
    pub fn new(alphabet: Alphabet) -> Self {
        let n = alphabet.len();
        Self {
            alphabet,
            floor_exponent: DEFAULT_FLOOR_EXPONENT,
            counts: vec![0; n * n],
            total: 0,
            lines_read: 0,
        }
    }

    pub fn with_floor_exponent(mut self, exponent: f64) -> Self {
        self.floor_exponent = exponent;
        self
    }

    /// Counts adjacent pairs of one line. Pairs never span lines and pairs
    /// touching a symbol outside the alphabet are not counted.
    pub fn add_line(&mut self, line: &str) {
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        self.lines_read += 1;

        let n = self.alphabet.len();
        let mut prev: Option<usize> = None;
        for c in line.chars() {
            let cur = self.alphabet.position(c);
            if let (Some(i), Some(j)) = (prev, cur) {
                self.counts[i * n + j] += 1;
                self.total += 1;
            }
            prev = cur;
        }
    }

    pub fn add_reader<R: BufRead>(&mut self, reader: R) -> SfResult<()> {
        for line in reader.lines() {
            self.add_line(&line?);
        }
        Ok(())
    }

    pub fn total_pairs(&self) -> u64 {
        self.total
    }

    /// Normalizes counts by the total number of counted pairs, then replaces
    /// every zero entry with `e^floor_exponent`. The result is not re-normalized.
    pub fn build(self) -> SfResult<TransitionModel> {
        if self.total == 0 {
            return Err(SubForgeError::Validation(
                "corpus contains no transitions between alphabet symbols".to_string(),
            ));
        }

        let floor = self.floor_exponent.exp();
        let total = self.total as f64;
        let mut floored = 0usize;
        let probs: Vec<f64> = self
            .counts
            .iter()
            .map(|&count| {
                if count == 0 {
                    floored += 1;
                    floor
                } else {
                    count as f64 / total
                }
            })
            .collect();

        debug!(
            "Counted {} pairs over {} lines; {} of {} entries floored to e^{}",
            self.total,
            self.lines_read,
            floored,
            probs.len(),
            self.floor_exponent
        );

        TransitionModel::from_dense(self.alphabet, probs)
    }

    pub fn train<R: BufRead>(mut self, reader: R) -> SfResult<TransitionModel> {
        self.add_reader(reader)?;
        self.build()
    }

    pub fn train_file<P: AsRef<Path>>(self, path: P) -> SfResult<TransitionModel> {
        let path = path.as_ref();
        info!("📚 Training transition model from: {}", path.display());
        let file = File::open(path)?;
        self.train(BufReader::new(file))
    }
}

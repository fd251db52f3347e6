use crate::cipher::Permutation;
use crate::config::SearchParams;
use crate::consts::{CHAIN_SEED_STRIDE, DEFAULT_MAX_ITERATIONS, DEFAULT_REPORT_INTERVAL};
use crate::error::SfResult;
use crate::optimizer::Chain;
use crate::scorer::Scorer;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub max_iterations: usize,
    pub chains: usize,
    pub seed: Option<u64>,
    pub report_interval: usize,
    pub max_time: Option<Duration>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            chains: 1,
            seed: None,
            report_interval: DEFAULT_REPORT_INTERVAL,
            max_time: None,
        }
    }
}

impl From<&SearchParams> for SearchOptions {
    fn from(params: &SearchParams) -> Self {
        Self {
            max_iterations: params.max_iterations,
            chains: params.chains,
            seed: params.seed,
            report_interval: params.report_interval,
            max_time: params.time_limit.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub best: Permutation,
    pub score: f64,
    /// Index of the chain that found `best`.
    pub chain: usize,
    /// Iterations summed over all chains.
    pub iterations: usize,
    pub accepted: usize,
    pub elapsed_ms: u128,
}

impl SearchResult {
    pub fn acceptance_rate(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.accepted as f64 / self.iterations as f64
        }
    }
}

/// A trait for receiving updates during the search.
/// Boolean return value indicates if the search should continue (true) or abort (false).
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, iteration: usize, best_score: f64, best: &Permutation) -> bool;
}

impl<F> ProgressCallback for F
where
    F: Fn(usize, f64, &Permutation) -> bool + Send + Sync,
{
    fn on_progress(&self, iteration: usize, best_score: f64, best: &Permutation) -> bool {
        self(iteration, best_score, best)
    }
}

/// Callback that never interrupts.
pub struct Silent;

impl ProgressCallback for Silent {
    fn on_progress(&self, _: usize, _: f64, _: &Permutation) -> bool {
        true
    }
}

/// Runs independent chains side by side and keeps the best key of any chain.
pub struct Searcher {
    scorer: Arc<Scorer>,
    options: SearchOptions,
}

impl Searcher {
    pub fn new(scorer: Arc<Scorer>, options: SearchOptions) -> Self {
        Self { scorer, options }
    }

    pub fn run<CB: ProgressCallback>(&self, callback: CB) -> SfResult<SearchResult> {
        let opts = &self.options;
        let num_chains = opts.chains.max(1);
        let batch_size = opts.report_interval.max(1);

        info!(
            "🔥 Spawning {} chain(s) for {} iterations each",
            num_chains, opts.max_iterations
        );

        // 1. Initialize Chains
        let mut chains: Vec<Chain> = (0..num_chains)
            .map(|i| {
                let chain_seed = opts
                    .seed
                    .map(|s| s.wrapping_add(i as u64 * CHAIN_SEED_STRIDE));
                Chain::new(self.scorer.clone(), chain_seed)
            })
            .collect::<SfResult<_>>()?;

        let start_time = Instant::now();
        let mut done = 0;

        // 2. Main Loop
        while done < opts.max_iterations {
            if let Some(limit) = opts.max_time {
                if start_time.elapsed() >= limit {
                    info!("⏱️  Time limit reached after {} iterations", done);
                    break;
                }
            }

            let batch = batch_size.min(opts.max_iterations - done);
            chains
                .par_iter_mut()
                .map(|c| c.evolve(batch).map(|_| ()))
                .collect::<SfResult<Vec<()>>>()?;
            done += batch;

            let (idx, leader) = best_chain(&chains);
            debug!(
                "Iter {:6} | Best: {:.4} (chain {}) | Current[0]: {:.4}",
                done, leader.best_score, idx, chains[0].current_score
            );

            if !callback.on_progress(done, leader.best_score, &leader.best) {
                info!("Search aborted by callback at iteration {}", done);
                break;
            }
        }

        let (idx, leader) = best_chain(&chains);
        Ok(SearchResult {
            best: leader.best.clone(),
            score: leader.best_score,
            chain: idx,
            iterations: chains.iter().map(|c| c.iterations).sum(),
            accepted: chains.iter().map(|c| c.accepted).sum(),
            elapsed_ms: start_time.elapsed().as_millis(),
        })
    }
}

/// Highest best score; the lowest index wins ties.
fn best_chain(chains: &[Chain]) -> (usize, &Chain) {
    let mut leader = 0;
    for (i, c) in chains.iter().enumerate().skip(1) {
        if c.best_score > chains[leader].best_score {
            leader = i;
        }
    }
    (leader, &chains[leader])
}

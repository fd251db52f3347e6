/// Symbols used when no alphabet is supplied: ASCII letters of both cases,
/// the space and common punctuation.
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ ,.:;!?/";

/// Zero-count transitions are floored to `e^DEFAULT_FLOOR_EXPONENT`.
pub const DEFAULT_FLOOR_EXPONENT: f64 = -20.0;

/// Iteration budget of a single Metropolis-Hastings chain.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Iterations per batch between progress reports and deadline checks.
pub const DEFAULT_REPORT_INTERVAL: usize = 1_000;

/// Allowed deviation of a model's total mass from 1.0 before a warning.
pub const MODEL_MASS_TOLERANCE: f64 = 1e-6;

/// Seed offset between parallel chains.
pub const CHAIN_SEED_STRIDE: u64 = 1;

use fastrand::Rng;

/// Metropolis-Hastings acceptance probability from two log-likelihoods.
///
/// Works on the log of the likelihood ratio and only exponentiates a
/// non-positive value, so it never overflows. The result is clamped away from
/// zero: a very unlikely move keeps a tiny, non-zero chance.
#[inline(always)]
pub fn acceptance_probability(current_score: f64, proposed_score: f64) -> f64 {
    let diff = proposed_score - current_score;
    if diff >= 0.0 {
        1.0
    } else {
        diff.exp().max(f64::MIN_POSITIVE)
    }
}

/// Draws `u` in [0, 1) and accepts iff `u < probability`.
#[inline(always)]
pub fn accepts(probability: f64, rng: &mut Rng) -> bool {
    rng.f64() < probability
}

use crate::alphabet::Alphabet;
use crate::cipher::Permutation;
use crate::error::{SfResult, SubForgeError};
use fastrand::Rng;

/// Uniformly random starting key.
pub fn random_permutation(alphabet: &Alphabet, rng: &mut Rng) -> Permutation {
    Permutation::random(alphabet, rng)
}

/// Two distinct positions in `0..n`, uniform over all ordered pairs.
pub fn pick_pair(rng: &mut Rng, n: usize) -> SfResult<(usize, usize)> {
    if n < 2 {
        return Err(SubForgeError::InvalidAlphabetSize(n));
    }
    let i = rng.usize(0..n);
    let mut j = rng.usize(0..n - 1);
    if j >= i {
        j += 1;
    }
    Ok((i, j))
}

/// Neighbor of `current`: the same key with two random positions transposed.
pub fn propose(current: &Permutation, rng: &mut Rng) -> SfResult<Permutation> {
    let (i, j) = pick_pair(rng, current.len())?;
    Ok(current.swapped(i, j))
}

//! Filler payload generation

use rand::distributions::Uniform;
use rand::Rng;

/// One simulated megabyte, in bytes.
pub const MEGABYTE: usize = 1_000_000;

/// Produce `len` bytes of lowercase-ASCII filler.
///
/// The content is immaterial to the resource simulations; it only has to
/// occupy space.
pub fn filler<R: Rng>(len: usize, rng: &mut R) -> Vec<u8> {
    let letters = Uniform::new_inclusive(b'a', b'z');
    (0..len).map(|_| rng.sample(letters)).collect()
}

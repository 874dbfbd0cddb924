//! Search bound derivation from ciphertext sizes.

use pixleak_core::config::SearchConfig;

/// Derive the brute-force upper bound for width and height.
///
/// `ceil(sqrt(max_size / bytes_per_pixel)) * bound_multiplier`: the largest
/// image is assumed to be roughly square in pixel count, and the default
/// multiplier of 2 accommodates aspect ratios up to ~4:1. This is a
/// heuristic, not a guarantee: an image more elongated than the multiplier
/// covers has a true dimension above the bound and will never be found.
/// Raise `bound_multiplier`, or set `bound` outright, for such corpora.
pub fn compute_bound(sizes: &[u64], search: &SearchConfig) -> u32 {
    if let Some(bound) = search.bound {
        return bound;
    }

    let largest = sizes.iter().copied().max().unwrap_or(0);
    let pixels = largest as f64 / f64::from(search.bytes_per_pixel.max(1));
    pixels.sqrt().ceil() as u32 * search.bound_multiplier
}

//! Uniform sampling without replacement.

use rand::seq::index;
use rand::Rng;

/// Draw up to `count` distinct items uniformly at random
///
/// Draws over an index array, so items are never repeated even when the
/// slice holds equal values. A shortfall is not an error: when `items` has
/// fewer than `count` entries every item is returned, in random order.
pub fn sample_without_replacement<'a, T, R>(rng: &mut R, items: &'a [T], count: usize) -> Vec<&'a T>
where
    R: Rng + ?Sized,
{
    let amount = count.min(items.len());
    if amount == 0 {
        return Vec::new();
    }

    index::sample(rng, items.len(), amount)
        .into_iter()
        .map(|i| &items[i])
        .collect()
}

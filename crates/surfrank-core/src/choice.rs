//! Categorical sampling by cumulative-probability inversion.
//!
//! Draw `u` uniformly from `[0, total)` and return the first index whose
//! running sum of weights exceeds `u`. Weights need not be normalized.

use rand::Rng;

/// Pick an index of `weights` with probability proportional to its weight.
///
/// Returns `None` when no weight is positive. Non-finite and negative
/// weights are treated as zero. If rounding leaves `u` past the final
/// cumulative sum, the last positively weighted index is returned.
pub fn weighted_choice<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let usable = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };

    let total: f64 = weights.iter().copied().map(usable).sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let u = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (i, &w) in weights.iter().enumerate() {
        let w = usable(w);
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = Some(i);
        if u < cumulative {
            return Some(i);
        }
    }
    last_positive
}

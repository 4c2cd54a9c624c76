//! Pareto-dominance filter in the volatility/return plane.
//!
//! Kept independent of the sampling step so the frontier extraction can be
//! tested on hand-built portfolio sets.

use super::simulation::Portfolio;

/// Indices of the non-dominated portfolios, sorted by volatility ascending.
///
/// A portfolio is dominated when another has net return >= its own and
/// volatility <= its own, with at least one strict inequality. Exact ties
/// on both axes keep only the first-seen portfolio, so the result is
/// deterministic for a fixed input order.
pub fn pareto_frontier(samples: &[Portfolio]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..samples.len()).collect();
    order.sort_by(|&a, &b| {
        samples[a]
            .volatility
            .total_cmp(&samples[b].volatility)
            .then(samples[b].net_return.total_cmp(&samples[a].net_return))
            .then(a.cmp(&b))
    });

    let mut frontier = Vec::new();
    let mut best_return = f64::NEG_INFINITY;
    for idx in order {
        if samples[idx].net_return > best_return {
            frontier.push(idx);
            best_return = samples[idx].net_return;
        }
    }
    frontier
}

use super::super::domain::{round_hundredths, CriterionScores, PriorityOrder, ScoreVector};

/// Weight applied to the criterion at each 1-based priority rank.
pub const PRIORITY_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];
pub const DEFAULT_PAST_PARTICIPATION_PENALTY: f64 = 0.8;

/// Weighted sum over the priority order; criteria left out of the order weigh nothing.
/// An empty order falls back to the unweighted mean.
pub fn overall(criteria: &CriterionScores, priority: &PriorityOrder) -> f64 {
    if priority.is_empty() {
        return criteria.mean();
    }

    priority
        .criteria()
        .iter()
        .zip(PRIORITY_WEIGHTS)
        .map(|(criterion, weight)| weight * criteria.get(*criterion))
        .sum()
}

/// Build the final vector: criteria and totals are quantized to hundredths, and the
/// past-participation penalty is applied exactly once after aggregation.
pub fn score_vector(
    criteria: CriterionScores,
    priority: &PriorityOrder,
    past_participation: bool,
    penalty: f64,
) -> ScoreVector {
    let criteria = criteria.rounded();
    let mut total = round_hundredths(overall(&criteria, priority));
    if past_participation {
        total = round_hundredths(total * penalty);
    }

    ScoreVector {
        criteria,
        overall: total.clamp(0.0, 100.0),
    }
}

use std::cmp::Ordering;

use crate::evaluator::CandidateEvaluator;
use crate::types::Ranking;

/// Evaluates every candidate at the same input and orders them best first.
///
/// The sort is stable, so equal scores keep registration order. `NaN`
/// scores sink to the bottom.
pub fn rank(evaluators: &[CandidateEvaluator], distance: f64, ammo: f64) -> Ranking {
    let mut entries = evaluators
        .iter()
        .map(|evaluator| evaluator.evaluate(distance, ammo))
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| descending(a.desirability, b.desirability));

    let ranking = Ranking {
        distance,
        ammo,
        entries,
    };
    tracing::debug!(
        distance,
        ammo,
        recommended = ranking.recommended_id().unwrap_or("none"),
        "candidates ranked"
    );
    ranking
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_orders_high_first_and_nan_last() {
        let mut scores = [10.0, f64::NAN, 89.0, 50.0];
        scores.sort_by(|a, b| descending(*a, *b));
        assert_eq!(scores[0], 89.0);
        assert_eq!(scores[1], 50.0);
        assert_eq!(scores[2], 10.0);
        assert!(scores[3].is_nan());
    }

    #[test]
    fn empty_candidate_list_has_no_recommendation() {
        let ranking = rank(&[], 50.0, 50.0);
        assert!(ranking.entries.is_empty());
        assert!(ranking.recommendation().is_none());
        assert_eq!(ranking.recommended_id(), None);
    }
}

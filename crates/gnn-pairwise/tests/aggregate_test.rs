//! Property tests for score aggregation.

use proptest::prelude::*;

use gnn_pairwise::aggregate::{aggregate, mean_scores, RunResult};

fn runs_from(scores: &[(f64, f64)]) -> Vec<RunResult> {
    scores
        .iter()
        .enumerate()
        .map(|(run, &(score_ab, score_ba))| RunResult {
            run,
            device: None,
            score_ab,
            score_ba,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_preference_is_bounded_for_non_negative_scores(
        scores in prop::collection::vec((0.0f64..10.0, 0.0f64..10.0), 1..12)
    ) {
        let runs = runs_from(&scores);
        let means = mean_scores(&runs).unwrap();
        prop_assume!(means.mean_ab + means.mean_ba > 0.0);
        let (_, p) = aggregate(&runs).unwrap();
        prop_assert!((-1.0..=1.0).contains(&p.value()));
    }

    #[test]
    fn prop_swapping_directions_negates_preference(
        scores in prop::collection::vec((0.001f64..10.0, 0.001f64..10.0), 1..12)
    ) {
        let swapped: Vec<_> = scores.iter().map(|&(ab, ba)| (ba, ab)).collect();
        let (_, p) = aggregate(&runs_from(&scores)).unwrap();
        let (_, q) = aggregate(&runs_from(&swapped)).unwrap();
        prop_assert_eq!(p.value(), -q.value());
    }

    #[test]
    fn prop_lower_forward_score_favours_forward(
        ab in 0.001f64..1.0,
        gap in 0.001f64..1.0,
    ) {
        let (_, p) = aggregate(&runs_from(&[(ab, ab + gap)])).unwrap();
        prop_assert!(p.value() > 0.0);
    }
}

#[test]
fn test_run_order_does_not_change_means() {
    let forward = runs_from(&[(0.1, 0.4), (0.3, 0.2), (0.5, 0.9)]);
    let mut reversed = forward.clone();
    reversed.reverse();
    let a = mean_scores(&forward).unwrap();
    let b = mean_scores(&reversed).unwrap();
    assert!((a.mean_ab - b.mean_ab).abs() < 1e-15);
    assert!((a.mean_ba - b.mean_ba).abs() < 1e-15);
}

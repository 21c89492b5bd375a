//! Scoring and ranking behavior against untrained, trained, and missing
//! models.

use std::sync::Arc;

use edgerank::adapter::outbound::store::MemoryModelStore;
use edgerank::application::BlendPolicy;
use edgerank::domain::{EdgeModel, Opportunity, ScoringMode, Urgency};
use edgerank::testkit::config::{engine_with, memory_engine, retrain_all};
use edgerank::testkit::domain::{opportunity, standard};
use edgerank::testkit::samples;

fn assert_non_increasing(ranked: &[edgerank::domain::ScoredOpportunity]) {
    for pair in ranked.windows(2) {
        assert!(
            pair[0].rank_score >= pair[1].rank_score,
            "{} < {}",
            pair[0].rank_score,
            pair[1].rank_score
        );
    }
}

#[test]
fn untrained_model_passes_confidence_through() {
    let store = Arc::new(MemoryModelStore::with_model(EdgeModel::default()));
    let engine = engine_with(store, BlendPolicy::default(), retrain_all(1));

    let scored = engine.scorer.score(&standard("rain", 0.10, 0.75));

    assert_eq!(scored.ml_score, 0.5);
    assert_eq!(scored.adjusted_confidence, 0.75);
    assert!((scored.expected_value - 0.075).abs() < 1e-12);
    assert!((scored.rank_score - 0.075 * 0.75).abs() < 1e-12);
    assert_eq!(scored.mode, ScoringMode::HeuristicOnly);
}

#[test]
fn negative_edge_keeps_its_sign() {
    let engine = memory_engine();

    let scored = engine.scorer.score(&standard("overpriced", -0.10, 0.75));
    assert!((scored.expected_value + 0.075).abs() < 1e-12);
    assert!(scored.rank_score < 0.0);

    let ranked = engine.scorer.score_and_rank(&[
        standard("overpriced", -0.10, 0.75),
        standard("underpriced", 0.05, 0.5),
    ]);
    assert_eq!(ranked[0].opportunity.market, "underpriced");
    assert_eq!(ranked[1].opportunity.market, "overpriced");
}

#[test]
fn missing_model_scores_like_untrained() {
    let engine = memory_engine();
    let scored = engine.scorer.score(&standard("rain", 0.10, 0.75));

    assert_eq!(scored.ml_score, 0.5);
    assert_eq!(scored.adjusted_confidence, 0.75);
    assert!(!engine.scorer.model_status().available);
}

#[test]
fn urgency_orders_identical_opportunities() {
    let engine = memory_engine();
    let critical = engine
        .scorer
        .score(&opportunity("m", 0.1, 0.6, Urgency::Critical));
    let standard = engine
        .scorer
        .score(&opportunity("m", 0.1, 0.6, Urgency::Standard));
    let fyi = engine.scorer.score(&opportunity("m", 0.1, 0.6, Urgency::Fyi));

    assert!(critical.rank_score >= standard.rank_score);
    assert!(standard.rank_score >= fyi.rank_score);
}

#[test]
fn urgency_ordering_holds_with_trained_model() {
    let engine = memory_engine();
    engine
        .retrainer
        .retrain(&samples::separable_outcomes(120, 3))
        .unwrap();

    let critical = engine
        .scorer
        .score(&opportunity("m", 0.1, 0.6, Urgency::Critical));
    let standard = engine
        .scorer
        .score(&opportunity("m", 0.1, 0.6, Urgency::Standard));
    let fyi = engine.scorer.score(&opportunity("m", 0.1, 0.6, Urgency::Fyi));

    assert_eq!(critical.mode, ScoringMode::Blended);
    assert!(critical.rank_score >= standard.rank_score);
    assert!(standard.rank_score >= fyi.rank_score);
}

#[test]
fn rank_handles_empty_and_singleton_lists() {
    let engine = memory_engine();
    assert!(engine.scorer.score_and_rank(&[]).is_empty());

    let one = engine.scorer.score_and_rank(&[standard("only", 0.2, 0.5)]);
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].opportunity.market, "only");
}

#[test]
fn rank_is_non_increasing_for_generated_batches() {
    let engine = memory_engine();
    let opportunities = samples::opportunities(60, 11);

    let heuristic = engine.scorer.score_and_rank(&opportunities);
    assert_eq!(heuristic.len(), 60);
    assert_non_increasing(&heuristic);

    engine
        .retrainer
        .retrain(&samples::separable_outcomes(200, 12))
        .unwrap();
    let blended = engine.scorer.score_and_rank(&opportunities);
    assert!(blended.iter().all(|s| s.mode == ScoringMode::Blended));
    assert_non_increasing(&blended);
}

#[test]
fn ties_keep_input_order() {
    let engine = memory_engine();
    let ranked = engine.scorer.score_and_rank(&[
        standard("first", 0.1, 0.5),
        standard("second", 0.1, 0.5),
        standard("third", 0.1, 0.5),
    ]);
    let markets: Vec<&str> = ranked.iter().map(|s| s.opportunity.market.as_str()).collect();
    assert_eq!(markets, ["first", "second", "third"]);
}

#[test]
fn hostile_numbers_still_produce_finite_scores() {
    let engine = memory_engine();
    engine
        .retrainer
        .retrain(&samples::separable_outcomes(100, 5))
        .unwrap();

    let hostile = vec![
        Opportunity::builder()
            .market("nan")
            .edge(f64::NAN)
            .confidence(f64::NAN)
            .build(),
        Opportunity::builder()
            .market("inf")
            .edge(f64::INFINITY)
            .confidence(f64::NEG_INFINITY)
            .urgency(Urgency::Critical)
            .build(),
        Opportunity::default(),
    ];

    for scored in engine.scorer.score_and_rank(&hostile) {
        assert!(scored.ml_score > 0.0 && scored.ml_score < 1.0);
        assert!(scored.adjusted_confidence.is_finite());
        assert!(scored.expected_value.is_finite());
        assert!(scored.rank_score.is_finite());
    }
}

#[test]
fn model_below_sample_threshold_is_ignored() {
    let engine = memory_engine();
    let report = engine
        .retrainer
        .retrain(&samples::separable_outcomes(10, 1))
        .unwrap();
    assert!(report.total_training_samples < 20);

    let scored = engine.scorer.score(&standard("m", 0.1, 0.7));
    assert_eq!(scored.mode, ScoringMode::HeuristicOnly);
    assert_eq!(scored.ml_score, 0.5);
    assert_eq!(scored.adjusted_confidence, 0.7);
}

#[test]
fn blend_weight_follows_sample_count() {
    let engine = memory_engine();
    engine
        .retrainer
        .retrain(&samples::separable_outcomes(50, 21))
        .unwrap();

    let status = engine.scorer.model_status();
    assert!(status.blending);
    assert_eq!(status.training_samples, 40);
    assert!((status.ml_weight - 40.0 / 200.0).abs() < 1e-12);

    let scored = engine.scorer.score(&standard("m", 0.1, 0.7));
    let expected = (1.0 - status.ml_weight) * 0.7 + status.ml_weight * scored.ml_score;
    assert!((scored.adjusted_confidence - expected).abs() < 1e-12);
}

#[test]
fn validation_auc_floor_disables_blending() {
    let policy = BlendPolicy {
        min_validation_auc: Some(1.01),
        ..BlendPolicy::default()
    };
    let engine = engine_with(
        Arc::new(MemoryModelStore::new()),
        policy,
        edgerank::application::RetrainSettings::default(),
    );
    let report = engine
        .retrainer
        .retrain(&samples::separable_outcomes(100, 8))
        .unwrap();
    assert!(report.validation_metrics.is_some());

    let scored = engine.scorer.score(&standard("m", 0.1, 0.7));
    assert_eq!(scored.mode, ScoringMode::HeuristicOnly);
    assert!(!engine.scorer.model_status().blending);
}

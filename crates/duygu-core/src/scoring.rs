//! Score normalization and label selection.
//!
//! Classifiers return `{label, score}` pairs with arbitrary label spelling
//! and ordering. [`normalize_scores`] folds them into a dense
//! [`Probabilities`]; [`select_label`] picks the verdict, forcing
//! [`Sentiment::Neutral`] when the top two scores are within
//! [`NEUTRAL_MARGIN`].

use crate::constants::NEUTRAL_MARGIN;
use crate::types::{Analysis, Probabilities, RawScores, ScoredLabel, Sentiment};

/// Whether `text` is empty or whitespace-only.
#[inline]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Fold raw pairs into a dense three-class distribution.
///
/// Later pairs overwrite earlier ones for the same class. Unrecognised
/// labels are dropped. Scores are clamped to `[0, 1]`, non-finite scores
/// count as `0.0`.
pub fn normalize_scores(raw: &[ScoredLabel]) -> Probabilities {
    let mut probs = Probabilities::default();
    for pair in raw {
        if let Some(sentiment) = Sentiment::from_raw_label(&pair.label) {
            probs.set(sentiment, sanitize(pair.score));
        }
    }
    probs
}

/// Pick the verdict for a distribution.
///
/// Argmax ties resolve in canonical order (negative, neutral, positive).
pub fn select_label(probs: &Probabilities) -> Sentiment {
    let mut best = Sentiment::Negative;
    let mut best_score = probs.get(best);
    for (sentiment, score) in probs.iter().skip(1) {
        if score > best_score {
            best = sentiment;
            best_score = score;
        }
    }

    let mut sorted: Vec<f64> = probs.iter().map(|(_, s)| s).collect();
    sorted.sort_by(|a, b| b.total_cmp(a));
    let second = sorted[1];

    if (best_score - second).abs() < NEUTRAL_MARGIN {
        Sentiment::Neutral
    } else {
        best
    }
}

/// Normalize raw classifier output and select a label.
pub fn analyze_scores(raw: RawScores) -> Analysis {
    let probs = normalize_scores(&raw.into_flat());
    let label = select_label(&probs);
    Analysis::Scored { probs, label }
}

fn sanitize(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn probs(negative: f64, neutral: f64, positive: f64) -> Probabilities {
        Probabilities {
            negative,
            neutral,
            positive,
        }
    }

    // ── is_blank ─────────────────────────────────────────────────────────

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\n\t "));
        assert!(!is_blank(" a "));
    }

    // ── normalize_scores ─────────────────────────────────────────────────

    #[test]
    fn three_class_output_maps_directly() {
        let raw = vec![
            ScoredLabel::new("positive", 0.7),
            ScoredLabel::new("neutral", 0.2),
            ScoredLabel::new("negative", 0.1),
        ];
        assert_eq!(normalize_scores(&raw), probs(0.1, 0.2, 0.7));
    }

    #[test]
    fn two_class_output_leaves_neutral_at_zero() {
        let raw = vec![
            ScoredLabel::new("negative", 0.05),
            ScoredLabel::new("positive", 0.95),
        ];
        assert_eq!(normalize_scores(&raw), probs(0.05, 0.0, 0.95));
    }

    #[test]
    fn label_spelling_is_loose() {
        let raw = vec![
            ScoredLabel::new("POS", 0.6),
            ScoredLabel::new("Negatif", 0.3),
            ScoredLabel::new("Neutral-ish", 0.1),
        ];
        assert_eq!(normalize_scores(&raw), probs(0.3, 0.1, 0.6));
    }

    #[test]
    fn unknown_labels_are_ignored() {
        let raw = vec![ScoredLabel::new("LABEL_1", 0.99)];
        assert_eq!(normalize_scores(&raw), Probabilities::default());
    }

    #[test]
    fn later_duplicates_overwrite() {
        let raw = vec![
            ScoredLabel::new("positive", 0.9),
            ScoredLabel::new("Positive", 0.4),
        ];
        assert_eq!(normalize_scores(&raw).positive, 0.4);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let raw = vec![
            ScoredLabel::new("positive", 1.7),
            ScoredLabel::new("negative", -0.2),
            ScoredLabel::new("neutral", f64::NAN),
        ];
        assert_eq!(normalize_scores(&raw), probs(0.0, 0.0, 1.0));
    }

    // ── select_label ─────────────────────────────────────────────────────

    #[test]
    fn clear_winner_is_selected() {
        assert_eq!(select_label(&probs(0.1, 0.2, 0.7)), Sentiment::Positive);
        assert_eq!(select_label(&probs(0.8, 0.1, 0.1)), Sentiment::Negative);
        assert_eq!(select_label(&probs(0.1, 0.8, 0.1)), Sentiment::Neutral);
    }

    #[test]
    fn close_call_becomes_neutral() {
        assert_eq!(select_label(&probs(0.45, 0.0, 0.55)), Sentiment::Neutral);
        assert_eq!(select_label(&probs(0.5, 0.1, 0.4)), Sentiment::Neutral);
    }

    #[test]
    fn decisive_gap_keeps_winner() {
        assert_eq!(select_label(&probs(0.3, 0.0, 0.7)), Sentiment::Positive);
        assert_eq!(select_label(&probs(0.6, 0.4, 0.0)), Sentiment::Negative);
    }

    #[test]
    fn gap_equal_to_margin_keeps_winner() {
        assert_eq!(select_label(&probs(0.5, 0.0, 0.65)), Sentiment::Positive);
        assert_eq!(select_label(&probs(0.65, 0.0, 0.5)), Sentiment::Negative);
        assert_eq!(select_label(&probs(0.2, 0.85, 0.7)), Sentiment::Neutral);
    }

    #[test]
    fn gap_just_under_margin_is_neutral() {
        assert_eq!(select_label(&probs(0.5, 0.0, 0.649)), Sentiment::Neutral);
        assert_eq!(select_label(&probs(0.649, 0.0, 0.5)), Sentiment::Neutral);
    }

    #[test]
    fn margin_boundary_survives_normalization() {
        let raw = RawScores::Flat(vec![
            ScoredLabel::new("negative", 0.5),
            ScoredLabel::new("positive", 0.65),
        ]);
        assert_eq!(
            analyze_scores(raw),
            Analysis::Scored {
                probs: probs(0.5, 0.0, 0.65),
                label: Sentiment::Positive,
            }
        );
    }

    #[test]
    fn all_zero_is_neutral() {
        assert_eq!(select_label(&Probabilities::default()), Sentiment::Neutral);
    }

    // ── analyze_scores ───────────────────────────────────────────────────

    #[test]
    fn analyze_flattens_nested_output() {
        let raw = RawScores::Nested(vec![vec![
            ScoredLabel::new("negative", 0.9),
            ScoredLabel::new("positive", 0.1),
        ]]);
        assert_eq!(
            analyze_scores(raw),
            Analysis::Scored {
                probs: probs(0.9, 0.0, 0.1),
                label: Sentiment::Negative,
            }
        );
    }

    #[test]
    fn analyze_empty_output_is_neutral_zeroes() {
        assert_eq!(
            analyze_scores(RawScores::Flat(vec![])),
            Analysis::Scored {
                probs: Probabilities::default(),
                label: Sentiment::Neutral,
            }
        );
    }

    // ── properties ───────────────────────────────────────────────────────

    fn any_label() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("positive".to_string()),
            Just("NEGATIVE".to_string()),
            Just("Neutral".to_string()),
            Just("LABEL_2".to_string()),
            "[a-zA-Z_]{0,12}",
        ]
    }

    proptest! {
        #[test]
        fn probabilities_stay_in_unit_interval(
            raw in prop::collection::vec((any_label(), any::<f64>()), 0..8)
        ) {
            let raw: Vec<ScoredLabel> =
                raw.into_iter().map(|(l, s)| ScoredLabel::new(l, s)).collect();
            let p = normalize_scores(&raw);
            for (_, score) in p.iter() {
                prop_assert!((0.0..=1.0).contains(&score));
            }
        }

        #[test]
        fn near_ties_are_neutral(
            negative in 0.0f64..=1.0,
            neutral in 0.0f64..=1.0,
            positive in 0.0f64..=1.0,
        ) {
            let p = probs(negative, neutral, positive);
            let mut sorted = [negative, neutral, positive];
            sorted.sort_by(|a, b| b.total_cmp(a));
            if sorted[0] - sorted[1] < NEUTRAL_MARGIN {
                prop_assert_eq!(select_label(&p), Sentiment::Neutral);
            }
        }

        #[test]
        fn decisive_verdict_is_the_argmax(
            negative in 0.0f64..=1.0,
            neutral in 0.0f64..=1.0,
            positive in 0.0f64..=1.0,
        ) {
            let p = probs(negative, neutral, positive);
            let label = select_label(&p);
            if label != Sentiment::Neutral {
                for (_, score) in p.iter() {
                    prop_assert!(p.get(label) >= score);
                }
            }
        }
    }
}

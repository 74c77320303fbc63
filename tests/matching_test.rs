use leavedesk::matching::*;

const SAMPLES: &[&str] = &[
    "John Smith",
    "  jOHN   smith ",
    "O'Brien, Sean",
    "Mary-Jane Watson",
    "José Müller",
    "smith john",
    "Jon Smyth",
    "",
    "!!!",
    "Anne-Marie O'Neil-Smythe III",
];

#[test]
fn test_normalize_is_idempotent() {
    for s in SAMPLES {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "normalize not idempotent for {:?}", s);
    }
}

#[test]
fn test_similarity_is_symmetric() {
    for a in SAMPLES {
        for b in SAMPLES {
            assert_eq!(
                similarity(a, b),
                similarity(b, a),
                "asymmetric score for {:?} / {:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn test_self_similarity_is_one() {
    for s in SAMPLES {
        assert_eq!(similarity(s, s), 1.0, "self similarity of {:?}", s);
    }
}

#[test]
fn test_similarity_stays_in_unit_range() {
    for a in SAMPLES {
        for b in SAMPLES {
            let score = similarity(a, b);
            assert!((0.0..=1.0).contains(&score), "{} out of range", score);
        }
    }
}

#[test]
fn test_normalization_equal_forms_score_one() {
    assert_eq!(similarity("O'Brien", "obrien"), 1.0);
    assert_eq!(similarity("  John  SMITH ", "john smith"), 1.0);
}

#[test]
fn test_typo_scores_above_unrelated_name() {
    let typo = similarity("Jon Smyth", "John Smith");
    let unrelated = similarity("Jon Smyth", "Priya Nair");
    assert!(typo > 0.8, "typo score {}", typo);
    assert!(unrelated < 0.3, "unrelated score {}", unrelated);
}

#[test]
fn test_weights_sum_to_one() {
    assert!((EDIT_WEIGHT + OVERLAP_WEIGHT - 1.0).abs() < 1e-12);
}

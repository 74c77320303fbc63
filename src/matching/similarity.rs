use super::normalize::normalize;
use super::sequence::sequence_ratio;

/// Weight of the edit-distance signal in [`similarity`].
pub const EDIT_WEIGHT: f64 = 0.6;

/// Weight of the sequence-overlap signal in [`similarity`].
pub const OVERLAP_WEIGHT: f64 = 0.4;

/// `1 - levenshtein(a, b) / max(len(a), len(b), 1)`, clamped to [0, 1].
///
/// Inputs are compared as given; lengths count characters, not bytes.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count()).max(1);
    let distance = strsim::levenshtein(a, b);
    (1.0 - distance as f64 / longest as f64).clamp(0.0, 1.0)
}

/// Blended name similarity in [0, 1].
///
/// Both inputs are normalized, then scored as
/// `EDIT_WEIGHT * edit + OVERLAP_WEIGHT * overlap`. Symmetric, and exactly
/// 1.0 when the normalized forms are equal.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a == b {
        return 1.0;
    }

    // The block matcher is order-sensitive; always feed it the same order.
    let (first, second) = if a <= b { (&a, &b) } else { (&b, &a) };
    let edit = edit_similarity(first, second);
    let overlap = sequence_ratio(first, second);

    (EDIT_WEIGHT * edit + OVERLAP_WEIGHT * overlap).clamp(0.0, 1.0)
}

//! Name normalization and similarity scoring.
//!
//! Every comparison in the resolver goes through [`similarity`], which
//! normalizes both inputs first so that case, punctuation and spacing never
//! affect a score.

mod normalize;
mod sequence;
mod similarity;

pub use normalize::normalize;
pub use sequence::sequence_ratio;
pub use similarity::{edit_similarity, similarity, EDIT_WEIGHT, OVERLAP_WEIGHT};

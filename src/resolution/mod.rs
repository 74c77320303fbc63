//! Employee name resolution.
//!
//! Turns a free-text name (plus an optional hint) into exactly one of
//! not-found, resolved or ambiguous, using exact directory lookups first and
//! fuzzy ranking over active employees as a fallback.

mod ranker;
mod resolver;

pub use ranker::{rank, score_employee, DEFAULT_MATCH_THRESHOLD, FALLBACK_LIMIT};
pub use resolver::{EmployeeResolver, ResolveOptions};

use crate::matching::similarity;
use crate::types::{Candidate, Employee, NameParts};

/// Minimum best score for a record to count as a fuzzy match.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

/// Maximum number of fuzzy matches the resolver keeps.
pub const FALLBACK_LIMIT: usize = 5;

/// Best similarity between a query and one employee.
///
/// Scores the query against "first last" and "last first", and, when the
/// query has both a first and a last token, the mean of the first-to-first
/// and last-to-last scores. Returns the maximum.
pub fn score_employee(query: &str, parts: &NameParts, employee: &Employee) -> f64 {
    let mut best = similarity(query, &employee.full_name());
    best = best.max(similarity(query, &employee.reversed_name()));

    if parts.has_last() {
        let first = similarity(&parts.first, &employee.first_name);
        let last = similarity(&parts.last, &employee.last_name);
        best = best.max((first + last) / 2.0);
    }

    best
}

/// Ranks `employees` against `query`, keeping those scoring at least
/// `threshold`.
///
/// Sorted by score descending; equal scores keep their input order.
pub fn rank(query: &str, employees: &[Employee], threshold: f64) -> Vec<Candidate> {
    let parts = NameParts::from_query(query);

    let mut candidates: Vec<Candidate> = employees
        .iter()
        .filter_map(|employee| {
            let score = score_employee(query, &parts, employee);
            (score >= threshold).then(|| Candidate {
                employee: employee.clone(),
                score,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_name_scores_perfectly() {
        let emp = Employee::new(1, "John", "Smith");
        let parts = NameParts::from_query("Smith John");
        assert_eq!(score_employee("Smith John", &parts, &emp), 1.0);
    }

    #[test]
    fn test_middle_name_uses_part_average() {
        let emp = Employee::new(1, "John", "Smith");
        let query = "John Fitzgerald Smith";
        let parts = NameParts::from_query(query);
        assert_eq!(score_employee(query, &parts, &emp), 1.0);
        assert!(similarity(query, "John Smith") < 1.0);
    }

    #[test]
    fn test_rank_filters_and_sorts() {
        let employees = vec![
            Employee::new(1, "Jane", "Doe"),
            Employee::new(2, "John", "Smithers"),
            Employee::new(3, "John", "Smith"),
        ];
        let ranked = rank("Jon Smith", &employees, DEFAULT_MATCH_THRESHOLD);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].employee.employee_id, 3);
        assert_eq!(ranked[1].employee.employee_id, 2);
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let employees = vec![
            Employee::new(7, "Ann", "Lee"),
            Employee::new(3, "Ann", "Lee"),
            Employee::new(5, "Ann", "Lee"),
        ];
        let ids: Vec<u64> = rank("ann lee", &employees, DEFAULT_MATCH_THRESHOLD)
            .iter()
            .map(|c| c.employee.employee_id)
            .collect();
        assert_eq!(ids, vec![7, 3, 5]);
    }

    #[test]
    fn test_rank_threshold_is_inclusive_and_tunable() {
        let employees = vec![Employee::new(1, "John", "Smith")];
        assert_eq!(rank("Jon Smyth", &employees, 1.0).len(), 0);
        assert_eq!(rank("John Smith", &employees, 1.0).len(), 1);
        assert_eq!(rank("Zzqx", &employees, 0.0).len(), 1);
    }
}

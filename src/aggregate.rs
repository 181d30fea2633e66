// aggregate.rs
use crate::models::{Ballot, CandidateTotal};
use std::collections::HashMap;

/// Sum every user's ballot into per-candidate totals, in definition order.
///
/// A ballot may mention names that are no longer in the candidate list; those
/// entries are skipped rather than treated as an error. Candidates nobody has
/// allocated points to total zero.
pub fn aggregate(candidates: &[String], ballots: &HashMap<String, Ballot>) -> Vec<CandidateTotal> {
    candidates
        .iter()
        .map(|name| CandidateTotal {
            name: name.clone(),
            points: ballots
                .values()
                .map(|ballot| ballot.get(name).copied().unwrap_or(0))
                .sum(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn ballot(entries: &[(&str, u64)]) -> Ballot {
        entries
            .iter()
            .map(|(name, points)| (name.to_string(), *points))
            .collect()
    }

    #[test]
    fn sums_points_per_candidate_across_users() {
        let candidates = names(&["Red", "Blue", "Green"]);
        let mut ballots = HashMap::new();
        ballots.insert(
            "user-a".to_string(),
            ballot(&[("Red", 30), ("Blue", 20), ("Green", 50)]),
        );
        ballots.insert(
            "user-b".to_string(),
            ballot(&[("Red", 60), ("Blue", 10), ("Green", 30)]),
        );

        let totals = aggregate(&candidates, &ballots);

        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0], CandidateTotal { name: "Red".into(), points: 90 });
        assert_eq!(totals[1], CandidateTotal { name: "Blue".into(), points: 30 });
        assert_eq!(totals[2], CandidateTotal { name: "Green".into(), points: 80 });
    }

    #[test]
    fn zero_ballots_yield_zero_for_every_candidate() {
        let candidates = names(&["Red", "Blue"]);
        let totals = aggregate(&candidates, &HashMap::new());
        assert!(totals.iter().all(|t| t.points == 0));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn unknown_ballot_keys_are_ignored() {
        let candidates = names(&["Red"]);
        let mut ballots = HashMap::new();
        ballots.insert(
            "user-a".to_string(),
            ballot(&[("Red", 40), ("Removed", 60)]),
        );

        let totals = aggregate(&candidates, &ballots);

        assert_eq!(totals, vec![CandidateTotal { name: "Red".into(), points: 40 }]);
    }

    #[test]
    fn candidate_missing_from_a_ballot_counts_zero() {
        let candidates = names(&["Red", "Blue"]);
        let mut ballots = HashMap::new();
        ballots.insert("user-a".to_string(), ballot(&[("Red", 100)]));

        let totals = aggregate(&candidates, &ballots);

        assert_eq!(totals[1].points, 0);
    }

    #[test]
    fn totals_follow_definition_order_not_ballot_order() {
        let candidates = names(&["Zebra", "Apple"]);
        let mut ballots = HashMap::new();
        ballots.insert("user-a".to_string(), ballot(&[("Apple", 70), ("Zebra", 30)]));

        let totals = aggregate(&candidates, &ballots);

        assert_eq!(totals[0].name, "Zebra");
        assert_eq!(totals[1].name, "Apple");
    }
}

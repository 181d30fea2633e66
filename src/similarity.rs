// similarity.rs
use tracing::debug;

/// Similarity score between two candidates, in `[0, 1]`. Higher means more
/// alike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateSimilarity {
    pub similarity_score: f64,
}

/// Scores above this are flagged as too similar to an existing candidate.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Outcome of checking a proposed candidate against the existing field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityCheck {
    pub is_similar: bool,
    pub similarity_score: f64,
}

/// Score one proposed candidate against a set of existing ones.
///
/// Stub: always reports 0.65 until a real scoring service is wired up.
pub async fn candidate_similarity(
    _new_candidate: &str,
    _existing_candidates: &[String],
) -> CandidateSimilarity {
    CandidateSimilarity {
        similarity_score: 0.65,
    }
}

/// Check a proposed candidate name, taking the highest score across all
/// existing candidates and flagging it when that exceeds the threshold.
pub async fn similarity_check(new_candidate: &str, existing_candidates: &[String]) -> SimilarityCheck {
    let mut max_score: f64 = 0.0;

    for existing in existing_candidates {
        let similarity =
            candidate_similarity(new_candidate, std::slice::from_ref(existing)).await;
        max_score = max_score.max(similarity.similarity_score);
    }

    debug!(%new_candidate, max_score, "similarity check");
    SimilarityCheck {
        is_similar: max_score > SIMILARITY_THRESHOLD,
        similarity_score: max_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_existing_candidates_scores_zero() {
        let check = similarity_check("Purple", &[]).await;
        assert!(!check.is_similar);
        assert_eq!(check.similarity_score, 0.0);
    }

    #[tokio::test]
    async fn stub_score_stays_under_the_threshold() {
        let existing = vec!["Red".to_string(), "Blue".to_string()];
        let check = similarity_check("Crimson", &existing).await;
        assert!(!check.is_similar);
        assert_eq!(check.similarity_score, 0.65);
    }
}

use serde::Serialize;

use super::domain::{Candidate, CandidateId, DiversityMarker, Position, ScoreVector};
use super::scoring::ScoringStrategy;

/// One row of a ranking table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub candidate_id: CandidateId,
    pub name: String,
    #[serde(flatten)]
    pub scores: ScoreVector,
    pub candidate_skills: String,
    pub education: String,
    pub gender: String,
    pub category: String,
    pub past_participant: bool,
    pub diversity: Vec<DiversityMarker>,
}

impl RankedCandidate {
    fn new(candidate: &Candidate, scores: ScoreVector) -> Self {
        Self {
            rank: 0,
            candidate_id: candidate.id.clone(),
            name: candidate.name.clone(),
            scores,
            candidate_skills: candidate.skills.join(", "),
            education: candidate.education.clone(),
            gender: candidate.gender.to_uppercase(),
            category: candidate.category.to_uppercase(),
            past_participant: candidate.past_participation,
            diversity: candidate.diversity_markers(),
        }
    }
}

/// Score every candidate against `position` and order best first.
///
/// The sort is stable, so candidates with equal overall scores keep their input order.
/// The list is not truncated to the position's capacity.
pub fn rank(
    strategy: &dyn ScoringStrategy,
    position: &Position,
    candidates: &[Candidate],
) -> Vec<RankedCandidate> {
    let mut rows: Vec<RankedCandidate> = candidates
        .iter()
        .map(|candidate| RankedCandidate::new(candidate, strategy.score(candidate, position)))
        .collect();

    rows.sort_by(|a, b| b.scores.overall.total_cmp(&a.scores.overall));

    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index + 1;
    }

    tracing::debug!(
        position = %position.key,
        candidates = rows.len(),
        "ranking computed"
    );
    rows
}

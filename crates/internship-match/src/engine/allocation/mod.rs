//! Quota-constrained greedy allotment.
//!
//! A run scores every candidate against every selected position, reserves one female and
//! one diversity seat per position where candidates exist, then fills the remaining seats
//! from a single global best-score-first walk. Candidates left over are waitlisted.
//! The result is a heuristic, not an optimal assignment.

pub mod report;

use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Candidate, Position, ScoreVector};
use super::scoring::ScoringStrategy;

pub use report::{
    AllotmentRecord, AllotmentRecordView, AllotmentReport, AllotmentReportView, AllotmentStatus,
    AllotmentSummary, PositionFill, QuotaKind, NOT_ALLOTTED,
};

#[derive(Debug, Clone, Copy)]
struct Seat {
    position: usize,
    quota: Option<QuotaKind>,
}

#[derive(Debug, Clone, Copy)]
struct Pair {
    candidate: usize,
    position: usize,
    overall: f64,
}

/// Per-run state, indexed by candidate and position input order.
struct Run<'a> {
    candidates: &'a [Candidate],
    positions: &'a [Position],
    matrix: Vec<Vec<ScoreVector>>,
    seats: Vec<Option<Seat>>,
    filled: Vec<u32>,
    quota_seats: Vec<u32>,
}

impl Run<'_> {
    fn has_free_seat(&self, position: usize) -> bool {
        self.filled[position] < self.positions[position].offers
    }

    fn assign(&mut self, candidate: usize, position: usize, quota: Option<QuotaKind>) {
        self.seats[candidate] = Some(Seat { position, quota });
        self.filled[position] += 1;
        if quota.is_some() {
            self.quota_seats[position] += 1;
        }
    }

    /// Candidates for one position, best first, ties in input order.
    fn pool(&self, position: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..self.candidates.len()).collect();
        pool.sort_by(|&a, &b| {
            self.matrix[b][position]
                .overall
                .total_cmp(&self.matrix[a][position].overall)
        });
        pool
    }

    fn first_available(
        &self,
        pool: &[usize],
        eligible: impl Fn(&Candidate) -> bool,
    ) -> Option<usize> {
        pool.iter()
            .copied()
            .find(|&index| self.seats[index].is_none() && eligible(&self.candidates[index]))
    }

    fn reserve_quotas(&mut self) {
        for position in 0..self.positions.len() {
            if self.positions[position].offers == 0 {
                continue;
            }
            let pool = self.pool(position);

            if let Some(candidate) = self.first_available(&pool, Candidate::is_female) {
                self.assign(candidate, position, Some(QuotaKind::Female));
            }

            if !self.has_free_seat(position) {
                continue;
            }
            if let Some(candidate) = self.first_available(&pool, Candidate::is_diversity) {
                self.assign(candidate, position, Some(QuotaKind::Diversity));
            }
        }
    }

    fn fill_greedily(&mut self) {
        let mut pairs: Vec<Pair> = Vec::new();
        for (candidate, row) in self.matrix.iter().enumerate() {
            if self.seats[candidate].is_some() {
                continue;
            }
            for (position, scores) in row.iter().enumerate() {
                pairs.push(Pair {
                    candidate,
                    position,
                    overall: scores.overall,
                });
            }
        }
        pairs.sort_by(|a, b| b.overall.total_cmp(&a.overall));

        for pair in pairs {
            if self.seats[pair.candidate].is_none() && self.has_free_seat(pair.position) {
                self.assign(pair.candidate, pair.position, None);
            }
        }
    }

    fn into_report(self) -> AllotmentReport {
        let mut records: Vec<AllotmentRecord> = self
            .candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                let (status, position, scores, quota) = match self.seats[index] {
                    Some(seat) => (
                        AllotmentStatus::Allotted,
                        Some(&self.positions[seat.position]),
                        self.matrix[index][seat.position],
                        seat.quota,
                    ),
                    None => (AllotmentStatus::Waitlisted, None, ScoreVector::zero(), None),
                };
                AllotmentRecord {
                    candidate_id: candidate.id.clone(),
                    name: candidate.name.clone(),
                    status,
                    position: position.map(|position| position.key.clone()),
                    post: position.map(|position| position.post.clone()),
                    scores,
                    quota,
                    gender: candidate.gender.to_uppercase(),
                    category: candidate.category.to_uppercase(),
                    diversity: candidate.diversity_markers(),
                }
            })
            .collect();

        records.sort_by(|a, b| {
            b.is_allotted()
                .cmp(&a.is_allotted())
                .then_with(|| b.scores.overall.total_cmp(&a.scores.overall))
        });

        let positions: Vec<PositionFill> = self
            .positions
            .iter()
            .enumerate()
            .map(|(index, position)| PositionFill {
                key: position.key.clone(),
                post: position.post.clone(),
                capacity: position.offers,
                filled: self.filled[index],
                quota_seats: self.quota_seats[index],
            })
            .collect();

        let total_allotted = records.iter().filter(|record| record.is_allotted()).count();
        let summary = AllotmentSummary {
            total_candidates: records.len(),
            positions_selected: positions.len(),
            total_capacity: self
                .positions
                .iter()
                .map(|position| u64::from(position.offers))
                .sum(),
            total_allotted,
            total_waitlisted: records.len() - total_allotted,
            positions,
        };

        AllotmentReport { records, summary }
    }
}

/// Runs allotments with a shared scoring strategy. Holds no state between runs.
#[derive(Clone)]
pub struct AllocationEngine {
    strategy: Arc<dyn ScoringStrategy>,
}

impl AllocationEngine {
    pub fn new(strategy: Arc<dyn ScoringStrategy>) -> Self {
        Self { strategy }
    }

    pub fn allocate(&self, candidates: &[Candidate], positions: &[Position]) -> AllotmentReport {
        let matrix: Vec<Vec<ScoreVector>> = candidates
            .iter()
            .map(|candidate| {
                positions
                    .iter()
                    .map(|position| self.strategy.score(candidate, position))
                    .collect()
            })
            .collect();
        debug!(
            candidates = candidates.len(),
            positions = positions.len(),
            scorer = self.strategy.name(),
            "score matrix built"
        );

        let mut run = Run {
            candidates,
            positions,
            matrix,
            seats: vec![None; candidates.len()],
            filled: vec![0; positions.len()],
            quota_seats: vec![0; positions.len()],
        };

        run.reserve_quotas();
        debug!(
            reserved = run.quota_seats.iter().sum::<u32>(),
            "quota reservation complete"
        );

        run.fill_greedily();
        debug!(
            filled = run.filled.iter().sum::<u32>(),
            "greedy fill complete"
        );

        let report = run.into_report();
        info!(
            candidates = report.summary.total_candidates,
            positions = report.summary.positions_selected,
            allotted = report.summary.total_allotted,
            waitlisted = report.summary.total_waitlisted,
            "allotment finished"
        );
        report
    }
}

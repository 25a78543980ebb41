use serde::Serialize;

use super::super::domain::{CandidateId, DiversityMarker, PositionKey, ScoreVector};

/// Placeholder shown instead of a position title for waitlisted candidates.
pub const NOT_ALLOTTED: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllotmentStatus {
    Allotted,
    Waitlisted,
}

impl AllotmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Allotted => "Allotted",
            Self::Waitlisted => "Waitlisted",
        }
    }
}

/// Quota under which a seat was reserved ahead of the greedy pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaKind {
    Female,
    Diversity,
}

impl QuotaKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Diversity => "Diversity",
        }
    }
}

/// Final outcome for one candidate. Waitlisted records carry zero scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllotmentRecord {
    pub candidate_id: CandidateId,
    pub name: String,
    pub status: AllotmentStatus,
    pub position: Option<PositionKey>,
    pub post: Option<String>,
    pub scores: ScoreVector,
    pub quota: Option<QuotaKind>,
    pub gender: String,
    pub category: String,
    pub diversity: Vec<DiversityMarker>,
}

impl AllotmentRecord {
    pub fn is_allotted(&self) -> bool {
        self.status == AllotmentStatus::Allotted
    }

    pub fn view(&self) -> AllotmentRecordView {
        AllotmentRecordView {
            candidate_id: self.candidate_id.clone(),
            name: self.name.clone(),
            status: self.status,
            status_label: self.status.label(),
            allotted_position: self
                .post
                .clone()
                .unwrap_or_else(|| NOT_ALLOTTED.to_string()),
            position_key: self.position.clone(),
            scores: self.scores,
            quota: self.quota.map(QuotaKind::label),
            gender: self.gender.clone(),
            category: self.category.clone(),
            diversity: self
                .diversity
                .iter()
                .map(|marker| marker.label())
                .collect(),
        }
    }
}

/// Seat usage for one selected position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionFill {
    pub key: PositionKey,
    pub post: String,
    pub capacity: u32,
    pub filled: u32,
    pub quota_seats: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllotmentSummary {
    pub total_candidates: usize,
    pub positions_selected: usize,
    pub total_capacity: u64,
    pub total_allotted: usize,
    pub total_waitlisted: usize,
    pub positions: Vec<PositionFill>,
}

/// Result of one allocation run: one record per candidate plus the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct AllotmentReport {
    pub records: Vec<AllotmentRecord>,
    pub summary: AllotmentSummary,
}

impl AllotmentReport {
    pub fn allotted(&self) -> impl Iterator<Item = &AllotmentRecord> {
        self.records.iter().filter(|record| record.is_allotted())
    }

    pub fn waitlisted(&self) -> impl Iterator<Item = &AllotmentRecord> {
        self.records.iter().filter(|record| !record.is_allotted())
    }

    pub fn record_for(&self, candidate: &CandidateId) -> Option<&AllotmentRecord> {
        self.records
            .iter()
            .find(|record| &record.candidate_id == candidate)
    }

    pub fn assigned_to<'a>(
        &'a self,
        position: &PositionKey,
    ) -> impl Iterator<Item = &'a AllotmentRecord> + 'a {
        let position = position.clone();
        self.records
            .iter()
            .filter(move |record| record.position.as_ref() == Some(&position))
    }

    pub fn view(&self) -> AllotmentReportView {
        AllotmentReportView {
            records: self.records.iter().map(AllotmentRecord::view).collect(),
            summary: self.summary.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AllotmentRecordView {
    pub candidate_id: CandidateId,
    pub name: String,
    pub status: AllotmentStatus,
    pub status_label: &'static str,
    pub allotted_position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_key: Option<PositionKey>,
    #[serde(flatten)]
    pub scores: ScoreVector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<&'static str>,
    pub gender: String,
    pub category: String,
    pub diversity: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllotmentReportView {
    pub records: Vec<AllotmentRecordView>,
    pub summary: AllotmentSummary,
}

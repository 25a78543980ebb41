//! Candidate scoring, ranking and quota-aware allotment.
//!
//! Leaf modules first: the skill taxonomy and domain types, then the criterion scorers and
//! strategies, then ranking and allotment. Intake, presets, the service and the router wrap
//! the engine for the HTTP and CLI surfaces.

pub mod allocation;
pub mod domain;
pub mod intake;
pub mod presets;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod taxonomy;

#[cfg(test)]
mod tests;

pub use allocation::{
    AllocationEngine, AllotmentRecord, AllotmentRecordView, AllotmentReport, AllotmentReportView,
    AllotmentStatus, AllotmentSummary, PositionFill, QuotaKind, NOT_ALLOTTED,
};
pub use domain::{
    Candidate, CandidateId, Criterion, CriterionScores, DiversityMarker, DuplicateCriterion,
    Position, PositionKey, PriorityOrder, ScoreVector, UnknownCriterion,
};
pub use intake::{
    candidates_from_path, candidates_from_reader, parse_skills, resolve_positions, IntakeError,
    PositionRequest,
};
pub use presets::{preset, preset_positions, sample_candidates, FormData};
pub use ranking::{rank, RankedCandidate};
pub use repository::{CandidateRepository, RepositoryError};
pub use router::matching_router;
pub use scoring::{
    strategy_from_config, taxonomy_from_config, LogisticModel, PredictiveScorer,
    ProbabilityModel, RuleBasedScorer, ScoringConfig, ScoringStrategy, StrategyError,
};
pub use service::{AllotmentRequest, MatchingService, MatchingServiceError, RankingResponse};
pub use taxonomy::{SkillTaxonomy, TaxonomyDefinition, TaxonomyError, TaxonomyPath};

use std::io::Read;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::allocation::{AllocationEngine, AllotmentReport};
use super::domain::{Candidate, Position};
use super::intake::{self, IntakeError, PositionRequest};
use super::presets::{self, FormData};
use super::ranking::{self, RankedCandidate};
use super::repository::{CandidateRepository, RepositoryError};
use super::scoring::ScoringStrategy;
use super::taxonomy::SkillTaxonomy;

/// Positions to include in one allotment run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllotmentRequest {
    #[serde(default)]
    pub presets: Vec<String>,
    #[serde(default)]
    pub positions: Vec<PositionRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingResponse {
    pub position: Position,
    pub ranking: Vec<RankedCandidate>,
}

/// Service composing the candidate repository, scoring strategy and allotment engine.
pub struct MatchingService<R> {
    repository: Arc<R>,
    strategy: Arc<dyn ScoringStrategy>,
    engine: AllocationEngine,
    form_data: FormData,
}

impl<R> MatchingService<R>
where
    R: CandidateRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        strategy: Arc<dyn ScoringStrategy>,
        taxonomy: &SkillTaxonomy,
    ) -> Self {
        let engine = AllocationEngine::new(strategy.clone());
        Self {
            repository,
            strategy,
            engine,
            form_data: FormData::new(taxonomy),
        }
    }

    /// Validate a candidate CSV and make it the current pool. Returns the row count.
    pub fn load_candidates<Rd: Read>(&self, reader: Rd) -> Result<usize, MatchingServiceError> {
        let candidates = intake::candidates_from_reader(reader)?;
        let rows = candidates.len();
        self.repository.replace(candidates)?;
        info!(rows, "candidate pool replaced");
        Ok(rows)
    }

    pub fn candidates(&self) -> Result<Vec<Candidate>, MatchingServiceError> {
        Ok(self.repository.snapshot()?)
    }

    /// Rank the current pool against one position.
    pub fn rank(&self, request: PositionRequest) -> Result<RankingResponse, MatchingServiceError> {
        let position = request.into_position(1)?;
        let candidates = self.non_empty_pool()?;
        let ranking = ranking::rank(self.strategy.as_ref(), &position, &candidates);
        Ok(RankingResponse { position, ranking })
    }

    /// Allot the current pool across the requested presets and custom positions.
    pub fn allot(
        &self,
        request: AllotmentRequest,
    ) -> Result<AllotmentReport, MatchingServiceError> {
        let positions = intake::resolve_positions(&request.presets, request.positions)?;
        if positions.is_empty() {
            return Err(MatchingServiceError::NoPositions);
        }
        let candidates = self.non_empty_pool()?;
        Ok(self.engine.allocate(&candidates, &positions))
    }

    pub fn presets(&self) -> Vec<Position> {
        presets::preset_positions()
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    fn non_empty_pool(&self) -> Result<Vec<Candidate>, MatchingServiceError> {
        let candidates = self.repository.snapshot()?;
        if candidates.is_empty() {
            return Err(MatchingServiceError::NoCandidates);
        }
        Ok(candidates)
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("no candidate data loaded; upload a CSV first")]
    NoCandidates,
    #[error("select at least one position")]
    NoPositions,
}

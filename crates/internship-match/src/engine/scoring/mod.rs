//! Candidate/position scoring.
//!
//! Ranking and allotment only see the [`ScoringStrategy`] trait. Two implementations ship:
//! the taxonomy rule set ([`RuleBasedScorer`]) and a pluggable probability model wrapped by
//! [`PredictiveScorer`]. Which one runs is decided by [`EngineConfig`].

pub mod aggregate;
pub mod criteria;
pub mod predictive;

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::{Candidate, CriterionScores, Position, ScoreVector};
use super::taxonomy::{SkillTaxonomy, TaxonomyError};
use crate::config::{EngineConfig, ScorerKind};

pub use aggregate::{overall, score_vector, DEFAULT_PAST_PARTICIPATION_PENALTY, PRIORITY_WEIGHTS};
pub use criteria::{
    best_match, education_score, interest_score, location_score, skills_score, SkillMatch,
};
pub use predictive::{LogisticModel, PredictiveScorer, ProbabilityModel};

/// Produces a [`ScoreVector`] for one candidate/position pair.
///
/// Implementations must be pure with respect to their inputs so the allotment engine can
/// rely on deterministic, order-preserving results.
pub trait ScoringStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, candidate: &Candidate, position: &Position) -> ScoreVector;
}

/// Tunables for the rule-based scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringConfig {
    pub core_weight: f64,
    pub past_participation_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            core_weight: criteria::DEFAULT_CORE_WEIGHT,
            past_participation_penalty: DEFAULT_PAST_PARTICIPATION_PENALTY,
        }
    }
}

impl From<&EngineConfig> for ScoringConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            core_weight: config.core_weight,
            past_participation_penalty: config.past_participation_penalty,
        }
    }
}

/// Deterministic scorer built on the skill taxonomy and the criterion rule ladders.
#[derive(Debug, Clone)]
pub struct RuleBasedScorer {
    taxonomy: Arc<SkillTaxonomy>,
    config: ScoringConfig,
}

impl RuleBasedScorer {
    pub fn new(taxonomy: Arc<SkillTaxonomy>, config: ScoringConfig) -> Self {
        Self { taxonomy, config }
    }

    pub fn config(&self) -> ScoringConfig {
        self.config
    }

    /// The four raw criterion scores before aggregation.
    pub fn criteria(&self, candidate: &Candidate, position: &Position) -> CriterionScores {
        CriterionScores {
            skills: skills_score(
                &self.taxonomy,
                &position.skills,
                &candidate.skills,
                self.config.core_weight,
            ),
            education: education_score(
                &candidate.education,
                &position.degrees,
                &position.branches,
            ),
            location: location_score(
                &candidate.city,
                &candidate.state,
                &position.city,
                &position.state,
            ),
            interest: interest_score(&candidate.interest, &position.post),
        }
    }
}

impl ScoringStrategy for RuleBasedScorer {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn score(&self, candidate: &Candidate, position: &Position) -> ScoreVector {
        score_vector(
            self.criteria(candidate, position),
            &position.priority,
            candidate.past_participation,
            self.config.past_participation_penalty,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),
    #[error("failed to read model file: {0}")]
    ModelIo(#[source] std::io::Error),
    #[error("invalid model definition: {0}")]
    ModelParse(#[source] serde_json::Error),
    #[error("predictive scoring selected but no model path configured")]
    MissingModel,
}

/// Load the taxonomy named in configuration, or the built-in one.
pub fn taxonomy_from_config(config: &EngineConfig) -> Result<Arc<SkillTaxonomy>, StrategyError> {
    let taxonomy = match &config.taxonomy_path {
        Some(path) => SkillTaxonomy::from_path(path)?,
        None => SkillTaxonomy::standard(),
    };
    Ok(Arc::new(taxonomy))
}

/// Assemble the configured strategy around a shared taxonomy.
pub fn strategy_from_config(
    config: &EngineConfig,
    taxonomy: Arc<SkillTaxonomy>,
) -> Result<Arc<dyn ScoringStrategy>, StrategyError> {
    let rules = RuleBasedScorer::new(taxonomy, ScoringConfig::from(config));

    let strategy: Arc<dyn ScoringStrategy> = match config.scorer {
        ScorerKind::Rules => Arc::new(rules),
        ScorerKind::Predictive => {
            let path = config.model_path.as_ref().ok_or(StrategyError::MissingModel)?;
            let model = LogisticModel::from_path(path)?;
            Arc::new(PredictiveScorer::new(rules, Arc::new(model)))
        }
    };

    info!(scorer = strategy.name(), "scoring strategy ready");
    Ok(strategy)
}

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::super::domain::{round_hundredths, Candidate, CriterionScores, Position, ScoreVector};
use super::{RuleBasedScorer, ScoringStrategy, StrategyError};

/// Maps the four criterion scores to a suitability probability in `[0, 1]`.
pub trait ProbabilityModel: Send + Sync {
    fn probability(&self, criteria: &CriterionScores) -> f64;
}

/// Logistic regression over criterion scores scaled to `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    #[serde(default)]
    pub intercept: f64,
    pub coefficients: CriterionScores,
}

impl LogisticModel {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StrategyError> {
        serde_json::from_reader(reader).map_err(StrategyError::ModelParse)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StrategyError> {
        let file = File::open(path).map_err(StrategyError::ModelIo)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl ProbabilityModel for LogisticModel {
    fn probability(&self, criteria: &CriterionScores) -> f64 {
        let weights = &self.coefficients;
        let z = self.intercept
            + weights.skills * criteria.skills / 100.0
            + weights.education * criteria.education / 100.0
            + weights.location * criteria.location / 100.0
            + weights.interest * criteria.interest / 100.0;
        1.0 / (1.0 + (-z).exp())
    }
}

/// Reports the rule-based criteria but takes `overall` from a probability model.
pub struct PredictiveScorer {
    rules: RuleBasedScorer,
    model: Arc<dyn ProbabilityModel>,
}

impl PredictiveScorer {
    pub fn new(rules: RuleBasedScorer, model: Arc<dyn ProbabilityModel>) -> Self {
        Self { rules, model }
    }
}

impl ScoringStrategy for PredictiveScorer {
    fn name(&self) -> &'static str {
        "predictive"
    }

    fn score(&self, candidate: &Candidate, position: &Position) -> ScoreVector {
        let criteria = self.rules.criteria(candidate, position).rounded();

        let probability = self.model.probability(&criteria);
        let probability = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let mut overall = round_hundredths(probability * 100.0);
        if candidate.past_participation {
            overall = round_hundredths(overall * self.rules.config().past_participation_penalty);
        }

        ScoreVector { criteria, overall }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domain::{CandidateId, PositionKey, PriorityOrder};
    use crate::engine::scoring::ScoringConfig;
    use crate::engine::taxonomy::SkillTaxonomy;

    struct Fixed(f64);

    impl ProbabilityModel for Fixed {
        fn probability(&self, _criteria: &CriterionScores) -> f64 {
            self.0
        }
    }

    fn scorer(model: impl ProbabilityModel + 'static) -> PredictiveScorer {
        let rules = RuleBasedScorer::new(
            Arc::new(SkillTaxonomy::standard()),
            ScoringConfig::default(),
        );
        PredictiveScorer::new(rules, Arc::new(model))
    }

    fn position() -> Position {
        Position {
            key: PositionKey("custom-1".to_string()),
            post: "Backend Intern".to_string(),
            company: String::new(),
            offers: 1,
            degrees: vec!["B.TECH".to_string()],
            branches: vec![],
            skills: vec!["RUST".to_string()],
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            priority: PriorityOrder::default(),
        }
    }

    fn candidate(past_participation: bool) -> Candidate {
        Candidate {
            id: CandidateId::from_row(1),
            name: "Arjun Mehta".to_string(),
            education: "B.TECH IT".to_string(),
            skills: vec!["RUST".to_string()],
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            interest: String::new(),
            gender: "MALE".to_string(),
            category: "GENERAL".to_string(),
            past_participation,
        }
    }

    #[test]
    fn overall_is_scaled_probability() {
        let vector = scorer(Fixed(0.8765)).score(&candidate(false), &position());
        assert_eq!(vector.overall, 87.65);
        assert_eq!(vector.criteria.skills, 100.0);
        assert_eq!(vector.criteria.location, 100.0);
    }

    #[test]
    fn penalty_applies_to_model_output() {
        let vector = scorer(Fixed(0.5)).score(&candidate(true), &position());
        assert_eq!(vector.overall, 40.0);
    }

    #[test]
    fn out_of_range_probabilities_are_contained() {
        assert_eq!(scorer(Fixed(1.7)).score(&candidate(false), &position()).overall, 100.0);
        assert_eq!(scorer(Fixed(f64::NAN)).score(&candidate(false), &position()).overall, 0.0);
    }

    #[test]
    fn logistic_model_loads_from_json() {
        let json = r#"{
            "intercept": -2.0,
            "coefficients": {"skills": 2.0, "education": 1.0, "location": 0.5, "interest": 0.5}
        }"#;
        let model = LogisticModel::from_reader(json.as_bytes()).expect("model parses");
        let perfect = CriterionScores {
            skills: 100.0,
            education: 100.0,
            location: 100.0,
            interest: 100.0,
        };
        let none = CriterionScores::default();
        // z = 2.0 at the top end, -2.0 at the bottom
        assert!((model.probability(&perfect) - 0.880_797).abs() < 1e-6);
        assert!((model.probability(&none) - 0.119_203).abs() < 1e-6);
    }

    #[test]
    fn malformed_model_is_rejected() {
        match LogisticModel::from_reader("{\"intercept\": 1}".as_bytes()) {
            Err(StrategyError::ModelParse(_)) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}

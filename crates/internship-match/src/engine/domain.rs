use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a candidate within one intake batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn from_row(row: usize) -> Self {
        Self(format!("cand-{row:06}"))
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a position (preset key or generated custom key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionKey(pub String);

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated applicant record. Skills are already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub education: String,
    pub skills: Vec<String>,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub interest: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub past_participation: bool,
}

impl Candidate {
    pub fn is_female(&self) -> bool {
        self.gender.to_uppercase().contains("FEMALE")
    }

    /// SC, ST or PWD anywhere in the category text.
    pub fn is_diversity(&self) -> bool {
        let category = self.category.to_uppercase();
        ["SC", "ST", "PWD"]
            .iter()
            .any(|marker| category.contains(marker))
    }

    pub fn diversity_markers(&self) -> Vec<DiversityMarker> {
        let category = self.category.to_uppercase();
        let mut markers = Vec::new();
        if self.is_female() {
            markers.push(DiversityMarker::Female);
        }
        if category.contains("PWD") {
            markers.push(DiversityMarker::Pwd);
        }
        if category.contains("SC") {
            markers.push(DiversityMarker::Sc);
        }
        if category.contains("ST") {
            markers.push(DiversityMarker::St);
        }
        markers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiversityMarker {
    Female,
    Pwd,
    Sc,
    St,
}

impl DiversityMarker {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Pwd => "PwD",
            Self::Sc => "SC",
            Self::St => "ST",
        }
    }
}

/// Scored dimensions of a candidate/position pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Skills,
    Education,
    Location,
    Interest,
}

impl Criterion {
    pub const fn ordered() -> [Self; 4] {
        [Self::Skills, Self::Education, Self::Location, Self::Interest]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Education => "education",
            Self::Location => "location",
            Self::Interest => "interest",
        }
    }
}

impl FromStr for Criterion {
    type Err = UnknownCriterion;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "skills" | "skill" => Ok(Self::Skills),
            "education" => Ok(Self::Education),
            "location" => Ok(Self::Location),
            "interest" => Ok(Self::Interest),
            _ => Err(UnknownCriterion(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown criterion '{0}' (expected skills, education, location or interest)")]
pub struct UnknownCriterion(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("criterion '{}' appears more than once in the priority order", .0.label())]
pub struct DuplicateCriterion(pub Criterion);

/// Criteria ranked from most to least important. Empty means "unweighted mean".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Criterion>", into = "Vec<Criterion>")]
pub struct PriorityOrder(Vec<Criterion>);

impl PriorityOrder {
    /// For built-in tables whose criteria are known to be distinct.
    pub(crate) fn from_distinct(criteria: &[Criterion]) -> Self {
        debug_assert!(Self::try_from(criteria.to_vec()).is_ok());
        Self(criteria.to_vec())
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<Criterion>> for PriorityOrder {
    type Error = DuplicateCriterion;

    fn try_from(criteria: Vec<Criterion>) -> Result<Self, Self::Error> {
        for (index, criterion) in criteria.iter().enumerate() {
            if criteria[..index].contains(criterion) {
                return Err(DuplicateCriterion(*criterion));
            }
        }
        Ok(Self(criteria))
    }
}

impl From<PriorityOrder> for Vec<Criterion> {
    fn from(order: PriorityOrder) -> Self {
        order.0
    }
}

/// A limited-capacity opening. Requirement lists are normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub key: PositionKey,
    pub post: String,
    #[serde(default)]
    pub company: String,
    pub offers: u32,
    #[serde(rename = "degree", default)]
    pub degrees: Vec<String>,
    #[serde(rename = "branch", default)]
    pub branches: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub priority: PriorityOrder,
}

/// The four criterion scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CriterionScores {
    pub skills: f64,
    pub education: f64,
    pub location: f64,
    pub interest: f64,
}

impl CriterionScores {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Skills => self.skills,
            Criterion::Education => self.education,
            Criterion::Location => self.location,
            Criterion::Interest => self.interest,
        }
    }

    pub fn mean(&self) -> f64 {
        (self.skills + self.education + self.location + self.interest) / 4.0
    }

    pub fn rounded(&self) -> Self {
        Self {
            skills: round_hundredths(self.skills),
            education: round_hundredths(self.education),
            location: round_hundredths(self.location),
            interest: round_hundredths(self.interest),
        }
    }
}

/// Scores for one candidate/position pair. Never mutated once built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    #[serde(flatten)]
    pub criteria: CriterionScores,
    pub overall: f64,
}

impl ScoreVector {
    pub fn zero() -> Self {
        Self::default()
    }
}

pub(crate) fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(gender: &str, category: &str) -> Candidate {
        Candidate {
            id: CandidateId::from_row(1),
            name: "Priya Sharma".to_string(),
            education: "B.TECH CS".to_string(),
            skills: vec!["PYTHON".to_string()],
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
            interest: String::new(),
            gender: gender.to_string(),
            category: category.to_string(),
            past_participation: false,
        }
    }

    #[test]
    fn diversity_flags_follow_category_text() {
        assert!(candidate("MALE", "sc").is_diversity());
        assert!(candidate("MALE", "PWD").is_diversity());
        assert!(!candidate("MALE", "GENERAL").is_diversity());
        assert!(candidate("Female", "GENERAL").is_female());
        assert!(!candidate("MALE", "GENERAL").is_female());
        assert_eq!(
            candidate("FEMALE", "ST").diversity_markers(),
            vec![DiversityMarker::Female, DiversityMarker::St]
        );
    }

    #[test]
    fn priority_order_rejects_duplicates() {
        let error = PriorityOrder::try_from(vec![Criterion::Skills, Criterion::Skills])
            .expect_err("duplicate rejected");
        assert_eq!(error, DuplicateCriterion(Criterion::Skills));

        let order = PriorityOrder::try_from(vec![Criterion::Location]).expect("subset allowed");
        assert_eq!(order.criteria(), &[Criterion::Location]);
    }

    #[test]
    fn criterion_parses_case_insensitively() {
        assert_eq!(" Skills ".parse::<Criterion>(), Ok(Criterion::Skills));
        assert_eq!(
            "salary".parse::<Criterion>(),
            Err(UnknownCriterion("salary".to_string()))
        );
    }

    #[test]
    fn priority_order_deserializes_from_names() {
        let order: PriorityOrder =
            serde_json::from_str(r#"["interest", "skills"]"#).expect("valid order");
        assert_eq!(order.criteria(), &[Criterion::Interest, Criterion::Skills]);

        let error = serde_json::from_str::<PriorityOrder>(r#"["skills", "skills"]"#)
            .expect_err("duplicate rejected");
        assert!(error.to_string().contains("more than once"));
    }
}

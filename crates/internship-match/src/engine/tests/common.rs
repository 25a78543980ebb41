use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::engine::domain::{
    Candidate, CandidateId, Criterion, Position, PositionKey, PriorityOrder,
};
use crate::engine::repository::{CandidateRepository, RepositoryError};
use crate::engine::scoring::{RuleBasedScorer, ScoringConfig, ScoringStrategy};
use crate::engine::service::MatchingService;
use crate::engine::taxonomy::SkillTaxonomy;

pub(super) const CANDIDATE_CSV: &str = "\
Name,Education,Skills,City,State,Interest,Gender,Category,Past_Participation
Priya Sharma,B.TECH CS,PYTHON;AIML;MS EXCEL,Mumbai,Maharashtra,AI and Machine Learning,FEMALE,GENERAL,NO
Rohan Verma,B.TECH IT,\"JAVA, WEB DEVELOPMENT, COMMUNICATION\",Pune,Maharashtra,Full Stack Development,MALE,PWD,NO
Aisha Khan,B.COM ACCOUNTS,TALLY;GST;MS EXCEL,Mumbai,Maharashtra,Accounting and Finance,FEMALE,GENERAL,YES
Suresh Gupta,12TH PASS,DATA ENTRY;MS WORD,Delhi,Delhi,Office Administration,MALE,SC,NO
";

pub(super) fn rules() -> Arc<dyn ScoringStrategy> {
    Arc::new(RuleBasedScorer::new(
        Arc::new(SkillTaxonomy::standard()),
        ScoringConfig::default(),
    ))
}

pub(super) fn candidate(row: usize, name: &str, skills: &[&str], city: &str) -> Candidate {
    Candidate {
        id: CandidateId::from_row(row),
        name: name.to_string(),
        education: "B.TECH CS".to_string(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        city: city.to_string(),
        state: "Maharashtra".to_string(),
        interest: String::new(),
        gender: "MALE".to_string(),
        category: "GENERAL".to_string(),
        past_participation: false,
    }
}

pub(super) fn female(mut candidate: Candidate) -> Candidate {
    candidate.gender = "FEMALE".to_string();
    candidate
}

pub(super) fn with_category(mut candidate: Candidate, category: &str) -> Candidate {
    candidate.category = category.to_string();
    candidate
}

pub(super) fn position(key: &str, skills: &[&str], city: &str, offers: u32) -> Position {
    Position {
        key: PositionKey(key.to_string()),
        post: format!("{key} Intern"),
        company: "Acme".to_string(),
        offers,
        degrees: vec!["B.TECH".to_string()],
        branches: Vec::new(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        city: city.to_string(),
        state: "Maharashtra".to_string(),
        priority: standard_priority(),
    }
}

pub(super) fn standard_priority() -> PriorityOrder {
    PriorityOrder::try_from(vec![
        Criterion::Skills,
        Criterion::Education,
        Criterion::Location,
        Criterion::Interest,
    ])
    .expect("valid order")
}

pub(super) fn build_service() -> (MatchingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service =
        MatchingService::new(repository.clone(), rules(), &SkillTaxonomy::standard());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) candidates: Arc<Mutex<Vec<Candidate>>>,
}

impl CandidateRepository for MemoryRepository {
    fn replace(&self, candidates: Vec<Candidate>) -> Result<(), RepositoryError> {
        *self.candidates.lock().expect("repository mutex poisoned") = candidates;
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<Candidate>, RepositoryError> {
        Ok(self
            .candidates
            .lock()
            .expect("repository mutex poisoned")
            .clone())
    }
}

impl MemoryRepository {
    pub(super) fn snapshot_len(&self) -> usize {
        self.candidates
            .lock()
            .expect("repository mutex poisoned")
            .len()
    }
}

pub(super) struct UnavailableRepository;

impl CandidateRepository for UnavailableRepository {
    fn replace(&self, _candidates: Vec<Candidate>) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn snapshot(&self) -> Result<Vec<Candidate>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

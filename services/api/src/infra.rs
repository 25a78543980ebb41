use internship_match::engine::{Candidate, CandidateRepository, RepositoryError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateRepository {
    candidates: Arc<Mutex<Vec<Candidate>>>,
}

impl InMemoryCandidateRepository {
    pub(crate) fn seeded(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates: Arc::new(Mutex::new(candidates)),
        }
    }
}

impl CandidateRepository for InMemoryCandidateRepository {
    fn replace(&self, candidates: Vec<Candidate>) -> Result<(), RepositoryError> {
        let mut guard = self
            .candidates
            .lock()
            .map_err(|_| RepositoryError::Unavailable("candidate pool lock poisoned".into()))?;
        *guard = candidates;
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<Candidate>, RepositoryError> {
        let guard = self
            .candidates
            .lock()
            .map_err(|_| RepositoryError::Unavailable("candidate pool lock poisoned".into()))?;
        Ok(guard.clone())
    }
}

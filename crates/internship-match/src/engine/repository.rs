use super::domain::Candidate;

/// Storage for the current candidate pool. Each run works on a snapshot.
pub trait CandidateRepository: Send + Sync {
    /// Swap in a freshly validated pool, discarding the previous one.
    fn replace(&self, candidates: Vec<Candidate>) -> Result<(), RepositoryError>;
    fn snapshot(&self) -> Result<Vec<Candidate>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

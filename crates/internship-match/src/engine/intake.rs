//! Candidate CSV intake and position request validation.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::domain::{
    Candidate, CandidateId, Criterion, DuplicateCriterion, Position, PositionKey, PriorityOrder,
    UnknownCriterion,
};
use super::presets;
use super::taxonomy::normalize;

pub const REQUIRED_COLUMNS: [&str; 5] = ["name", "education", "skills", "city", "state"];

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("candidate CSV is missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<&'static str> },
    #[error("row {row} is missing required fields: {}", .fields.join(", "))]
    MissingFields { row: usize, fields: Vec<&'static str> },
    #[error("candidate id '{0}' appears more than once")]
    DuplicateCandidateId(CandidateId),
    #[error("candidate name '{0}' appears more than once")]
    DuplicateCandidateName(String),
    #[error(transparent)]
    UnknownCriterion(#[from] UnknownCriterion),
    #[error(transparent)]
    DuplicateCriterion(#[from] DuplicateCriterion),
    #[error("position key '{0}' appears more than once")]
    DuplicatePositionKey(PositionKey),
    #[error("unknown preset position '{0}'")]
    UnknownPreset(String),
    #[error("invalid candidate CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    education: String,
    #[serde(default)]
    skills: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    interest: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    past_participation: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.trim().is_empty()))
}

/// Split a comma- or semicolon-separated skill list into normalized entries.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(normalize)
        .filter(|skill| !skill.is_empty())
        .collect()
}

/// Parse a candidate CSV. Header names are matched case-insensitively and rows may omit
/// trailing optional columns.
pub fn candidates_from_reader<R: Read>(reader: R) -> Result<Vec<Candidate>, IntakeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: csv::StringRecord = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_lowercase())
        .collect();
    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        warn!(?missing, "candidate CSV rejected");
        return Err(IntakeError::MissingColumns { columns: missing });
    }
    csv_reader.set_headers(headers);

    let rows = csv_reader
        .deserialize::<CandidateRow>()
        .collect::<Result<Vec<_>, _>>()?;
    let explicit_ids: HashSet<CandidateId> = rows
        .iter()
        .filter_map(|row| row.id.clone().map(CandidateId))
        .collect();

    let mut candidates = Vec::with_capacity(rows.len());
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();

    for (index, row) in rows.into_iter().enumerate() {
        let row_number = index + 1;

        let fields = row.blank_required_fields();
        if !fields.is_empty() {
            warn!(row = row_number, ?fields, "candidate row missing required fields");
            return Err(IntakeError::MissingFields {
                row: row_number,
                fields,
            });
        }

        let id = match row.id {
            Some(id) => CandidateId(id),
            None => generated_id(row_number, &explicit_ids, &seen_ids),
        };
        if !seen_ids.insert(id.clone()) {
            return Err(IntakeError::DuplicateCandidateId(id));
        }
        if !seen_names.insert(row.name.clone()) {
            return Err(IntakeError::DuplicateCandidateName(row.name));
        }

        candidates.push(Candidate {
            id,
            name: row.name,
            education: row.education,
            skills: parse_skills(&row.skills),
            city: row.city,
            state: row.state,
            interest: row.interest,
            gender: row.gender,
            category: row.category,
            past_participation: row.past_participation.eq_ignore_ascii_case("YES"),
        });
    }

    Ok(candidates)
}

impl CandidateRow {
    fn blank_required_fields(&self) -> Vec<&'static str> {
        let values = [
            &self.name,
            &self.education,
            &self.skills,
            &self.city,
            &self.state,
        ];
        REQUIRED_COLUMNS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(column, _)| *column)
            .collect()
    }
}

/// Row-numbered id, suffixed when an explicit id elsewhere in the file already uses it.
fn generated_id(
    row_number: usize,
    explicit: &HashSet<CandidateId>,
    assigned: &HashSet<CandidateId>,
) -> CandidateId {
    let base = CandidateId::from_row(row_number);
    let taken = |id: &CandidateId| explicit.contains(id) || assigned.contains(id);
    if !taken(&base) {
        return base;
    }
    let mut suffix = 1;
    loop {
        let candidate = CandidateId(format!("{base}-{suffix}"));
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

pub fn candidates_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>, IntakeError> {
    let file = File::open(path)?;
    candidates_from_reader(file)
}

/// Inbound position definition, validated into a [`Position`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub post: String,
    #[serde(default)]
    pub company: String,
    pub offers: u32,
    #[serde(default)]
    pub degree: Vec<String>,
    #[serde(default)]
    pub branch: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub priority: Vec<String>,
}

impl PositionRequest {
    /// Normalize requirement lists and parse the priority order. `sequence` numbers the
    /// generated `custom-N` key when the request carries none.
    pub fn into_position(self, sequence: usize) -> Result<Position, IntakeError> {
        let criteria = self
            .priority
            .iter()
            .map(|name| name.parse::<Criterion>())
            .collect::<Result<Vec<_>, _>>()?;
        let priority = PriorityOrder::try_from(criteria)?;

        let key = self
            .key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| format!("custom-{sequence}"));

        Ok(Position {
            key: PositionKey(key),
            post: self.post.trim().to_string(),
            company: self.company.trim().to_string(),
            offers: self.offers,
            degrees: normalize_all(&self.degree),
            branches: normalize_all(&self.branch),
            skills: normalize_all(&self.skills),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            priority,
        })
    }
}

fn normalize_all(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| normalize(value))
        .filter(|value| !value.is_empty())
        .collect()
}

/// Resolve preset keys and custom requests into the position list for one run.
/// Presets come first in the order given, followed by custom positions.
pub fn resolve_positions(
    preset_keys: &[String],
    requests: Vec<PositionRequest>,
) -> Result<Vec<Position>, IntakeError> {
    let mut positions = Vec::with_capacity(preset_keys.len() + requests.len());

    for key in preset_keys {
        let preset =
            presets::preset(key.trim()).ok_or_else(|| IntakeError::UnknownPreset(key.clone()))?;
        positions.push(preset);
    }
    for (index, request) in requests.into_iter().enumerate() {
        positions.push(request.into_position(index + 1)?);
    }

    let mut seen = HashSet::new();
    for position in &positions {
        if !seen.insert(&position.key) {
            return Err(IntakeError::DuplicatePositionKey(position.key.clone()));
        }
    }

    Ok(positions)
}

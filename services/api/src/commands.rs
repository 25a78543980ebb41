use clap::Args;
use internship_match::config::AppConfig;
use internship_match::engine::{
    candidates_from_path, preset, preset_positions, rank, resolve_positions,
    strategy_from_config, taxonomy_from_config, AllocationEngine, AllotmentReport, IntakeError,
    Position, PositionRequest, RankedCandidate, RankingResponse, ScoringStrategy,
};
use internship_match::error::AppError;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Candidate CSV export
    #[arg(long)]
    pub(crate) candidates: PathBuf,
    /// Built-in position to rank against (see `presets`)
    #[arg(long, conflicts_with = "position", required_unless_present = "position")]
    pub(crate) preset: Option<String>,
    /// JSON file holding one custom position definition
    #[arg(long)]
    pub(crate) position: Option<PathBuf>,
    /// Print the ranking as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AllotArgs {
    /// Candidate CSV export
    #[arg(long)]
    pub(crate) candidates: PathBuf,
    /// Built-in position to include; repeat for several
    #[arg(long = "preset")]
    pub(crate) presets: Vec<String>,
    /// JSON file holding one custom position or an array of them
    #[arg(long)]
    pub(crate) positions: Option<PathBuf>,
    /// Print the allotment report as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PositionFile {
    Many(Vec<PositionRequest>),
    One(PositionRequest),
}

impl From<PositionFile> for Vec<PositionRequest> {
    fn from(value: PositionFile) -> Self {
        match value {
            PositionFile::Many(requests) => requests,
            PositionFile::One(request) => vec![request],
        }
    }
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        candidates,
        preset: preset_key,
        position,
        json,
    } = args;

    let strategy = load_strategy()?;
    let candidates = candidates_from_path(&candidates)?;

    let position = match (preset_key, position) {
        (Some(key), _) => preset(key.trim()).ok_or(IntakeError::UnknownPreset(key))?,
        (None, Some(path)) => {
            let mut requests: Vec<PositionRequest> = read_position_file(&path)?.into();
            if requests.len() != 1 {
                return Err(invalid_input(format!(
                    "{} must hold exactly one position",
                    path.display()
                )));
            }
            requests.remove(0).into_position(1)?
        }
        (None, None) => return Err(invalid_input("choose --preset or --position")),
    };

    let ranking = rank(strategy.as_ref(), &position, &candidates);
    if json {
        let response = RankingResponse { position, ranking };
        print_json(&response)?;
    } else {
        render_ranking(&position, &ranking, strategy.name());
    }
    Ok(())
}

pub(crate) fn run_allot(args: AllotArgs) -> Result<(), AppError> {
    let AllotArgs {
        candidates,
        presets,
        positions,
        json,
    } = args;

    let requests: Vec<PositionRequest> = match positions {
        Some(path) => read_position_file(&path)?.into(),
        None => Vec::new(),
    };
    let positions = resolve_positions(&presets, requests)?;
    if positions.is_empty() {
        return Err(invalid_input("select at least one --preset or --positions file"));
    }

    let strategy = load_strategy()?;
    let candidates = candidates_from_path(&candidates)?;
    let report = AllocationEngine::new(strategy.clone()).allocate(&candidates, &positions);

    if json {
        print_json(&report.view())?;
    } else {
        render_allotment(&report, strategy.name());
    }
    Ok(())
}

pub(crate) fn run_presets() -> Result<(), AppError> {
    println!("Preset positions");
    for position in preset_positions() {
        render_position_line(&position);
    }
    Ok(())
}

fn load_strategy() -> Result<Arc<dyn ScoringStrategy>, AppError> {
    let config = AppConfig::load()?;
    let taxonomy = taxonomy_from_config(&config.engine)?;
    Ok(strategy_from_config(&config.engine, taxonomy)?)
}

fn read_position_file(path: &Path) -> Result<PositionFile, AppError> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader)
        .map_err(|err| invalid_input(format!("{}: {err}", path.display())))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(io::Error::new(io::ErrorKind::Other, err)))?;
    println!("{rendered}");
    Ok(())
}

fn invalid_input(message: impl Into<String>) -> AppError {
    AppError::Io(io::Error::new(io::ErrorKind::InvalidInput, message.into()))
}

fn render_position_line(position: &Position) {
    let priority: Vec<&str> = position
        .priority
        .criteria()
        .iter()
        .map(|criterion| criterion.label())
        .collect();
    println!(
        "- {} | {} @ {} | {} offers | {}, {} | skills: {} | priority: {}",
        position.key,
        position.post,
        position.company,
        position.offers,
        position.city,
        position.state,
        position.skills.join(", "),
        if priority.is_empty() {
            "equal weights".to_string()
        } else {
            priority.join(" > ")
        }
    );
}

fn render_ranking(position: &Position, ranking: &[RankedCandidate], strategy: &str) {
    println!("Ranking ({strategy} scoring)");
    render_position_line(position);
    println!(
        "{:>4}  {:<24} {:>7} {:>7} {:>7} {:>7} {:>8}",
        "rank", "name", "skills", "edu", "loc", "int", "overall"
    );
    for entry in ranking {
        let criteria = &entry.scores.criteria;
        println!(
            "{:>4}  {:<24} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>8.2}{}",
            entry.rank,
            entry.name,
            criteria.skills,
            criteria.education,
            criteria.location,
            criteria.interest,
            entry.scores.overall,
            if entry.past_participant {
                "  (past participant)"
            } else {
                ""
            }
        );
    }
}

fn render_allotment(report: &AllotmentReport, strategy: &str) {
    let summary = &report.summary;
    println!("Allotment ({strategy} scoring)");
    println!(
        "- {} candidates | {} positions | {} seats",
        summary.total_candidates, summary.positions_selected, summary.total_capacity
    );
    println!(
        "- {} allotted | {} waitlisted",
        summary.total_allotted, summary.total_waitlisted
    );

    println!("Position fill:");
    for fill in &summary.positions {
        println!(
            "  - {} {}: {}/{} filled ({} quota seats)",
            fill.key, fill.post, fill.filled, fill.capacity, fill.quota_seats
        );
    }

    println!("Candidates:");
    for record in &report.records {
        let view = record.view();
        let quota = view
            .quota
            .map(|label| format!(" [{label} quota]"))
            .unwrap_or_default();
        println!(
            "  - {} ({}): {} -> {} | overall {:.2}{}",
            view.name,
            view.candidate_id,
            view.status_label,
            view.allotted_position,
            view.scores.overall,
            quota
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_file_accepts_single_object_or_array() {
        let single: Vec<PositionRequest> =
            serde_json::from_str::<PositionFile>(r#"{"post": "Analyst", "offers": 2}"#)
                .expect("single position")
                .into();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].post, "Analyst");

        let many: Vec<PositionRequest> = serde_json::from_str::<PositionFile>(
            r#"[{"post": "Analyst", "offers": 2}, {"key": "ops", "post": "Ops", "offers": 1}]"#,
        )
        .expect("position array")
        .into();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1].key.as_deref(), Some("ops"));
    }
}

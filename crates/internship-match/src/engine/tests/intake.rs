use super::common::*;

use crate::engine::domain::{
    CandidateId, Criterion, DuplicateCriterion, PositionKey, UnknownCriterion,
};
use crate::engine::intake::{
    candidates_from_reader, parse_skills, resolve_positions, IntakeError, PositionRequest,
};

fn request(key: Option<&str>, priority: &[&str]) -> PositionRequest {
    PositionRequest {
        key: key.map(str::to_string),
        post: " Backend Intern ".to_string(),
        company: "Acme".to_string(),
        offers: 2,
        degree: vec!["b.tech".to_string()],
        branch: vec![" cs ".to_string(), String::new()],
        skills: vec!["rust".to_string(), " sql".to_string()],
        city: "Pune".to_string(),
        state: "Maharashtra".to_string(),
        priority: priority.iter().map(|name| name.to_string()).collect(),
    }
}

#[test]
fn parses_candidate_csv_with_mixed_case_headers() {
    let candidates = candidates_from_reader(CANDIDATE_CSV.as_bytes()).expect("csv parses");

    assert_eq!(candidates.len(), 4);
    assert_eq!(candidates[0].id, CandidateId::from_row(1));
    assert_eq!(candidates[3].id, CandidateId("cand-000004".to_string()));
    assert_eq!(candidates[0].skills, ["PYTHON", "AIML", "MS EXCEL"]);
    assert_eq!(
        candidates[1].skills,
        ["JAVA", "WEB DEVELOPMENT", "COMMUNICATION"]
    );
    assert!(candidates[2].past_participation);
    assert!(!candidates[0].past_participation);
    assert!(candidates[1].is_diversity());
}

#[test]
fn optional_columns_default_when_absent() {
    let csv = "name,education,skills,city,state\nTara,B.SC,SQL,Goa,Goa\n";
    let candidates = candidates_from_reader(csv.as_bytes()).expect("csv parses");

    let tara = &candidates[0];
    assert_eq!(tara.skills, ["SQL"]);
    assert!(tara.interest.is_empty());
    assert!(!tara.past_participation);
    assert!(!tara.is_female());
}

#[test]
fn explicit_ids_are_kept() {
    let csv = "id,name,education,skills,city,state\nS-17,Tara,B.SC,SQL,Goa,Goa\n,Vik,B.SC,SQL,Goa,Goa\n";
    let candidates = candidates_from_reader(csv.as_bytes()).expect("csv parses");

    assert_eq!(candidates[0].id, CandidateId("S-17".to_string()));
    assert_eq!(candidates[1].id, CandidateId::from_row(2));
}

#[test]
fn missing_columns_are_reported_together() {
    let csv = "name,education,city\nTara,B.SC,Goa\n";

    match candidates_from_reader(csv.as_bytes()) {
        Err(IntakeError::MissingColumns { columns }) => {
            assert_eq!(columns, ["skills", "state"]);
        }
        other => panic!("expected missing columns, got {other:?}"),
    }
}

#[test]
fn blank_names_are_rejected_with_row_number() {
    let csv = "name,education,skills,city,state\nTara,B.SC,SQL,Goa,Goa\n ,B.SC,SQL,Goa,Goa\n";

    match candidates_from_reader(csv.as_bytes()) {
        Err(IntakeError::MissingFields { row, fields }) => {
            assert_eq!(row, 2);
            assert_eq!(fields, ["name"]);
        }
        other => panic!("expected missing fields, got {other:?}"),
    }
}

#[test]
fn every_blank_required_field_is_named() {
    let csv = "name,education,skills,city,state\nPriya,,,Pune,\n";

    match candidates_from_reader(csv.as_bytes()) {
        Err(IntakeError::MissingFields { row, fields }) => {
            assert_eq!(row, 1);
            assert_eq!(fields, ["education", "skills", "state"]);
        }
        other => panic!("expected missing fields, got {other:?}"),
    }
}

#[test]
fn rows_may_stop_before_trailing_optional_columns() {
    let csv = "\
name,education,skills,city,state,interest,gender,category,past_participation
Priya,B.TECH CS,PYTHON,Mumbai,Maharashtra,AI,FEMALE,GENERAL,YES
Rohan,B.TECH IT,JAVA,Pune,Maharashtra
";
    let candidates = candidates_from_reader(csv.as_bytes()).expect("csv parses");

    assert_eq!(candidates.len(), 2);
    assert!(candidates[0].past_participation);
    let rohan = &candidates[1];
    assert_eq!(rohan.city, "Pune");
    assert!(rohan.interest.is_empty());
    assert!(rohan.gender.is_empty());
    assert!(!rohan.past_participation);
}

#[test]
fn generated_ids_step_around_explicit_ones() {
    let csv = "\
id,name,education,skills,city,state
cand-000002,Tara,B.SC,SQL,Goa,Goa
,Vik,B.SC,SQL,Goa,Goa
,Asha,BCA,JAVA,Pune,Maharashtra
";
    let candidates = candidates_from_reader(csv.as_bytes()).expect("csv parses");

    let ids: Vec<&str> = candidates.iter().map(|c| c.id.0.as_str()).collect();
    assert_eq!(ids, ["cand-000002", "cand-000002-1", "cand-000003"]);
}

#[test]
fn duplicate_names_are_not_merged() {
    let csv = "name,education,skills,city,state\nTara,B.SC,SQL,Goa,Goa\nTara,BCA,JAVA,Pune,Maharashtra\n";

    let error = candidates_from_reader(csv.as_bytes()).expect_err("duplicate rejected");
    assert!(matches!(error, IntakeError::DuplicateCandidateName(ref name) if name == "Tara"));
}

#[test]
fn duplicate_ids_are_rejected() {
    let csv = "id,name,education,skills,city,state\nA1,Tara,B.SC,SQL,Goa,Goa\nA1,Vik,BCA,JAVA,Pune,Maharashtra\n";

    let error = candidates_from_reader(csv.as_bytes()).expect_err("duplicate rejected");
    assert!(matches!(error, IntakeError::DuplicateCandidateId(ref id) if id.0 == "A1"));
}

#[test]
fn skills_split_on_commas_and_semicolons() {
    assert_eq!(
        parse_skills(" python ; Sql,, ms excel ;"),
        ["PYTHON", "SQL", "MS EXCEL"]
    );
}

#[test]
fn position_requests_are_normalized() {
    let position = request(None, &["skills", "Location"])
        .into_position(3)
        .expect("valid request");

    assert_eq!(position.key, PositionKey("custom-3".to_string()));
    assert_eq!(position.post, "Backend Intern");
    assert_eq!(position.degrees, ["B.TECH"]);
    assert_eq!(position.branches, ["CS"]);
    assert_eq!(position.skills, ["RUST", "SQL"]);
    assert_eq!(
        position.priority.criteria(),
        &[Criterion::Skills, Criterion::Location]
    );
}

#[test]
fn invalid_priority_orders_are_rejected() {
    match request(None, &["skills", "salary"]).into_position(1) {
        Err(IntakeError::UnknownCriterion(UnknownCriterion(name))) => assert_eq!(name, "salary"),
        other => panic!("expected unknown criterion, got {other:?}"),
    }
    match request(None, &["interest", "INTEREST"]).into_position(1) {
        Err(IntakeError::DuplicateCriterion(DuplicateCriterion(criterion))) => {
            assert_eq!(criterion, Criterion::Interest)
        }
        other => panic!("expected duplicate criterion, got {other:?}"),
    }
}

#[test]
fn presets_resolve_before_custom_positions() {
    let positions = resolve_positions(
        &["job4".to_string(), "job1".to_string()],
        vec![request(None, &[]), request(Some("intern-x"), &[])],
    )
    .expect("positions resolve");

    let keys: Vec<&str> = positions.iter().map(|p| p.key.0.as_str()).collect();
    assert_eq!(keys, ["job4", "job1", "custom-1", "intern-x"]);
}

#[test]
fn unknown_presets_and_key_collisions_fail() {
    let error = resolve_positions(&["job9".to_string()], Vec::new()).expect_err("unknown preset");
    assert!(matches!(error, IntakeError::UnknownPreset(ref key) if key == "job9"));

    let error = resolve_positions(&["job2".to_string()], vec![request(Some("job2"), &[])])
        .expect_err("key collision");
    assert!(matches!(error, IntakeError::DuplicatePositionKey(ref key) if key.0 == "job2"));
}

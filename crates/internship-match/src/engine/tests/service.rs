use super::common::*;

use crate::engine::allocation::AllotmentStatus;
use crate::engine::intake::{IntakeError, PositionRequest};
use crate::engine::service::{AllotmentRequest, MatchingServiceError};

fn backend_request() -> PositionRequest {
    PositionRequest {
        key: Some("backend".to_string()),
        post: "Backend Intern".to_string(),
        company: "Acme".to_string(),
        offers: 1,
        degree: vec!["B.TECH".to_string()],
        branch: vec!["IT".to_string()],
        skills: vec!["JAVA".to_string()],
        city: "Pune".to_string(),
        state: "Maharashtra".to_string(),
        priority: vec!["skills".to_string(), "location".to_string()],
    }
}

#[test]
fn failed_upload_keeps_the_previous_pool() {
    let (service, repository) = build_service();
    service
        .load_candidates(CANDIDATE_CSV.as_bytes())
        .expect("pool loads");

    let result = service.load_candidates("name\nTara\n".as_bytes());

    assert!(matches!(
        result,
        Err(MatchingServiceError::Intake(IntakeError::MissingColumns { .. }))
    ));
    assert_eq!(repository.snapshot_len(), 4);
    let pool = service.candidates().expect("pool readable");
    assert_eq!(pool[0].name, "Priya Sharma");
}

#[test]
fn rank_uses_the_loaded_pool() {
    let (service, _) = build_service();
    service
        .load_candidates(CANDIDATE_CSV.as_bytes())
        .expect("pool loads");

    let response = service.rank(backend_request()).expect("ranking succeeds");

    assert_eq!(response.position.key.0, "backend");
    assert_eq!(response.ranking[0].name, "Rohan Verma");
    assert_eq!(response.ranking[0].scores.overall, 70.0);
}

#[test]
fn allot_requires_positions_and_candidates() {
    let (service, _) = build_service();

    let error = service
        .allot(AllotmentRequest {
            presets: vec!["job1".to_string()],
            positions: Vec::new(),
        })
        .expect_err("empty pool rejected");
    assert!(matches!(error, MatchingServiceError::NoCandidates));

    service
        .load_candidates(CANDIDATE_CSV.as_bytes())
        .expect("pool loads");
    let error = service
        .allot(AllotmentRequest::default())
        .expect_err("no positions rejected");
    assert!(matches!(error, MatchingServiceError::NoPositions));
}

#[test]
fn allot_fills_quota_seats_from_the_pool() {
    let (service, _) = build_service();
    service
        .load_candidates(CANDIDATE_CSV.as_bytes())
        .expect("pool loads");

    let report = service
        .allot(AllotmentRequest {
            presets: Vec::new(),
            positions: vec![backend_request()],
        })
        .expect("allotment succeeds");

    let allotted: Vec<&str> = report
        .allotted()
        .map(|record| record.name.as_str())
        .collect();
    // the single seat goes to the best-scoring female candidate
    assert_eq!(allotted, ["Priya Sharma"]);
    assert_eq!(report.summary.total_waitlisted, 3);
    assert!(report
        .waitlisted()
        .all(|record| record.status == AllotmentStatus::Waitlisted && record.post.is_none()));
}

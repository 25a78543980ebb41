use super::common::*;

use crate::engine::domain::DiversityMarker;
use crate::engine::ranking::rank;

#[test]
fn exact_skill_and_city_match_scores_at_least_ninety() {
    let alice = female(candidate(1, "Alice", &["PYTHON", "AIML"], "Pune"));
    let p1 = position("p1", &["PYTHON"], "Pune", 1);

    let ranking = rank(rules().as_ref(), &p1, &[alice]);

    let row = &ranking[0];
    assert_eq!(row.rank, 1);
    assert_eq!(row.scores.criteria.skills, 100.0);
    assert_eq!(row.scores.criteria.location, 100.0);
    assert!(row.scores.overall >= 90.0, "overall was {}", row.scores.overall);
}

#[test]
fn same_subgroup_skill_earns_half_credit() {
    let gopher = candidate(1, "Gopher", &["GOLANG"], "Pune");
    let backend = position("backend", &["PYTHON"], "Pune", 1);

    let scores = rules().score(&gopher, &backend);

    assert_eq!(scores.criteria.skills, 50.0);
}

#[test]
fn ties_keep_input_order() {
    let first = candidate(1, "First", &["PYTHON"], "Pune");
    let second = candidate(2, "Second", &["PYTHON"], "Pune");
    let stronger = candidate(3, "Stronger", &["PYTHON", "AIML"], "Pune");
    let role = position("ml", &["PYTHON", "AIML"], "Pune", 1);

    let ranking = rank(rules().as_ref(), &role, &[first, second, stronger]);

    let names: Vec<&str> = ranking.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, ["Stronger", "First", "Second"]);
    assert_eq!(ranking[1].scores.overall, ranking[2].scores.overall);
    let ranks: Vec<usize> = ranking.iter().map(|row| row.rank).collect();
    assert_eq!(ranks, [1, 2, 3]);
}

#[test]
fn ranking_is_not_limited_by_capacity() {
    let pool: Vec<_> = (1..=5)
        .map(|row| candidate(row, &format!("Candidate {row}"), &["SQL"], "Mumbai"))
        .collect();
    let role = position("db", &["SQL"], "Pune", 1);

    let ranking = rank(rules().as_ref(), &role, &pool);

    assert_eq!(ranking.len(), 5);
}

#[test]
fn rows_carry_display_fields() {
    let mut meera = with_category(
        female(candidate(1, "Meera", &["PYTHON", "MS EXCEL"], "Pune")),
        "sc",
    );
    meera.past_participation = true;
    meera.gender = "female".to_string();
    let role = position("analyst", &["MS EXCEL"], "Pune", 2);

    let row = rank(rules().as_ref(), &role, &[meera]).remove(0);

    assert_eq!(row.candidate_skills, "PYTHON, MS EXCEL");
    assert_eq!(row.gender, "FEMALE");
    assert_eq!(row.category, "SC");
    assert!(row.past_participant);
    assert_eq!(
        row.diversity,
        vec![DiversityMarker::Female, DiversityMarker::Sc]
    );
    // 0.4*100 + 0.3*100 + 0.2*100, then the repeat-participant penalty
    assert_eq!(row.scores.overall, 72.0);
}

#[test]
fn adding_an_exact_skill_never_lowers_the_skill_score() {
    let role = position("full-stack", &["JAVASCRIPT", "SQL", "COMMUNICATION"], "Pune", 1);
    let strategy = rules();

    let mut skills = vec!["JAVA"];
    let mut previous = strategy
        .score(&candidate(1, "Growing", &skills, "Pune"), &role)
        .criteria
        .skills;
    for extra in ["SQL", "COMMUNICATION", "JAVASCRIPT"] {
        skills.push(extra);
        let next = strategy
            .score(&candidate(1, "Growing", &skills, "Pune"), &role)
            .criteria
            .skills;
        assert!(next >= previous, "{next} < {previous} after adding {extra}");
        previous = next;
    }
    assert_eq!(previous, 100.0);
}

#[test]
fn empty_requirement_list_gives_full_skill_credit() {
    let role = position("generalist", &[], "Pune", 1);
    let scores = rules().score(&candidate(1, "Anyone", &[], "Pune"), &role);
    assert_eq!(scores.criteria.skills, 100.0);
}

use std::collections::HashSet;

use super::super::taxonomy::{normalize, SkillTaxonomy};

pub(crate) const EXACT_MATCH: f64 = 100.0;
pub(crate) const SUBSTRING_MATCH: f64 = 80.0;
pub(crate) const SUBGROUP_MATCH: f64 = 50.0;
pub(crate) const DOMAIN_MATCH: f64 = 10.0;
pub(crate) const DEFAULT_CORE_WEIGHT: f64 = 0.8;

const BTECH_EQUIVALENTS: &[&str] = &["B.TECH", "B.E."];
const RELATED_SCIENCE_DEGREES: &[&str] = &["BCA", "B.SC"];
const TECHNICAL_BRANCHES: &[&str] = &["CS", "IT"];
pub(crate) const ENGINEERING_BRANCHES: &[&str] = &[
    "CS",
    "IT",
    "ECE",
    "EEE",
    "MECHANICAL",
    "CIVIL",
    "CHEMICAL",
    "BIOTECHNOLOGY",
];

/// Best tier a candidate reaches for one required skill.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatch {
    pub score: f64,
    pub matched: Option<String>,
}

impl SkillMatch {
    fn none() -> Self {
        Self {
            score: 0.0,
            matched: None,
        }
    }
}

/// Score a single required skill against the candidate's normalized skills.
///
/// Non-core skills only count on exact membership. Core skills walk every candidate skill
/// and keep the highest tier reached: exact (100, returns at once), substring (80), same
/// subgroup (50), same domain (10). Unknown skills score 0.
pub fn best_match(
    taxonomy: &SkillTaxonomy,
    required_skill: &str,
    candidate_skills: &[String],
) -> SkillMatch {
    let required = normalize(required_skill);
    if required.is_empty() {
        return SkillMatch::none();
    }

    if taxonomy.is_non_core(&required) {
        return if candidate_skills.iter().any(|skill| *skill == required) {
            SkillMatch {
                score: EXACT_MATCH,
                matched: Some(required),
            }
        } else {
            SkillMatch::none()
        };
    }

    let Some(required_path) = taxonomy.lookup(&required) else {
        return SkillMatch::none();
    };

    let mut best = SkillMatch::none();
    for skill in candidate_skills {
        if skill.is_empty() {
            continue;
        }
        if *skill == required {
            return SkillMatch {
                score: EXACT_MATCH,
                matched: Some(skill.clone()),
            };
        }

        let tier = if required.contains(skill.as_str()) || skill.contains(required.as_str()) {
            SUBSTRING_MATCH
        } else {
            match taxonomy.lookup(skill) {
                Some(path) if path == required_path => SUBGROUP_MATCH,
                Some(path) if path.domain == required_path.domain => DOMAIN_MATCH,
                _ => 0.0,
            }
        };

        if tier > best.score {
            best = SkillMatch {
                score: tier,
                matched: Some(skill.clone()),
            };
        }
    }

    best
}

/// Aggregate skill score for a position's requirement list.
///
/// With both partitions present the result is `core_weight * core + (1 - core_weight) *
/// non_core`; a single populated partition carries the whole weight. Required skills the
/// taxonomy does not know land in the non-core partition and score 0.
pub fn skills_score(
    taxonomy: &SkillTaxonomy,
    required: &[String],
    candidate_skills: &[String],
    core_weight: f64,
) -> f64 {
    let required: Vec<String> = required
        .iter()
        .map(|skill| normalize(skill))
        .filter(|skill| !skill.is_empty())
        .collect();
    if required.is_empty() {
        return 100.0;
    }

    let candidate: Vec<String> = candidate_skills
        .iter()
        .map(|skill| normalize(skill))
        .collect();

    let (core, non_core): (Vec<&String>, Vec<&String>) = required
        .iter()
        .partition(|skill| taxonomy.is_core(skill));

    let average = |skills: &[&String]| -> Option<f64> {
        if skills.is_empty() {
            return None;
        }
        let total: f64 = skills
            .iter()
            .map(|skill| best_match(taxonomy, skill, &candidate).score)
            .sum();
        Some(total / skills.len() as f64)
    };

    match (average(&core), average(&non_core)) {
        (Some(core), Some(non_core)) => core_weight * core + (1.0 - core_weight) * non_core,
        (Some(core), None) => core,
        (None, Some(non_core)) => non_core,
        (None, None) => 100.0,
    }
}

/// Education ladder; the first matching rung wins.
pub fn education_score(
    candidate_education: &str,
    required_degrees: &[String],
    required_branches: &[String],
) -> f64 {
    let education = normalize(candidate_education);
    let degrees: Vec<String> = required_degrees
        .iter()
        .map(|degree| normalize(degree))
        .filter(|degree| !degree.is_empty())
        .collect();
    if education.is_empty() || degrees.is_empty() {
        return 0.0;
    }
    let branches: Vec<String> = required_branches
        .iter()
        .map(|branch| normalize(branch))
        .filter(|branch| !branch.is_empty())
        .collect();

    let mentions = |token: &str| education.contains(token);
    let holds_degree = degrees.iter().any(|degree| mentions(degree));
    let holds_branch = branches.iter().any(|branch| mentions(branch));

    if holds_degree && (branches.is_empty() || holds_branch) {
        return 100.0;
    }
    if holds_degree {
        return 80.0;
    }

    let wants_btech = degrees
        .iter()
        .any(|degree| BTECH_EQUIVALENTS.contains(&degree.as_str()));
    if wants_btech
        && RELATED_SCIENCE_DEGREES.iter().any(|degree| mentions(degree))
        && TECHNICAL_BRANCHES.iter().any(|branch| mentions(branch))
    {
        return 60.0;
    }

    if mentions("DIPLOMA") && ENGINEERING_BRANCHES.iter().any(|branch| mentions(branch)) {
        return 40.0;
    }

    if mentions("12TH") || mentions("XII") {
        return 20.0;
    }

    0.0
}

/// Same city, same state, or the national baseline.
pub fn location_score(
    candidate_city: &str,
    candidate_state: &str,
    position_city: &str,
    position_state: &str,
) -> f64 {
    let same = |left: &str, right: &str| {
        let left = normalize(left);
        !left.is_empty() && left == normalize(right)
    };

    if same(candidate_city, position_city) {
        100.0
    } else if same(candidate_state, position_state) {
        66.0
    } else {
        33.0
    }
}

/// How closely the stated interest lines up with the position title.
pub fn interest_score(candidate_interest: &str, post: &str) -> f64 {
    let interest = normalize(candidate_interest);
    let post = normalize(post);
    if interest.is_empty() || post.is_empty() {
        return 0.0;
    }
    if interest.contains(post.as_str()) {
        return 100.0;
    }

    let interest_tokens = tokens(&interest);
    if tokens(&post)
        .iter()
        .any(|token| interest_tokens.contains(token))
    {
        return 50.0;
    }

    25.0
}

fn tokens(value: &str) -> HashSet<String> {
    value
        .replace('-', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

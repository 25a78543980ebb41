//! Built-in position catalogue, form reference lists and a sample candidate pool.

use serde::Serialize;

use super::domain::{Candidate, CandidateId, Criterion, Position, PositionKey, PriorityOrder};
use super::intake::parse_skills;
use super::scoring::criteria::ENGINEERING_BRANCHES;
use super::taxonomy::{normalize, SkillTaxonomy};

use Criterion::{Education, Interest, Location, Skills};

struct PresetPosition {
    key: &'static str,
    post: &'static str,
    company: &'static str,
    offers: u32,
    degrees: &'static [&'static str],
    branches: &'static [&'static str],
    skills: &'static [&'static str],
    city: &'static str,
    state: &'static str,
    priority: &'static [Criterion],
}

impl PresetPosition {
    fn to_position(&self) -> Position {
        fn list(values: &[&str]) -> Vec<String> {
            values.iter().map(|value| normalize(value)).collect()
        }

        Position {
            key: PositionKey(self.key.to_string()),
            post: self.post.to_string(),
            company: self.company.to_string(),
            offers: self.offers,
            degrees: list(self.degrees),
            branches: list(self.branches),
            skills: list(self.skills),
            city: self.city.to_string(),
            state: self.state.to_string(),
            priority: PriorityOrder::from_distinct(self.priority),
        }
    }
}

const PRESETS: &[PresetPosition] = &[
    PresetPosition {
        key: "job1",
        post: "AI/ML Intern",
        company: "IntelliTech",
        offers: 3,
        degrees: &["B.TECH"],
        branches: &["CS", "IT"],
        skills: &["AIML", "PYTHON", "DATA ENGINEERING", "MS EXCEL"],
        city: "Bengaluru",
        state: "Karnataka",
        priority: &[Skills, Education, Interest, Location],
    },
    PresetPosition {
        key: "job2",
        post: "Web Development Intern",
        company: "WebWeavers",
        offers: 5,
        degrees: &["B.TECH", "BCA", "B.SC"],
        branches: &["CS", "IT"],
        skills: &["JAVASCRIPT", "WEB DEVELOPMENT", "DEVOPS", "COMMUNICATION"],
        city: "Pune",
        state: "Maharashtra",
        priority: &[Skills, Education, Location, Interest],
    },
    PresetPosition {
        key: "job3",
        post: "Financial Analyst Intern",
        company: "Capital Gains Inc.",
        offers: 4,
        degrees: &["B.COM", "BBA"],
        branches: &["ACCOUNTS", "FINANCE"],
        skills: &["FINANCIAL ANALYSIS", "FINANCIAL MODELING", "MS EXCEL"],
        city: "Mumbai",
        state: "Maharashtra",
        priority: &[Skills, Education, Interest, Location],
    },
    PresetPosition {
        key: "job4",
        post: "Data Science Intern",
        company: "DataCorp Analytics",
        offers: 3,
        degrees: &["B.TECH", "B.SC"],
        branches: &["CS", "IT"],
        skills: &["PYTHON", "SQL", "AIML", "DATA ENGINEERING"],
        city: "Chennai",
        state: "Tamil Nadu",
        priority: &[Skills, Education, Interest, Location],
    },
    PresetPosition {
        key: "job5",
        post: "Cybersecurity Intern",
        company: "SecureNet Solutions",
        offers: 2,
        degrees: &["B.TECH"],
        branches: &["CS", "IT", "ECE"],
        skills: &["CYBERSECURITY", "PYTHON", "COMMUNICATION"],
        city: "Hyderabad",
        state: "Telangana",
        priority: &[Skills, Education, Location, Interest],
    },
    PresetPosition {
        key: "job6",
        post: "Digital Marketing Intern",
        company: "Brand Builders",
        offers: 6,
        degrees: &["B.COM", "BBA", "B.A."],
        branches: &["MARKETING", "FINANCE"],
        skills: &["SEO", "SOCIAL MEDIA MARKETING", "CONTENT WRITING", "MS EXCEL"],
        city: "Delhi",
        state: "Delhi",
        priority: &[Skills, Interest, Education, Location],
    },
];

pub fn preset_positions() -> Vec<Position> {
    PRESETS.iter().map(PresetPosition::to_position).collect()
}

pub fn preset(key: &str) -> Option<Position> {
    PRESETS
        .iter()
        .find(|preset| preset.key == key)
        .map(PresetPosition::to_position)
}

pub const BACHELORS_DEGREES: &[&str] = &[
    "B.TECH", "B.E.", "B.COM", "B.A.", "BBA", "BCA", "B.SC", "LLB", "B.PHARM", "DIPLOMA",
    "12TH PASS",
];
const FINANCE_BRANCHES: &[&str] = &["ACCOUNTS", "FINANCE", "BANKING", "ECONOMICS"];
const LAW_BRANCHES: &[&str] = &["CORPORATE", "CRIMINAL", "IPR", "CONSTITUTIONAL"];
pub const INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
];

/// Reference lists for populating position and candidate forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormData {
    pub bachelors_degrees: Vec<String>,
    pub all_branches: Vec<String>,
    pub all_skills: Vec<String>,
    pub indian_states: Vec<String>,
}

impl FormData {
    pub fn new(taxonomy: &SkillTaxonomy) -> Self {
        let mut all_branches: Vec<String> = ENGINEERING_BRANCHES
            .iter()
            .chain(FINANCE_BRANCHES)
            .chain(LAW_BRANCHES)
            .map(|branch| branch.to_string())
            .collect();
        all_branches.sort();
        all_branches.dedup();

        Self {
            bachelors_degrees: owned(BACHELORS_DEGREES),
            all_branches,
            all_skills: taxonomy.all_skills(),
            indian_states: owned(INDIAN_STATES),
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Small pool used to seed a fresh service before any CSV has been uploaded.
pub fn sample_candidates() -> Vec<Candidate> {
    let rows: [[&str; 8]; 4] = [
        [
            "Priya Sharma",
            "B.TECH CS",
            "PYTHON;AIML;MS EXCEL",
            "Mumbai",
            "Maharashtra",
            "AI and Machine Learning",
            "FEMALE",
            "GENERAL",
        ],
        [
            "Rohan Verma (PWD)",
            "B.TECH IT",
            "JAVA;WEB DEVELOPMENT;COMMUNICATION",
            "Pune",
            "Maharashtra",
            "Full Stack Development",
            "MALE",
            "PWD",
        ],
        [
            "Aisha Khan",
            "B.COM ACCOUNTS",
            "TALLY;GST;MS EXCEL",
            "Mumbai",
            "Maharashtra",
            "Accounting and Finance",
            "FEMALE",
            "GENERAL",
        ],
        [
            "Suresh Gupta (SC)",
            "12TH PASS",
            "DATA ENTRY;MS WORD",
            "Delhi",
            "Delhi",
            "Office Administration",
            "MALE",
            "SC",
        ],
    ];

    rows.iter()
        .enumerate()
        .map(
            |(index, [name, education, skills, city, state, interest, gender, category])| {
                Candidate {
                    id: CandidateId::from_row(index + 1),
                    name: name.to_string(),
                    education: education.to_string(),
                    skills: parse_skills(skills),
                    city: city.to_string(),
                    state: state.to_string(),
                    interest: interest.to_string(),
                    gender: gender.to_string(),
                    category: category.to_string(),
                    past_participation: false,
                }
            },
        )
        .collect()
}

//! Skill taxonomy: a `domain → subgroup → skills` tree flattened into lookup tables.
//!
//! The index is built once and shared read-only (`Arc<SkillTaxonomy>`) by every scorer.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Canonical form for skills, degrees, cities and free text comparisons.
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Location of a core skill inside the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaxonomyPath {
    pub domain: String,
    pub subgroup: String,
}

/// Serializable source form of a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyDefinition {
    pub core: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    pub non_core: Vec<String>,
}

impl TaxonomyDefinition {
    pub fn standard() -> Self {
        let core = STANDARD_CORE_TREE
            .iter()
            .map(|(domain, subgroups)| {
                let subgroups = subgroups
                    .iter()
                    .map(|(subgroup, skills)| {
                        (
                            subgroup.to_string(),
                            skills.iter().map(|skill| skill.to_string()).collect(),
                        )
                    })
                    .collect();
                (domain.to_string(), subgroups)
            })
            .collect();

        Self {
            core,
            non_core: STANDARD_NON_CORE
                .iter()
                .map(|skill| skill.to_string())
                .collect(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TaxonomyError> {
        serde_json::from_reader(reader).map_err(TaxonomyError::Parse)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("skill '{skill}' is listed under both {first} and {second}")]
    ConflictingSkill {
        skill: String,
        first: String,
        second: String,
    },
    #[error("failed to read taxonomy definition: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid taxonomy definition: {0}")]
    Parse(serde_json::Error),
}

/// Immutable lookup tables derived from a [`TaxonomyDefinition`].
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    core: HashMap<String, TaxonomyPath>,
    non_core: HashSet<String>,
}

impl SkillTaxonomy {
    /// The built-in taxonomy. Its definition is conflict free.
    pub fn standard() -> Self {
        Self::build(&TaxonomyDefinition::standard())
    }

    /// Validate and index a definition. Each skill may appear once across the whole tree
    /// and the non-core list.
    pub fn from_definition(definition: &TaxonomyDefinition) -> Result<Self, TaxonomyError> {
        let mut seen: HashMap<String, String> = HashMap::new();

        for (domain, subgroups) in &definition.core {
            for (subgroup, skills) in subgroups {
                for skill in skills {
                    let location = format!("{domain}/{subgroup}");
                    record_unique(&mut seen, normalize(skill), location)?;
                }
            }
        }
        for skill in &definition.non_core {
            record_unique(&mut seen, normalize(skill), "non-core".to_string())?;
        }

        Ok(Self::build(definition))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TaxonomyError> {
        let file = std::fs::File::open(path)?;
        let definition = TaxonomyDefinition::from_reader(file)?;
        Self::from_definition(&definition)
    }

    fn build(definition: &TaxonomyDefinition) -> Self {
        let mut core = HashMap::new();
        for (domain, subgroups) in &definition.core {
            for (subgroup, skills) in subgroups {
                for skill in skills {
                    let key = normalize(skill);
                    if key.is_empty() {
                        continue;
                    }
                    core.entry(key).or_insert_with(|| TaxonomyPath {
                        domain: domain.clone(),
                        subgroup: subgroup.clone(),
                    });
                }
            }
        }

        let non_core = definition
            .non_core
            .iter()
            .map(|skill| normalize(skill))
            .filter(|skill| !skill.is_empty() && !core.contains_key(skill))
            .collect();

        Self { core, non_core }
    }

    pub fn is_core(&self, skill: &str) -> bool {
        self.core.contains_key(&normalize(skill))
    }

    pub fn is_non_core(&self, skill: &str) -> bool {
        self.non_core.contains(&normalize(skill))
    }

    pub fn lookup(&self, skill: &str) -> Option<&TaxonomyPath> {
        self.core.get(&normalize(skill))
    }

    /// Every known skill, sorted, for form pickers.
    pub fn all_skills(&self) -> Vec<String> {
        let mut skills: Vec<String> = self
            .core
            .keys()
            .chain(self.non_core.iter())
            .cloned()
            .collect();
        skills.sort();
        skills
    }
}

fn record_unique(
    seen: &mut HashMap<String, String>,
    skill: String,
    location: String,
) -> Result<(), TaxonomyError> {
    if skill.is_empty() {
        return Ok(());
    }
    if let Some(first) = seen.get(&skill) {
        return Err(TaxonomyError::ConflictingSkill {
            skill,
            first: first.clone(),
            second: location,
        });
    }
    seen.insert(skill, location);
    Ok(())
}

type SubgroupTable = &'static [(&'static str, &'static [&'static str])];

const STANDARD_CORE_TREE: &[(&str, SubgroupTable)] = &[
    (
        "engineering",
        &[
            (
                "computer_eng",
                &[
                    "PYTHON",
                    "JAVA",
                    "C++",
                    "C#",
                    "JAVASCRIPT",
                    "SQL",
                    "GOLANG",
                    "RUST",
                    "AIML",
                    "WEB DEVELOPMENT",
                    "APP DEVELOPMENT",
                    "CYBERSECURITY",
                    "DATA ENGINEERING",
                    "DEVOPS",
                    "CLOUD COMPUTING",
                    "BLOCKCHAIN",
                    "COMPUTER VISION",
                    "NLP",
                ],
            ),
            (
                "electrical_eng",
                &[
                    "POWER SYSTEMS",
                    "EMBEDDED SYSTEMS",
                    "IOT",
                    "VLSI",
                    "PCB DESIGN",
                    "CONTROL SYSTEMS",
                    "MATLAB",
                    "SIMULINK",
                ],
            ),
            (
                "mechanical_eng",
                &[
                    "AUTOCAD",
                    "SOLIDWORKS",
                    "CATIA",
                    "ANSYS",
                    "THERMAL ENGINEERING",
                    "AUTOMOTIVE DESIGN",
                    "ROBOTICS",
                    "3D PRINTING",
                ],
            ),
            (
                "civil_eng",
                &[
                    "STRUCTURAL ANALYSIS",
                    "STAAD PRO",
                    "ETABS",
                    "SURVEYING",
                    "GEOTECHNICAL ENGINEERING",
                ],
            ),
        ],
    ),
    (
        "finance",
        &[
            (
                "accounting",
                &[
                    "TALLY",
                    "GST",
                    "INCOME TAX",
                    "FINANCIAL ANALYSIS",
                    "AUDITING",
                    "QUICKBOOKS",
                ],
            ),
            (
                "investment_banking",
                &[
                    "FINANCIAL MODELING",
                    "VALUATION",
                    "MERGERS & ACQUISITIONS",
                    "EQUITY RESEARCH",
                ],
            ),
            (
                "fintech",
                &["PAYMENT GATEWAYS", "ALGORITHMIC TRADING", "REGTECH"],
            ),
        ],
    ),
    (
        "law",
        &[
            (
                "corporate_law",
                &[
                    "CONTRACT DRAFTING",
                    "LEGAL RESEARCH",
                    "COMPLIANCE",
                    "DUE DILIGENCE",
                ],
            ),
            (
                "litigation",
                &["CASE PREPARATION", "LEGAL BRIEFING", "MOOT COURT"],
            ),
            ("ipr", &["PATENT LAW", "TRADEMARK LAW", "COPYRIGHT LAW"]),
        ],
    ),
    (
        "medical_pharma",
        &[
            (
                "pharma",
                &[
                    "QUALITY ASSURANCE (QA)",
                    "QUALITY CONTROL (QC)",
                    "REGULATORY AFFAIRS",
                    "PHARMACOVIGILANCE",
                ],
            ),
            (
                "clinical",
                &["CLINICAL RESEARCH", "PATIENT COUNSELING", "MEDICAL WRITING"],
            ),
        ],
    ),
    (
        "design_creative",
        &[
            (
                "ui_ux",
                &[
                    "FIGMA",
                    "ADOBE XD",
                    "SKETCH",
                    "USER RESEARCH",
                    "WIREFRAMING",
                ],
            ),
            (
                "graphic_design",
                &[
                    "ADOBE PHOTOSHOP",
                    "ADOBE ILLUSTRATOR",
                    "CANVA",
                    "VIDEO EDITING",
                ],
            ),
        ],
    ),
    (
        "business_management",
        &[
            (
                "marketing",
                &[
                    "SEO",
                    "SEM",
                    "SOCIAL MEDIA MARKETING",
                    "CONTENT WRITING",
                    "EMAIL MARKETING",
                ],
            ),
            (
                "sales",
                &["LEAD GENERATION", "CRM SOFTWARE", "NEGOTIATION"],
            ),
            (
                "operations",
                &["SUPPLY CHAIN", "LOGISTICS", "PROJECT MANAGEMENT"],
            ),
        ],
    ),
];

const STANDARD_NON_CORE: &[&str] = &[
    "COMMUNICATION",
    "ENGLISH PROFICIENCY",
    "MS WORD",
    "MS EXCEL",
    "MS POWERPOINT",
    "DATA ENTRY",
    "BASIC MATHS",
    "TEAMWORK",
    "PROBLEM SOLVING",
];

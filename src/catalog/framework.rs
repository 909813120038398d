//! The FY26 UX career framework tables
//!
//! A hand-maintained matrix: theme -> pillar -> competency, plus the
//! sparse grade-expectation table keyed by (grade tier, competency id).

use serde::{Deserialize, Serialize};

use crate::catalog::scales::AssessmentType;

/// Competency category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Shared,
    RoleBased,
}

/// Top-level grouping in the framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    UxCore,
    Execution,
    Leadership,
    UxDesign,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::UxCore => "UX Core",
            Theme::Execution => "Execution",
            Theme::Leadership => "Leadership",
            Theme::UxDesign => "UX Design",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::UxCore, Theme::Execution, Theme::Leadership, Theme::UxDesign]
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "ux core" | "core" => Ok(Theme::UxCore),
            "execution" => Ok(Theme::Execution),
            "leadership" => Ok(Theme::Leadership),
            "ux design" | "design" => Ok(Theme::UxDesign),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Worksheet role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Ic,
    Manager,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Ic => write!(f, "ic"),
            Role::Manager => write!(f, "manager"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ic" => Ok(Role::Ic),
            "manager" | "mgr" => Ok(Role::Manager),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Organizational grade tier used to look up expected competency levels
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum GradeTier {
    #[default]
    G5,
    G6,
    G7,
    G8,
    G9,
    G10,
    G11,
}

impl GradeTier {
    pub fn all() -> &'static [GradeTier] {
        &[
            GradeTier::G5,
            GradeTier::G6,
            GradeTier::G7,
            GradeTier::G8,
            GradeTier::G9,
            GradeTier::G10,
            GradeTier::G11,
        ]
    }

    /// Column index into the expectation rows (G5 = 0)
    fn index(&self) -> usize {
        GradeTier::all().iter().position(|g| g == self).unwrap_or(0)
    }

    /// Numeric part of the tier label ("G7" -> 7)
    pub fn number(&self) -> u8 {
        5 + self.index() as u8
    }
}

impl std::fmt::Display for GradeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "G{}", self.number())
    }
}

impl std::str::FromStr for GradeTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_uppercase();
        GradeTier::all()
            .iter()
            .find(|g| g.to_string() == trimmed)
            .copied()
            .ok_or_else(|| format!("Unknown grade tier: {} (expected G5..G11)", s))
    }
}

/// A named, leveled skill dimension in the career framework
#[derive(Debug, Clone, Copy)]
pub struct Competency {
    /// Stable string key
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub theme: Theme,
    /// Sub-grouping within the theme
    pub pillar: &'static str,
    pub assessment_type: AssessmentType,
    /// Level value -> human-readable description; keys are exactly the
    /// domain of `assessment_type`
    pub levels: &'static [(u8, &'static str)],
}

impl Competency {
    /// Description text for a level, if the level is in this
    /// competency's domain
    pub fn level_description(&self, level: u8) -> Option<&'static str> {
        self.levels.iter().find(|(v, _)| *v == level).map(|(_, d)| *d)
    }
}

/// Shared competencies, assessed on the proficiency scale
static SHARED: &[Competency] = &[
    Competency {
        id: "methodology",
        name: "Methodology",
        description: "Application of design thinking, research methods, and UX processes",
        category: Category::Shared,
        theme: Theme::UxCore,
        pillar: "Methods",
        assessment_type: AssessmentType::Proficiency,
        levels: &[
            (1, "Applies basic UX methodologies with guidance"),
            (2, "Independently applies standard UX methodologies"),
            (3, "Adapts and combines methodologies for complex problems"),
            (4, "Innovates and leads methodology adoption across teams"),
            (5, "Defines and evolves organizational UX methodology standards"),
        ],
    },
    Competency {
        id: "acumen",
        name: "Acumen",
        description: "Business understanding and strategic thinking in UX decisions",
        category: Category::Shared,
        theme: Theme::UxCore,
        pillar: "Strategy",
        assessment_type: AssessmentType::Proficiency,
        levels: &[
            (1, "Understands basic business context for design decisions"),
            (2, "Connects design work to business objectives"),
            (3, "Influences product strategy through UX insights"),
            (4, "Drives business outcomes through strategic design leadership"),
            (5, "Shapes organizational strategy through design thinking"),
        ],
    },
    Competency {
        id: "innovation",
        name: "Innovation",
        description: "Creative problem-solving and forward-thinking design approaches",
        category: Category::Shared,
        theme: Theme::UxCore,
        pillar: "Strategy",
        assessment_type: AssessmentType::Proficiency,
        levels: &[
            (1, "Explores creative solutions with guidance"),
            (2, "Generates innovative ideas independently"),
            (3, "Leads innovation initiatives and inspires creative thinking"),
            (4, "Establishes innovation practices across multiple teams"),
            (5, "Drives industry-leading innovation and thought leadership"),
        ],
    },
    Competency {
        id: "delivery",
        name: "Delivery",
        description: "Consistent execution and delivery of design work",
        category: Category::Shared,
        theme: Theme::Execution,
        pillar: "Delivery",
        assessment_type: AssessmentType::Proficiency,
        levels: &[
            (1, "Delivers individual tasks on time with support"),
            (2, "Consistently delivers quality work independently"),
            (3, "Manages complex deliverables and dependencies"),
            (4, "Optimizes delivery processes for multiple teams"),
            (5, "Establishes organizational delivery excellence standards"),
        ],
    },
    Competency {
        id: "craft",
        name: "Craft",
        description: "Quality and sophistication of design execution",
        category: Category::Shared,
        theme: Theme::Execution,
        pillar: "Quality",
        assessment_type: AssessmentType::Proficiency,
        levels: &[
            (1, "Produces work that meets basic quality standards"),
            (2, "Creates polished, high-quality design work"),
            (3, "Sets craft standards and mentors others"),
            (4, "Elevates craft quality across multiple teams"),
            (5, "Defines industry-leading craft standards"),
        ],
    },
    Competency {
        id: "storytelling",
        name: "Storytelling",
        description: "Communication and presentation of design work and rationale",
        category: Category::Shared,
        theme: Theme::Execution,
        pillar: "Communication",
        assessment_type: AssessmentType::Proficiency,
        levels: &[
            (1, "Clearly presents design work to immediate team"),
            (2, "Effectively communicates design decisions to stakeholders"),
            (3, "Influences through compelling design storytelling"),
            (4, "Builds organizational alignment through strategic narratives"),
            (5, "Shapes industry conversations through thought leadership"),
        ],
    },
    Competency {
        id: "problem-solving",
        name: "Problem Solving",
        description: "Analytical thinking and systematic approach to complex challenges",
        category: Category::Shared,
        theme: Theme::Leadership,
        pillar: "Problem Solving",
        assessment_type: AssessmentType::Proficiency,
        levels: &[
            (1, "Solves well-defined problems with guidance"),
            (2, "Independently tackles complex design problems"),
            (3, "Breaks down ambiguous challenges into actionable solutions"),
            (4, "Solves systemic problems affecting multiple teams"),
            (5, "Addresses industry-wide challenges through innovative solutions"),
        ],
    },
    Competency {
        id: "ownership",
        name: "Ownership",
        description: "Accountability and proactive responsibility for outcomes",
        category: Category::Shared,
        theme: Theme::Leadership,
        pillar: "Accountability",
        assessment_type: AssessmentType::Proficiency,
        levels: &[
            (1, "Takes responsibility for assigned tasks and outcomes"),
            (2, "Proactively owns end-to-end project success"),
            (3, "Takes ownership of team outcomes and cross-functional success"),
            (4, "Drives accountability and ownership culture across organization"),
            (5, "Models ownership at industry level and influences best practices"),
        ],
    },
    Competency {
        id: "influence",
        name: "Influence",
        description: "Ability to persuade, inspire, and drive change through others",
        category: Category::Shared,
        theme: Theme::Leadership,
        pillar: "Influence",
        assessment_type: AssessmentType::Proficiency,
        levels: &[
            (1, "Influences immediate team members and collaborators"),
            (2, "Persuades stakeholders and drives project alignment"),
            (3, "Influences cross-functional teams and senior stakeholders"),
            (4, "Drives organizational change and strategic alignment"),
            (5, "Influences industry practices and thought leadership"),
        ],
    },
];

/// Role-based design competencies, assessed on the scope & impact scale
static ROLE_BASED: &[Competency] = &[
    Competency {
        id: "user-centered-design",
        name: "User Centered Design",
        description: "Deep understanding and advocacy for user needs throughout the design process",
        category: Category::RoleBased,
        theme: Theme::UxDesign,
        pillar: "User Focus",
        assessment_type: AssessmentType::ScopeImpact,
        levels: &[
            (2, "Conducts basic user research and applies findings to simple features"),
            (4, "Designs complete user experiences based on research insights"),
            (6, "Leads user-centered design across multiple features and products"),
            (8, "Establishes user-centered practices across product organization"),
            (10, "Drives industry standards for user-centered design"),
        ],
    },
    Competency {
        id: "composable-systems-thinking",
        name: "Composable Systems Thinking",
        description: "Designing scalable, modular systems that work cohesively",
        category: Category::RoleBased,
        theme: Theme::UxDesign,
        pillar: "Systems",
        assessment_type: AssessmentType::ScopeImpact,
        levels: &[
            (2, "Uses existing design system components effectively"),
            (4, "Contributes to and extends design system capabilities"),
            (6, "Designs scalable systems for complex product ecosystems"),
            (8, "Leads design system strategy across multiple products"),
            (10, "Defines industry practices for design system architecture"),
        ],
    },
    Competency {
        id: "experience-harmony",
        name: "Experience Harmony",
        description: "Creating cohesive, integrated experiences across touchpoints",
        category: Category::RoleBased,
        theme: Theme::UxDesign,
        pillar: "Cohesion",
        assessment_type: AssessmentType::ScopeImpact,
        levels: &[
            (2, "Ensures consistency within individual features"),
            (4, "Designs cohesive experiences across related features"),
            (6, "Orchestrates seamless experiences across multiple products"),
            (8, "Drives experience strategy across entire product ecosystem"),
            (10, "Sets industry standards for integrated experience design"),
        ],
    },
];

/// Manager additions to the shared set
static MANAGER: &[Competency] = &[
    Competency {
        id: "people-development",
        name: "People Development",
        description: "Growing and developing team members and their careers",
        category: Category::Shared,
        theme: Theme::Leadership,
        pillar: "People",
        assessment_type: AssessmentType::Proficiency,
        levels: &[
            (1, "Provides basic feedback and support to team members"),
            (2, "Actively coaches and develops individual contributors"),
            (3, "Builds high-performing teams and develops other managers"),
            (4, "Establishes talent development practices across organization"),
            (5, "Shapes industry standards for design talent development"),
        ],
    },
    Competency {
        id: "strategic-leadership",
        name: "Strategic Leadership",
        description: "Setting vision, strategy, and direction for design teams",
        category: Category::Shared,
        theme: Theme::Leadership,
        pillar: "Direction",
        assessment_type: AssessmentType::Proficiency,
        levels: &[
            (1, "Communicates team vision and aligns with strategy"),
            (2, "Develops strategic initiatives for team and product area"),
            (3, "Influences organizational strategy through design leadership"),
            (4, "Shapes business strategy and drives organizational transformation"),
            (5, "Defines industry direction and thought leadership"),
        ],
    },
    Competency {
        id: "operational-excellence",
        name: "Operational Excellence",
        description: "Building efficient processes and systems for team success",
        category: Category::Shared,
        theme: Theme::Execution,
        pillar: "Operations",
        assessment_type: AssessmentType::Proficiency,
        levels: &[
            (1, "Manages team processes and workflows effectively"),
            (2, "Optimizes operations and scales team capabilities"),
            (3, "Establishes operational excellence across multiple teams"),
            (4, "Drives organizational operational transformation"),
            (5, "Sets industry benchmarks for design operations"),
        ],
    },
];

/// Expected level per competency for grades G5..G11 (column order matches
/// `GradeTier::all()`). A zero means the competency does not apply at
/// that grade and renders as N/A.
static EXPECTATIONS: &[(&str, [u8; 7])] = &[
    ("methodology", [1, 2, 3, 4, 5, 5, 5]),
    ("acumen", [1, 2, 2, 3, 4, 4, 5]),
    ("innovation", [1, 1, 2, 3, 4, 4, 5]),
    ("delivery", [1, 2, 3, 4, 5, 5, 5]),
    ("craft", [1, 2, 3, 4, 5, 5, 5]),
    ("storytelling", [1, 2, 3, 4, 4, 5, 5]),
    ("problem-solving", [1, 2, 3, 4, 5, 5, 5]),
    ("ownership", [1, 2, 3, 4, 5, 5, 5]),
    ("influence", [1, 1, 2, 3, 4, 4, 5]),
    ("user-centered-design", [2, 4, 6, 8, 10, 10, 10]),
    ("composable-systems-thinking", [2, 2, 4, 6, 8, 10, 10]),
    ("experience-harmony", [2, 4, 6, 8, 8, 10, 10]),
    // Manager competencies are not expected below G8
    ("people-development", [0, 0, 0, 2, 3, 4, 5]),
    ("strategic-leadership", [0, 0, 0, 2, 3, 4, 5]),
    ("operational-excellence", [0, 0, 0, 2, 3, 4, 5]),
];

/// The full catalog in framework order (shared, manager, role-based)
pub fn catalog() -> impl Iterator<Item = &'static Competency> {
    SHARED.iter().chain(MANAGER.iter()).chain(ROLE_BASED.iter())
}

/// Ordered competency list for a worksheet role
pub fn all_competencies(role: Role) -> Vec<&'static Competency> {
    match role {
        Role::Ic => SHARED.iter().chain(ROLE_BASED.iter()).collect(),
        Role::Manager => SHARED
            .iter()
            .chain(MANAGER.iter())
            .chain(ROLE_BASED.iter())
            .collect(),
    }
}

/// Look up a single competency by id
pub fn competency(id: &str) -> Option<&'static Competency> {
    catalog().find(|c| c.id == id)
}

/// Expected level for (grade, competency); 0 means not applicable
pub fn expectation(grade: GradeTier, competency_id: &str) -> u8 {
    EXPECTATIONS
        .iter()
        .find(|(id, _)| *id == competency_id)
        .map(|(_, row)| row[grade.index()])
        .unwrap_or(0)
}

/// A weekly check-in prompt tied to one or more competencies
#[derive(Debug, Clone, Copy)]
pub struct CheckInQuestion {
    pub id: &'static str,
    pub category: &'static str,
    pub question: &'static str,
    pub placeholder: &'static str,
    pub competency_ids: &'static [&'static str],
}

/// Weekly check-in questions derived from the framework
pub fn weekly_questions() -> &'static [CheckInQuestion] {
    &[
        CheckInQuestion {
            id: "methodology-growth",
            category: "UX Core",
            question: "How did you apply or strengthen your UX methodology this week?",
            placeholder: "Describe methodologies used, research conducted, or process improvements...",
            competency_ids: &["methodology"],
        },
        CheckInQuestion {
            id: "business-impact",
            category: "UX Core",
            question: "What business impact did your design work create this week?",
            placeholder: "Connect your design decisions to business outcomes or user metrics...",
            competency_ids: &["acumen"],
        },
        CheckInQuestion {
            id: "execution-delivery",
            category: "Execution",
            question: "What did you deliver this week and how did you ensure quality?",
            placeholder: "Describe deliverables, quality measures, and any process improvements...",
            competency_ids: &["delivery", "craft"],
        },
        CheckInQuestion {
            id: "collaboration-influence",
            category: "Leadership",
            question: "How did you collaborate and influence stakeholders this week?",
            placeholder: "Describe stakeholder interactions, presentations, or consensus building...",
            competency_ids: &["influence", "storytelling"],
        },
        CheckInQuestion {
            id: "problem-ownership",
            category: "Leadership",
            question: "What problems did you solve and how did you take ownership?",
            placeholder: "Describe challenges faced, solutions implemented, and accountability taken...",
            competency_ids: &["problem-solving", "ownership"],
        },
        CheckInQuestion {
            id: "user-centered-focus",
            category: "UX Design",
            question: "How did you advocate for users and incorporate user insights this week?",
            placeholder: "Describe user research, advocacy moments, or user-centered design decisions...",
            competency_ids: &["user-centered-design"],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = catalog().map(|c| c.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_levels_match_assessment_type_domain() {
        for comp in catalog() {
            let keys: Vec<u8> = comp.levels.iter().map(|(v, _)| *v).collect();
            assert_eq!(
                keys,
                comp.assessment_type.domain(),
                "level keys for {} must equal the scale domain",
                comp.id
            );
        }
    }

    #[test]
    fn test_role_filtering() {
        let ic = all_competencies(Role::Ic);
        let mgr = all_competencies(Role::Manager);
        assert_eq!(ic.len(), 12);
        assert_eq!(mgr.len(), 15);
        assert!(ic.iter().all(|c| c.id != "people-development"));
        assert!(mgr.iter().any(|c| c.id == "people-development"));
    }

    #[test]
    fn test_expectation_lookup() {
        assert_eq!(expectation(GradeTier::G7, "user-centered-design"), 6);
        assert_eq!(expectation(GradeTier::G5, "methodology"), 1);
        // Manager competencies do not apply below G8
        assert_eq!(expectation(GradeTier::G6, "people-development"), 0);
        // Unknown ids are "not applicable", never an error
        assert_eq!(expectation(GradeTier::G9, "no-such-competency"), 0);
    }

    #[test]
    fn test_expectations_stay_in_domain() {
        for (id, row) in EXPECTATIONS {
            let comp = competency(id).expect("expectation row references catalog entry");
            for &value in row {
                assert!(
                    value == 0 || comp.assessment_type.contains(value),
                    "expectation {} for {} is outside its scale",
                    value,
                    id
                );
            }
        }
    }

    #[test]
    fn test_grade_tier_parse_and_display() {
        assert_eq!("g7".parse::<GradeTier>().unwrap(), GradeTier::G7);
        assert_eq!(GradeTier::G11.to_string(), "G11");
        assert!("G4".parse::<GradeTier>().is_err());
    }
}

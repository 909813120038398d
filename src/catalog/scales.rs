//! Assessment scales and level domains
//!
//! Two parallel five-point scales apply to competencies depending on
//! category: shared competencies use the proficiency scale (levels 1-5),
//! role-based competencies use the scope & impact scale (levels 2, 4, 6,
//! 8, 10). Level 0 always means "not rated" or "not applicable".

use serde::{Deserialize, Serialize};

/// Which descriptive scale applies to a competency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentType {
    Proficiency,
    ScopeImpact,
}

impl AssessmentType {
    /// The valid level values for this scale, in ascending order
    pub fn domain(&self) -> &'static [u8] {
        match self {
            AssessmentType::Proficiency => &[1, 2, 3, 4, 5],
            AssessmentType::ScopeImpact => &[2, 4, 6, 8, 10],
        }
    }

    /// The lowest valid level value for this scale
    pub fn first_level(&self) -> u8 {
        self.domain()[0]
    }

    /// Whether `level` is a member of this scale's domain
    pub fn contains(&self, level: u8) -> bool {
        self.domain().contains(&level)
    }

    /// Display label for a level value, or "N/A" for 0 / unknown values
    pub fn label(&self, level: u8) -> &'static str {
        let labels: &[&str] = match self {
            AssessmentType::Proficiency => {
                &["Foundational", "Practicing", "Proficient", "Advanced", "Expert"]
            }
            AssessmentType::ScopeImpact => {
                &["Feature", "Product", "Portfolio", "Organization", "Industry"]
            }
        };
        self.domain()
            .iter()
            .position(|&v| v == level)
            .map(|i| labels[i])
            .unwrap_or("N/A")
    }
}

impl std::fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessmentType::Proficiency => write!(f, "proficiency"),
            AssessmentType::ScopeImpact => write!(f, "scope-impact"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domains_are_fixed() {
        assert_eq!(AssessmentType::Proficiency.domain(), &[1, 2, 3, 4, 5]);
        assert_eq!(AssessmentType::ScopeImpact.domain(), &[2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_contains_rejects_out_of_domain_values() {
        assert!(AssessmentType::Proficiency.contains(3));
        assert!(!AssessmentType::Proficiency.contains(0));
        assert!(!AssessmentType::Proficiency.contains(6));
        assert!(AssessmentType::ScopeImpact.contains(6));
        assert!(!AssessmentType::ScopeImpact.contains(3));
    }

    #[test]
    fn test_labels_track_domain_position() {
        assert_eq!(AssessmentType::Proficiency.label(1), "Foundational");
        assert_eq!(AssessmentType::Proficiency.label(5), "Expert");
        assert_eq!(AssessmentType::ScopeImpact.label(6), "Portfolio");
        assert_eq!(AssessmentType::ScopeImpact.label(0), "N/A");
        assert_eq!(AssessmentType::Proficiency.label(7), "N/A");
    }
}

//! Verdict aggregation.
//!
//! A requirement is displayed as met when its satisfaction agrees with its
//! polarity: satisfied for inclusive requirements, unsatisfied for
//! excluding ones. The overall verdict is the conjunction, so an empty set
//! passes vacuously.

use serde::Serialize;

use crate::requirements::RequirementSet;

/// Display status of one requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementStatus {
    /// User-facing description.
    pub description: String,
    /// Pattern that was searched for.
    pub pattern: String,
    /// Whether the requirement demands absence.
    pub exclude: bool,
    /// Whether the requirement counts as met.
    pub displayed_ok: bool,
}

impl RequirementStatus {
    /// Checkbox marker for list display.
    pub fn marker(&self) -> &'static str {
        if self.displayed_ok {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

/// Final result of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Whether every requirement is met.
    #[serde(rename = "match")]
    pub overall_match: bool,
    /// Per-requirement status, in declaration order.
    #[serde(rename = "requirements")]
    pub per_requirement: Vec<RequirementStatus>,
}

impl Verdict {
    /// Combine the final requirement states.
    pub fn aggregate(requirements: &RequirementSet) -> Self {
        let per_requirement: Vec<RequirementStatus> = requirements
            .iter()
            .map(|r| RequirementStatus {
                description: r.description.clone(),
                pattern: r.pattern.clone(),
                exclude: r.exclude,
                displayed_ok: r.displayed_ok(),
            })
            .collect();
        let overall_match = per_requirement.iter().all(|s| s.displayed_ok);

        Self {
            overall_match,
            per_requirement,
        }
    }

    /// Verdict for a run that stopped before matching finished.
    pub fn failed() -> Self {
        Self {
            overall_match: false,
            per_requirement: Vec::new(),
        }
    }

    /// Requirements that are not met.
    pub fn unmet(&self) -> impl Iterator<Item = &RequirementStatus> {
        self.per_requirement.iter().filter(|s| !s.displayed_ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::Requirement;

    fn satisfied(mut requirement: Requirement) -> Requirement {
        requirement.satisfied = true;
        requirement
    }

    #[test]
    fn empty_set_passes_vacuously() {
        let verdict = Verdict::aggregate(&RequirementSet::new());
        assert!(verdict.overall_match);
        assert!(verdict.per_requirement.is_empty());
    }

    #[test]
    fn all_inclusive_satisfied_passes() {
        let set: RequirementSet = vec![
            satisfied(Requirement::new("ForStatement", "use a loop")),
            satisfied(Requirement::new("IfStatement", "use a conditional")),
        ]
        .into_iter()
        .collect();
        let verdict = Verdict::aggregate(&set);
        assert!(verdict.overall_match);
        assert_eq!(verdict.unmet().count(), 0);
    }

    #[test]
    fn one_unsatisfied_fails() {
        let set: RequirementSet = vec![
            satisfied(Requirement::new("ForStatement", "use a loop")),
            Requirement::new("IfStatement", "use a conditional"),
        ]
        .into_iter()
        .collect();
        let verdict = Verdict::aggregate(&set);
        assert!(!verdict.overall_match);
        let unmet: Vec<_> = verdict.unmet().map(|s| s.description.as_str()).collect();
        assert_eq!(unmet, ["use a conditional"]);
    }

    #[test]
    fn exclude_absent_is_ok() {
        let set: RequirementSet = vec![Requirement::excluding("WhileStatement", "avoid while")]
            .into_iter()
            .collect();
        let verdict = Verdict::aggregate(&set);
        assert!(verdict.overall_match);
        assert_eq!(verdict.per_requirement[0].marker(), "[x]");
    }

    #[test]
    fn exclude_present_fails() {
        let set: RequirementSet =
            vec![satisfied(Requirement::excluding("WhileStatement", "avoid while"))]
                .into_iter()
                .collect();
        let verdict = Verdict::aggregate(&set);
        assert!(!verdict.overall_match);
        assert_eq!(verdict.per_requirement[0].marker(), "[ ]");
    }

    #[test]
    fn aggregate_is_pure() {
        let set: RequirementSet = vec![Requirement::new("A", "a")].into_iter().collect();
        let before = set.clone();
        let first = Verdict::aggregate(&set);
        let second = Verdict::aggregate(&set);
        assert_eq!(first, second);
        assert_eq!(set, before);
    }

    #[test]
    fn failed_never_matches() {
        let verdict = Verdict::failed();
        assert!(!verdict.overall_match);
    }

    #[test]
    fn serializes_with_display_names() {
        let set: RequirementSet = vec![Requirement::new("A", "a")].into_iter().collect();
        let json = serde_json::to_value(Verdict::aggregate(&set)).unwrap();
        assert_eq!(json["match"], false);
        assert_eq!(json["requirements"][0]["displayed_ok"], false);
    }
}

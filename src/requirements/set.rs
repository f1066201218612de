//! Requirement and requirement-set types.
//!
//! A [`Requirement`] pairs a substring pattern with a user-facing
//! description. The `exclude` flag inverts its polarity: the requirement
//! then holds when the pattern is *absent*.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One declared structural pattern the source should (or should not) show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Substring searched for in each emitted path.
    pub pattern: String,
    /// Text shown to the user.
    pub description: String,
    /// When true, the requirement holds only if the pattern never matches.
    pub exclude: bool,
    /// Whether some emitted path contained the pattern during this run.
    pub satisfied: bool,
}

impl Requirement {
    /// Create an inclusive requirement.
    pub fn new(pattern: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            description: description.into(),
            exclude: false,
            satisfied: false,
        }
    }

    /// Create a requirement that holds when the pattern is absent.
    pub fn excluding(pattern: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            exclude: true,
            ..Self::new(pattern, description)
        }
    }

    /// Whether the requirement counts as met, honoring polarity.
    pub fn displayed_ok(&self) -> bool {
        self.satisfied != self.exclude
    }
}

/// Ordered, fixed-length list of requirements for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet {
    requirements: Vec<Requirement>,
}

impl RequirementSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requirements.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter()
    }

    /// Mutable access for the matcher. The length cannot change.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Requirement> {
        self.requirements.iter_mut()
    }

    /// Number of requirements currently satisfied.
    pub fn satisfied_count(&self) -> usize {
        self.requirements.iter().filter(|r| r.satisfied).count()
    }
}

impl FromIterator<Requirement> for RequirementSet {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        Self {
            requirements: iter.into_iter().collect(),
        }
    }
}

/// On-disk requirement-set document.
///
/// Unknown fields, including any `satisfied` flag, are ignored: satisfaction
/// is always recomputed per run.
///
/// ```json
/// { "required": [ { "pattern": "ForStatement", "description": "Use a loop" } ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Requirement Set")]
pub struct RequirementSetDocument {
    /// Requirements, in display order.
    pub required: Vec<RequirementEntry>,
}

/// One entry of a requirement-set document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RequirementEntry {
    /// Substring to look for in structural paths, e.g. `ForStatement`.
    pub pattern: String,

    /// Text shown next to the status marker. Defaults to the pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Require the pattern to be absent instead of present.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclude: bool,
}

fn is_false(v: &bool) -> bool {
    !v
}

impl From<RequirementEntry> for Requirement {
    fn from(entry: RequirementEntry) -> Self {
        let description = entry.description.unwrap_or_else(|| entry.pattern.clone());
        Self {
            pattern: entry.pattern,
            description,
            exclude: entry.exclude,
            satisfied: false,
        }
    }
}

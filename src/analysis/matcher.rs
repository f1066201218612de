//! Requirement matching against emitted paths.
//!
//! The matcher is a [`PathSink`]: the projector hands it each path as soon
//! as it is emitted. Satisfaction is monotone within a run; a requirement
//! flips from unsatisfied to satisfied at most once and is skipped after.

use tracing::debug;

use super::projector::{PathSink, TraversalEvent};
use crate::requirements::RequirementSet;

/// Marks requirements satisfied as matching paths arrive.
pub struct RequirementMatcher<'a> {
    requirements: &'a mut RequirementSet,
}

impl<'a> RequirementMatcher<'a> {
    /// Create a matcher over the run's requirement set.
    pub fn new(requirements: &'a mut RequirementSet) -> Self {
        Self { requirements }
    }

    /// Test `path` against every still-unsatisfied requirement.
    ///
    /// Matching is a case-sensitive substring search; no wildcards.
    pub fn check_requirement(&mut self, path: &str) {
        for requirement in self.requirements.iter_mut().filter(|r| !r.satisfied) {
            if path.contains(requirement.pattern.as_str()) {
                requirement.satisfied = true;
                debug!(pattern = %requirement.pattern, "Requirement satisfied");
            }
        }
    }
}

impl PathSink for RequirementMatcher<'_> {
    fn on_event(&mut self, event: TraversalEvent<'_>) {
        match event {
            TraversalEvent::TypeLabel { path, .. } => self.check_requirement(path),
        }
    }
}

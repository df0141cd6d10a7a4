use crate::models::{CandidateTable, Role, RoleAssignment};
use tracing::debug;

/// Canonical form used to address a column: trimmed, lowercased, every
/// space replaced by an underscore.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Maps raw column names onto semantic roles by substring matching.
pub struct ColumnResolver {
    candidates: CandidateTable,
}

impl ColumnResolver {
    pub fn new() -> Self {
        Self::with_candidates(CandidateTable::default())
    }

    pub fn with_candidates(candidates: CandidateTable) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &CandidateTable {
        &self.candidates
    }

    /// Resolve every role against `column_names`.
    ///
    /// For each role the first column in table order whose normalized name
    /// contains any of the role's candidates wins. Roles are searched
    /// independently, so one column may end up serving more than one role.
    pub fn resolve<S: AsRef<str>>(&self, column_names: &[S]) -> RoleAssignment {
        let normalized: Vec<String> = column_names
            .iter()
            .map(|name| normalize_column_name(name.as_ref()))
            .collect();

        let assignment = RoleAssignment::from_fn(|role| self.pick(&normalized, role));
        debug!("Resolved roles:\n{}", assignment.summary());
        assignment
    }

    fn pick(&self, columns: &[String], role: Role) -> Option<String> {
        let candidates = self.candidates.candidates(role);
        columns
            .iter()
            .find(|column| {
                candidates
                    .iter()
                    .any(|candidate| column.contains(candidate.as_str()))
            })
            .cloned()
    }
}

impl Default for ColumnResolver {
    fn default() -> Self {
        Self::new()
    }
}

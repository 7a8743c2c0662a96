use super::model::SubjectRow;

// ---------------------------------------------------------------------------
// Group predicate
// ---------------------------------------------------------------------------

/// Selects rows by their OSPAN group label.
///
/// * `target == None` → every row passes (no constraint)
/// * `target == Some(g)` → only rows whose group equals `g` exactly
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupFilter {
    target: Option<String>,
}

impl GroupFilter {
    pub fn all() -> Self {
        GroupFilter { target: None }
    }

    pub fn only(target: impl Into<String>) -> Self {
        GroupFilter {
            target: Some(target.into()),
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Case-sensitive, whole-string comparison.
    pub fn matches(&self, row: &SubjectRow) -> bool {
        match &self.target {
            Some(target) => row.group == *target,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(group: &str) -> SubjectRow {
        SubjectRow {
            subject: 1,
            group: group.into(),
            ospan_score: 20,
            easy: 1.0,
            hard: 2.0,
        }
    }

    #[test]
    fn only_matches_exact_group() {
        let filter = GroupFilter::only("High");
        assert!(filter.matches(&row("High")));
        assert!(!filter.matches(&row("Low")));
        assert!(!filter.matches(&row("high")));
        assert!(!filter.matches(&row("Higher")));
        assert!(!filter.matches(&row("")));
    }

    #[test]
    fn all_matches_everything() {
        let filter = GroupFilter::all();
        assert_eq!(filter.target(), None);
        assert!(filter.matches(&row("High")));
        assert!(filter.matches(&row("Low")));
    }
}

use crate::error::{ReportError, Result};
use crate::model::Commit;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Placement {
    Before,
    Within,
    After,
}

/// Inclusive range of calendar days covered by the sprint.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SprintWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SprintWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Configured dates win; a missing bound falls back to the committed date
    /// of the oldest (start) or newest (end) commit of the range.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        commits: &[Commit],
    ) -> Result<Self> {
        let newest = commits.first().map(|c| c.committed_date.date_naive());
        let oldest = commits.last().map(|c| c.committed_date.date_naive());
        let start = start.or(oldest).ok_or(ReportError::EmptyHistory)?;
        let end = end.or(newest).ok_or(ReportError::EmptyHistory)?;
        Ok(Self::new(start, end))
    }

    /// Compared on the UTC calendar day so the whole end day is inside.
    pub fn place(&self, at: &DateTime<Utc>) -> Placement {
        let day = at.date_naive();
        if day < self.start {
            Placement::Before
        } else if day > self.end {
            Placement::After
        } else {
            Placement::Within
        }
    }
}

/// Cuts a newest-first history down to the inclusive range between `end`
/// (newest kept commit) and `start` (oldest kept commit).
pub fn truncate_history(
    mut commits: Vec<Commit>,
    start: Option<&str>,
    end: Option<&str>,
    branch: &str,
) -> Result<Vec<Commit>> {
    let not_found = |oid: &str| ReportError::BoundaryNotFound {
        oid: oid.to_string(),
        branch: branch.to_string(),
    };

    if let Some(start) = start {
        let index = position(&commits, start).ok_or_else(|| not_found(start))?;
        commits.truncate(index + 1);
    }
    if let Some(end) = end {
        let index = position(&commits, end).ok_or_else(|| not_found(end))?;
        commits.drain(..index);
    }
    debug!("Commit range holds {} commits", commits.len());
    Ok(commits)
}

fn position(commits: &[Commit], oid: &str) -> Option<usize> {
    commits.iter().position(|c| c.oid == oid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::tests::commit;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn history() -> Vec<Commit> {
        ["e5", "d4", "c3", "b2", "a1"]
            .iter()
            .enumerate()
            .map(|(i, oid)| {
                let mut c = commit(oid, "chore", None);
                c.committed_date = Utc.with_ymd_and_hms(2021, 12, 20 - i as u32, 9, 0, 0).unwrap();
                c
            })
            .collect()
    }

    fn oids(commits: &[Commit]) -> Vec<&str> {
        commits.iter().map(|c| c.oid.as_str()).collect()
    }

    #[test]
    fn keeps_inclusive_range_between_boundaries() {
        let commits = truncate_history(history(), Some("b2"), Some("d4"), "main").unwrap();
        assert_eq!(oids(&commits), vec!["d4", "c3", "b2"]);
    }

    #[test]
    fn boundary_at_the_edges_keeps_everything() {
        let commits = truncate_history(history(), Some("a1"), Some("e5"), "main").unwrap();
        assert_eq!(commits.len(), 5);
        let commits = truncate_history(history(), Some("e5"), None, "main").unwrap();
        assert_eq!(oids(&commits), vec!["e5"]);
    }

    #[test]
    fn missing_boundary_is_an_error() {
        let err = truncate_history(history(), Some("ff"), None, "main").unwrap_err();
        assert!(matches!(err, ReportError::BoundaryNotFound { ref oid, .. } if oid == "ff"));
    }

    #[test]
    fn end_older_than_start_is_not_found() {
        let err = truncate_history(history(), Some("d4"), Some("b2"), "main").unwrap_err();
        assert!(matches!(err, ReportError::BoundaryNotFound { ref oid, .. } if oid == "b2"));
    }

    #[test]
    fn window_defaults_to_commit_dates() {
        let window = SprintWindow::resolve(None, None, &history()).unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2021, 12, 16).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2021, 12, 20).unwrap());

        let start = NaiveDate::from_ymd_opt(2021, 12, 1);
        let window = SprintWindow::resolve(start, None, &history()).unwrap();
        assert_eq!(Some(window.start), start);
    }

    #[test]
    fn window_without_dates_or_commits_fails() {
        let err = SprintWindow::resolve(None, None, &[]).unwrap_err();
        assert!(matches!(err, ReportError::EmptyHistory));
    }
}

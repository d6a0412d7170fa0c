use crate::analyze::model::AnnotatedCommit;
use crate::model::{Commit, Issue, ReportConfig};
use indexmap::IndexMap;
use itertools::Itertools;

/// Maps commit authors (by email domain) and issues (by label) to team names.
pub struct TeamAttributor<'c> {
    default_team: &'c str,
    label_teams: &'c IndexMap<String, String>,
    mail_teams: &'c IndexMap<String, String>,
}

impl<'c> TeamAttributor<'c> {
    pub fn new(config: &'c ReportConfig) -> Self {
        Self {
            default_team: &config.default_team,
            label_teams: &config.label_teams,
            mail_teams: &config.mail_teams,
        }
    }

    /// No default here: an unmapped domain leaves the commit without a team.
    pub fn commit_team(&self, commit: &Commit) -> Option<String> {
        let domain = commit.author_domain()?;
        self.mail_teams.get(domain).cloned()
    }

    pub fn issue_teams(&self, issue: &Issue) -> Vec<String> {
        let teams = issue
            .labels
            .iter()
            .filter_map(|label| self.label_teams.get(label))
            .unique()
            .cloned()
            .collect::<Vec<_>>();
        if teams.is_empty() {
            vec![self.default_team.to_string()]
        } else {
            teams
        }
    }
}

/// The single team of an issue, if its labels name exactly one team and every
/// linked commit was attributed to that same team.
pub fn consensus<'i>(teams: &'i [String], commits: &[&AnnotatedCommit]) -> Option<&'i str> {
    match teams {
        [team] if commits.iter().all(|c| c.team.as_ref() == Some(team)) => Some(team.as_str()),
        _ => None,
    }
}

/// Whether the commits were attributed to more than one team (unknown counts as one).
pub fn commits_disagree(commits: &[&AnnotatedCommit]) -> bool {
    !commits.iter().map(|c| c.team.as_deref()).all_equal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::tests::{commit, issue};
    use crate::model::tests::sample_config;
    use pretty_assertions::assert_eq;

    fn annotated<'a>(raw: &'a Commit, team: Option<&str>) -> AnnotatedCommit<'a> {
        AnnotatedCommit {
            commit: raw,
            team: team.map(String::from),
            links: vec![],
            warning: None,
        }
    }

    #[test]
    fn commit_team_comes_from_email_domain() {
        let config = sample_config();
        let attributor = TeamAttributor::new(&config);
        let known = commit("a1", "fix #1", Some("jane@eclipsesource.com"));
        let unknown = commit("b2", "fix #1", Some("jane@example.org"));
        let malformed = commit("c3", "fix #1", Some("jane"));
        assert_eq!(attributor.commit_team(&known).as_deref(), Some("EclipseSource"));
        assert_eq!(attributor.commit_team(&unknown), None);
        assert_eq!(attributor.commit_team(&malformed), None);
    }

    #[test]
    fn issue_teams_fall_back_to_default() {
        let config = sample_config();
        let attributor = TeamAttributor::new(&config);
        assert_eq!(attributor.issue_teams(&issue(5, &["bug"])), vec!["EclipseSource"]);
        assert_eq!(attributor.issue_teams(&issue(6, &["foo", "bug"])), vec!["Foobar"]);
    }

    #[test]
    fn consensus_requires_single_team_shared_by_commits() {
        let a1 = commit("a1", "fix #5", None);
        let a2 = commit("a2", "fix #5", None);
        let same = [annotated(&a1, Some("A")), annotated(&a2, Some("A"))];
        let mixed = [annotated(&a1, Some("A")), annotated(&a2, Some("B"))];
        let teams = vec!["A".to_string()];

        assert_eq!(consensus(&teams, &same.iter().collect::<Vec<_>>()), Some("A"));
        assert_eq!(consensus(&teams, &mixed.iter().collect::<Vec<_>>()), None);
        assert_eq!(consensus(&teams, &[]), Some("A"));

        let two_teams = vec!["A".to_string(), "B".to_string()];
        assert_eq!(consensus(&two_teams, &[]), None);
    }

    #[test]
    fn commit_without_team_breaks_consensus() {
        let a1 = commit("a1", "fix #5", None);
        let commits = [annotated(&a1, None)];
        let teams = vec!["A".to_string()];
        assert_eq!(consensus(&teams, &commits.iter().collect::<Vec<_>>()), None);
        assert!(!commits_disagree(&commits.iter().collect::<Vec<_>>()));
    }
}

use crate::analyze::model::AnnotatedCommit;
use crate::analyze::window::{Placement, SprintWindow};
use crate::model::{Issue, PullRequest, PullRequestState};
use std::fmt;

/// A non-fatal anomaly, rendered inline next to the record it concerns.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub enum Warning {
    IssueOpen,
    PullRequestState(PullRequestState),
    MergedBeforeSprint { url: String },
    MergedAfterSprint { url: String },
    NoCommitTeam,
    CommitTeamMismatch { team: String },
    IssueNotInMilestone,
    NoIssueReference,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::IssueOpen => write!(f, "Issue is still open."),
            Warning::PullRequestState(state) => write!(f, "pull-request state is {}", state),
            Warning::MergedBeforeSprint { url } => write!(f, "PR <{}> merged before Sprint", url),
            Warning::MergedAfterSprint { url } => write!(f, "PR <{}> merged after Sprint", url),
            Warning::NoCommitTeam => write!(f, "No team found for commit"),
            Warning::CommitTeamMismatch { team } => {
                write!(f, "Commit Team **{}** not the same as in issue", team)
            }
            Warning::IssueNotInMilestone => write!(f, "Commit is linking to issue not in milestone"),
            Warning::NoIssueReference => write!(f, "Commit not linking to any issue"),
        }
    }
}

pub fn issue_warnings(issue: &Issue) -> Vec<Warning> {
    if issue.is_open() {
        vec![Warning::IssueOpen]
    } else {
        vec![]
    }
}

/// State and merge-time checks, evaluated for each pull request on its own.
pub fn pull_request_warnings(pull_request: &PullRequest, window: &SprintWindow) -> Vec<Warning> {
    let mut warnings = vec![];
    if !pull_request.is_merged() {
        warnings.push(Warning::PullRequestState(pull_request.state));
        return warnings;
    }
    let Some(merged_at) = pull_request.merged_at else {
        return warnings;
    };
    let url = pull_request.url.clone();
    match window.place(&merged_at) {
        Placement::Before => warnings.push(Warning::MergedBeforeSprint { url }),
        Placement::After => warnings.push(Warning::MergedAfterSprint { url }),
        Placement::Within => {}
    }
    warnings
}

/// Linking warning of the commit plus its team checked against the owning issue.
pub fn commit_warnings(commit: &AnnotatedCommit, issue_teams: &[String]) -> Vec<Warning> {
    let mut warnings: Vec<Warning> = commit.warning.iter().cloned().collect();
    match &commit.team {
        None => warnings.push(Warning::NoCommitTeam),
        Some(team) if !issue_teams.contains(team) => {
            warnings.push(Warning::CommitTeamMismatch { team: team.clone() })
        }
        Some(_) => {}
    }
    warnings
}

pub fn unassignable_warnings(commit: &AnnotatedCommit) -> Vec<Warning> {
    let mut warnings: Vec<Warning> = commit.warning.iter().cloned().collect();
    if commit.team.is_none() {
        warnings.push(Warning::NoCommitTeam);
    }
    warnings
}

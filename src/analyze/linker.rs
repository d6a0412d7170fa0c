use crate::analyze::anomaly::Warning;
use crate::analyze::model::{AnnotatedCommit, AnnotatedIssue, IssueLink, Linkage, Totals};
use crate::analyze::team::TeamAttributor;
use crate::model::{Commit, Issue, PullRequest, ReportConfig};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum MessagePart {
    Headline,
    Message,
}

/// One commit-message rule: which part of the message it reads, an optional
/// keyword that must come first, and the expression whose first capture group
/// is an issue number. With a keyword, every reference after its first
/// occurrence counts.
struct MessagePattern {
    part: MessagePart,
    keyword: Option<Regex>,
    regex: Regex,
}

impl MessagePattern {
    fn new(part: MessagePart, pattern: &str) -> Self {
        Self {
            part,
            keyword: None,
            regex: Regex::new(pattern).unwrap(),
        }
    }

    fn after_keyword(mut self, keyword: &str) -> Self {
        self.keyword = Some(Regex::new(keyword).unwrap());
        self
    }

    fn references(&self, commit: &Commit) -> Option<Vec<u64>> {
        let text = match self.part {
            MessagePart::Headline => commit.headline.as_str(),
            MessagePart::Message => commit.message.as_str(),
        };
        let text = match &self.keyword {
            Some(keyword) => &text[keyword.find(text)?.end()..],
            None => text,
        };
        let numbers = self
            .regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1)?.as_str().parse::<u64>().ok())
            .unique()
            .collect::<Vec<_>>();
        if numbers.is_empty() {
            None
        } else {
            Some(numbers)
        }
    }
}

// Priority order, the first pattern with a match decides.
static MESSAGE_PATTERNS: Lazy<Vec<MessagePattern>> = Lazy::new(|| {
    vec![
        MessagePattern::new(MessagePart::Headline, r"(?i)gh-(\d+)"),
        MessagePattern::new(MessagePart::Message, r"(?i)(?:gh-|#)(\d+)")
            .after_keyword(r"(?i)fix|resolve|close"),
        MessagePattern::new(MessagePart::Message, r"(?i)(?:gh-|#)(\d+)"),
    ]
});

static BRANCH_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)gh-?(\d+)").unwrap());

/// Issue numbers referenced by the commit message, `None` if no pattern matches.
pub fn message_references(commit: &Commit) -> Option<Vec<u64>> {
    MESSAGE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.references(commit))
}

/// Issue number encoded in a `gh-42` / `GH42` style branch name.
pub fn branch_reference(branch: &str) -> Option<u64> {
    BRANCH_PATTERN
        .captures(branch)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Links commits and pull requests to the issues of one milestone.
pub struct Linker<'c> {
    attributor: TeamAttributor<'c>,
    issues: &'c [Issue],
    active: HashSet<u64>,
}

impl<'c> Linker<'c> {
    pub fn new(config: &'c ReportConfig, issues: &'c [Issue]) -> Self {
        Self {
            attributor: TeamAttributor::new(config),
            issues,
            active: issues.iter().map(|issue| issue.number).collect(),
        }
    }

    /// Milestone issues a pull request belongs to: closing references first,
    /// the branch name only when none of them is in the milestone.
    pub fn pull_request_issues(&self, pull_request: &PullRequest) -> Vec<u64> {
        let closing = pull_request
            .closing_issues
            .iter()
            .copied()
            .filter(|number| self.active.contains(number))
            .unique()
            .collect::<Vec<_>>();
        if !closing.is_empty() {
            return closing;
        }
        branch_reference(&pull_request.branch)
            .filter(|number| self.active.contains(number))
            .into_iter()
            .collect()
    }

    pub fn annotate_commits<'a>(&self, commits: &'a [Commit]) -> Vec<AnnotatedCommit<'a>> {
        commits
            .iter()
            .map(|commit| self.annotate_commit(commit))
            .collect()
    }

    fn annotate_commit<'a>(&self, commit: &'a Commit) -> AnnotatedCommit<'a> {
        let team = self.attributor.commit_team(commit);

        let links = commit
            .pull_requests
            .iter()
            .flat_map(|pull_request| {
                self.pull_request_issues(pull_request)
                    .into_iter()
                    .map(move |number| IssueLink {
                        number,
                        pull_request: Some(pull_request),
                    })
            })
            .collect::<Vec<_>>();
        if !links.is_empty() {
            debug!("Commit {} linked through its pull requests", commit.abbreviated_oid);
            return AnnotatedCommit {
                commit,
                team,
                links,
                warning: None,
            };
        }

        let Some(numbers) = message_references(commit) else {
            debug!("Commit {} references no issue", commit.abbreviated_oid);
            return AnnotatedCommit {
                commit,
                team,
                links: vec![],
                warning: Some(Warning::NoIssueReference),
            };
        };
        let (inside, outside): (Vec<u64>, Vec<u64>) = numbers
            .into_iter()
            .partition(|number| self.active.contains(number));
        if !outside.is_empty() {
            debug!(
                "Commit {} references issues outside the milestone: {:?}",
                commit.abbreviated_oid, outside
            );
        }
        AnnotatedCommit {
            commit,
            team,
            links: inside
                .into_iter()
                .map(|number| IssueLink {
                    number,
                    pull_request: None,
                })
                .collect(),
            warning: (!outside.is_empty()).then_some(Warning::IssueNotInMilestone),
        }
    }

    /// Attaches pull requests and annotated commits to the milestone issues,
    /// keeping discovery order. Commits without links become unassignable.
    pub fn link<'a>(
        &self,
        commits: &'a [AnnotatedCommit<'a>],
        pull_requests: &'a [PullRequest],
    ) -> Linkage<'a>
    where
        'c: 'a,
    {
        let mut issues = self
            .issues
            .iter()
            .map(|issue| AnnotatedIssue::new(issue, self.attributor.issue_teams(issue)))
            .collect::<Vec<_>>();
        let positions = self
            .issues
            .iter()
            .enumerate()
            .map(|(index, issue)| (issue.number, index))
            .collect::<HashMap<_, _>>();
        let mut linked_pull_requests = HashSet::new();

        for pull_request in pull_requests {
            let numbers = self.pull_request_issues(pull_request);
            if numbers.is_empty() {
                debug!("Pull request {} links to no milestone issue", pull_request.url);
                continue;
            }
            for number in numbers {
                if let Some(&index) = positions.get(&number) {
                    issues[index].attach_pull_request(pull_request);
                    linked_pull_requests.insert(pull_request.url.as_str());
                }
            }
        }

        let mut unassignable = vec![];
        for commit in commits {
            if !commit.is_assignable() {
                unassignable.push(commit);
                continue;
            }
            for link in &commit.links {
                let Some(&index) = positions.get(&link.number) else {
                    continue;
                };
                issues[index].attach_commit(commit);
                if let Some(pull_request) = link.pull_request {
                    issues[index].attach_pull_request(pull_request);
                    linked_pull_requests.insert(pull_request.url.as_str());
                }
            }
        }

        Linkage {
            issues,
            unassignable,
            totals: Totals {
                commits: commits.len(),
                pull_requests: linked_pull_requests.len(),
            },
            excluded: 0,
        }
    }
}

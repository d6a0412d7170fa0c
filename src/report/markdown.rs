use crate::analyze::anomaly::{self, Warning};
use crate::analyze::team::{commits_disagree, consensus};
use crate::analyze::{AnnotatedCommit, AnnotatedIssue, Linkage, SprintWindow};
use crate::model::{Commit, Milestone, PullRequest, Repository};
use chrono::NaiveDate;
use markdown_builder::Markdown;
use std::fmt;

/// Everything the contribution report shows, borrowed from one run.
pub struct SprintReport<'a> {
    pub repository: &'a Repository,
    pub milestone: &'a Milestone,
    pub window: SprintWindow,
    pub branch: &'a str,
    /// Commit range, newest first.
    pub commits: &'a [Commit],
    pub linkage: &'a Linkage<'a>,
}

pub trait MarkdownReport {
    fn render_markdown(&self) -> String;
}

impl MarkdownReport for SprintReport<'_> {
    fn render_markdown(&self) -> String {
        let mut doc = Markdown::new();

        doc.add_header(self);

        doc.header2("Issues");
        for issue in &self.linkage.issues {
            doc.add_issue(issue, &self.window);
        }

        doc.header2("Commits not mapped to issues");
        for commit in &self.linkage.unassignable {
            doc.add_unassignable(commit);
        }

        doc.render()
    }
}

/// Pre-formatted lines, emitted as they are. `Paragraph` re-wraps at 80
/// columns, which breaks list items and long links.
#[derive(Clone, Debug)]
struct Verbatim(String);

impl fmt::Display for Verbatim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0)
    }
}

trait MarkdownExt {
    fn verbatim(&mut self, text: String);
    fn add_header(&mut self, report: &SprintReport);
    fn add_issue(&mut self, issue: &AnnotatedIssue, window: &SprintWindow);
    fn add_unassignable(&mut self, commit: &AnnotatedCommit);
}

impl MarkdownExt for Markdown {
    fn verbatim(&mut self, text: String) {
        self.elements.push(Box::new(Verbatim(text)));
    }

    fn add_header(&mut self, report: &SprintReport) {
        let milestone = report.milestone;
        let linkage = report.linkage;
        self.header1(format!("{} Contribution Report", milestone.title));

        self.verbatim(format!(
            "Repository: [{}]({})",
            report.repository.slug(),
            report.repository.url
        ));
        self.verbatim(format!(
            "Sprint Start (inclusive): {}  \nSprint End (inclusive): {}",
            long_date(&report.window.start),
            long_date(&report.window.end),
        ));

        let excluded = match linkage.excluded {
            0 => String::new(),
            n => format!(" ({} excluded by label filter)", n),
        };
        self.verbatim(format!(
            "Milestone: [{}]({})  \nNumber of issues: {}{}",
            milestone.title,
            milestone.url,
            linkage.issues.len(),
            excluded
        ));

        self.verbatim(format!(
            "Considered branch: {}  \nStart Commit (inclusive): {}  \nEnd Commit (inclusive): {}  \nNumber of commits: {}  \nNumber of pull requests: {}",
            report.branch,
            commit_link(report.commits.last()),
            commit_link(report.commits.first()),
            linkage.totals.commits,
            linkage.totals.pull_requests,
        ));
    }

    fn add_issue(&mut self, issue: &AnnotatedIssue, window: &SprintWindow) {
        self.header3(issue.issue.title.clone());

        for warning in anomaly::issue_warnings(issue.issue) {
            self.verbatim(format!("*Warning: {}*", warning));
        }

        let mut body = format!(
            "Id: #{}  \nLink: <{}>  \n",
            issue.issue.number, issue.issue.url
        );
        push_pull_requests(&mut body, &issue.pull_requests, window);
        push_commits(&mut body, issue);
        self.verbatim(body.trim_end().to_string());

        if let Some(team) = consensus(&issue.teams, &issue.commits) {
            self.verbatim(format!("Team: {}", team));
        }
    }

    fn add_unassignable(&mut self, commit: &AnnotatedCommit) {
        self.header3(commit.commit.headline.clone());

        let mut body = format!("Id: {}  \n", commit_link(Some(commit.commit)));
        if let Some(team) = &commit.team {
            body.push_str(&format!("Team: {}  \n", team));
        }
        push_warnings(&mut body, &anomaly::unassignable_warnings(commit));
        self.verbatim(body.trim_end().to_string());
    }
}

fn push_pull_requests(body: &mut String, pull_requests: &[&PullRequest], window: &SprintWindow) {
    match pull_requests {
        [] => body.push_str(
            "Associated PR: No pull-request linked to this issue found in this sprint  \n",
        ),
        [pull_request] => {
            body.push_str(&format!("Associated PR: <{}>  \n", pull_request.url));
            push_warnings(body, &anomaly::pull_request_warnings(pull_request, window));
        }
        _ => {
            body.push_str("\nAssociated PRs:\n\n");
            for pull_request in pull_requests {
                body.push_str(&format!("- <{}>  \n", pull_request.url));
                push_warnings(body, &anomaly::pull_request_warnings(pull_request, window));
            }
            body.push('\n');
        }
    }
}

fn push_commits(body: &mut String, issue: &AnnotatedIssue) {
    match issue.commits.as_slice() {
        [] => body.push_str(
            "Associated Commits: No commits linked to this issue found in this sprint  \n",
        ),
        [commit] => {
            body.push_str(&format!(
                "Associated Commit: {}  \n",
                commit_link(Some(commit.commit))
            ));
            push_warnings(body, &anomaly::commit_warnings(commit, &issue.teams));
        }
        commits => {
            let show_teams = commits_disagree(commits);
            body.push_str("\nAssociated Commits:\n\n");
            for commit in commits {
                let team = if show_teams {
                    format!(" [Team: {}]", commit.team.as_deref().unwrap_or("unknown"))
                } else {
                    String::new()
                };
                body.push_str(&format!("- {}{}  \n", commit_link(Some(commit.commit)), team));
                push_warnings(body, &anomaly::commit_warnings(commit, &issue.teams));
            }
        }
    }
}

fn push_warnings(body: &mut String, warnings: &[Warning]) {
    for warning in warnings {
        body.push_str(&format!("*Warning: {}*  \n", warning));
    }
}

fn commit_link(commit: Option<&Commit>) -> String {
    match commit {
        Some(commit) => format!("[{}]({})", commit.oid, commit.url),
        None => "none".to_string(),
    }
}

/// `December 1, 2021`
fn long_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

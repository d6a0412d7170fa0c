use crate::error::{ReportError, Result};
use crate::model::{Commit, Issue, IssueState, PullRequest, PullRequestState};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Response<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<ResponseError>>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseError {
    pub message: String,
}

impl<T> Response<T> {
    pub fn into_data(self) -> Result<T> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let message = errors.iter().map(|e| e.message.as_str()).join("; ");
            return Err(ReportError::GraphQl(message));
        }
        self.data
            .ok_or_else(|| ReportError::GraphQl("response carried no data".to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub page_info: PageInfo,
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct Named {
    pub name: String,
}

// Milestone

#[derive(Debug, Deserialize)]
pub struct MilestoneData {
    pub repository: Option<MilestoneRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneRepository {
    pub url: String,
    pub default_branch_ref: Option<Named>,
    pub milestone: Option<MilestoneNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneNode {
    pub title: String,
    pub url: String,
    pub issues: Connection<IssueNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStateNode {
    Open,
    Closed,
}

#[derive(Debug, Deserialize)]
pub struct IssueNode {
    pub url: String,
    pub title: String,
    pub state: IssueStateNode,
    pub number: u64,
    pub labels: Option<Nodes<Named>>,
}

impl From<IssueNode> for Issue {
    fn from(node: IssueNode) -> Self {
        Issue {
            number: node.number,
            title: node.title,
            url: node.url,
            state: match node.state {
                IssueStateNode::Open => IssueState::Open,
                IssueStateNode::Closed => IssueState::Closed,
            },
            labels: node
                .labels
                .map(|labels| labels.nodes.into_iter().map(|l| l.name).collect())
                .unwrap_or_default(),
        }
    }
}

// Commit history

#[derive(Debug, Deserialize)]
pub struct HistoryData {
    pub repository: Option<HistoryRepository>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryRepository {
    #[serde(rename = "ref")]
    pub reference: Option<HistoryRef>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryRef {
    pub target: Option<HistoryTarget>,
}

/// Empty when the ref does not point at a commit.
#[derive(Debug, Deserialize)]
pub struct HistoryTarget {
    #[serde(default)]
    pub history: Option<Connection<CommitNode>>,
}

#[derive(Debug, Deserialize)]
pub struct AuthorNode {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitNode {
    pub message_headline: String,
    pub message: String,
    pub oid: String,
    pub abbreviated_oid: String,
    pub url: String,
    pub committed_date: DateTime<Utc>,
    pub author: Option<AuthorNode>,
    #[serde(default)]
    pub associated_pull_requests: Option<Nodes<PullRequestNode>>,
}

impl From<CommitNode> for Commit {
    fn from(node: CommitNode) -> Self {
        Commit {
            oid: node.oid,
            abbreviated_oid: node.abbreviated_oid,
            headline: node.message_headline,
            message: node.message,
            url: node.url,
            committed_date: node.committed_date,
            author_email: node.author.and_then(|a| a.email),
            pull_requests: node
                .associated_pull_requests
                .map(|prs| prs.nodes.into_iter().map(PullRequest::from).collect())
                .unwrap_or_default(),
        }
    }
}

// Pull requests

#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: Connection<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestStateNode {
    Open,
    Closed,
    Merged,
}

#[derive(Debug, Deserialize)]
pub struct NumberNode {
    pub number: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    pub url: String,
    pub state: PullRequestStateNode,
    pub merged_at: Option<DateTime<Utc>>,
    pub head_ref_name: String,
    pub closing_issues_references: Option<Nodes<NumberNode>>,
}

impl From<PullRequestNode> for PullRequest {
    fn from(node: PullRequestNode) -> Self {
        PullRequest {
            url: node.url,
            state: match node.state {
                PullRequestStateNode::Open => PullRequestState::Open,
                PullRequestStateNode::Closed => PullRequestState::Closed,
                PullRequestStateNode::Merged => PullRequestState::Merged,
            },
            merged_at: node.merged_at,
            branch: node.head_ref_name,
            closing_issues: node
                .closing_issues_references
                .map(|refs| refs.nodes.into_iter().map(|n| n.number).collect())
                .unwrap_or_default(),
        }
    }
}

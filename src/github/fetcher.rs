use crate::error::{ReportError, Result};
use crate::github::query::{self, PAGE_SIZE};
use crate::github::wire::{HistoryData, MilestoneData, Response, SearchData};
use crate::github::{HistoryQuery, PageProgress, RecordFetcher};
use crate::model::{Commit, Issue, Milestone, PullRequest, ReportConfig, Repository};
use chrono::NaiveDate;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// GitHub GraphQL backed record source for one repository.
pub struct GithubFetcher {
    client: Octocrab,
    owner: String,
    name: String,
}

impl GithubFetcher {
    pub fn new(token: &str, config: &ReportConfig) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .build()?;
        Ok(Self {
            client,
            owner: config.owner.clone(),
            name: config.repository.clone(),
        })
    }

    async fn query<T: DeserializeOwned>(
        &self,
        graphql: &str,
        variables: Map<String, Value>,
    ) -> Result<T> {
        let payload = json!({ "query": graphql, "variables": variables });
        let response: Response<T> = self.client.graphql(&payload).await?;
        response.into_data()
    }

    fn variables(&self, cursor: &Option<String>) -> Map<String, Value> {
        let mut variables = Map::new();
        variables.insert("owner".into(), json!(self.owner));
        variables.insert("name".into(), json!(self.name));
        variables.insert("pageSize".into(), json!(PAGE_SIZE));
        if let Some(cursor) = cursor {
            variables.insert("cursor".into(), json!(cursor));
        }
        variables
    }
}

impl RecordFetcher for GithubFetcher {
    async fn fetch_milestone(
        &self,
        milestone: u64,
        mut cb: PageProgress<'_>,
    ) -> Result<(Repository, Milestone)> {
        let not_found = || ReportError::MilestoneNotFound {
            owner: self.owner.clone(),
            repository: self.name.clone(),
            milestone,
        };

        let mut page = 1;
        let mut cursor = None;
        let mut issues: Vec<Issue> = vec![];
        loop {
            cb(page);
            let mut variables = self.variables(&cursor);
            variables.insert("milestone".into(), json!(milestone));
            let data: MilestoneData = self.query(query::MILESTONE_ISSUES, variables).await?;

            let repo = data.repository.ok_or_else(not_found)?;
            let node = repo.milestone.ok_or_else(not_found)?;
            let connection = node.issues;
            issues.extend(connection.nodes.into_iter().map(Issue::from));

            if !connection.page_info.has_next_page || connection.page_info.end_cursor.is_none() {
                if issues.is_empty() {
                    return Err(ReportError::MilestoneEmpty { milestone });
                }
                let repository = Repository::new(
                    &self.owner,
                    &self.name,
                    repo.url,
                    repo.default_branch_ref.map(|r| r.name),
                );
                let milestone = Milestone {
                    title: node.title,
                    url: node.url,
                    issues,
                };
                return Ok((repository, milestone));
            }
            cursor = connection.page_info.end_cursor;
            page += 1;
        }
    }

    async fn fetch_commit_history(
        &self,
        history: &HistoryQuery,
        mut cb: PageProgress<'_>,
    ) -> Result<Vec<Commit>> {
        let branch_not_found = || ReportError::BranchNotFound {
            branch: history.branch.clone(),
        };
        if history.since.is_none() && history.stop_at.is_none() {
            warn!(
                "Neither a start date nor a start commit is configured, reading the whole history of '{}'",
                history.branch
            );
        }

        let graphql = query::with_pull_request_fields(query::COMMIT_HISTORY);
        let mut page = 1;
        let mut cursor = None;
        let mut commits: Vec<Commit> = vec![];
        loop {
            cb(page);
            let mut variables = self.variables(&cursor);
            variables.insert(
                "qualifiedName".into(),
                json!(format!("refs/heads/{}", history.branch)),
            );
            variables.insert("withPullRequests".into(), json!(history.with_pull_requests));
            if let Some(since) = history.since {
                variables.insert("since".into(), json!(format!("{}T00:00:00Z", since)));
            }
            if let Some(until) = history.until {
                variables.insert("until".into(), json!(format!("{}T23:59:59Z", until)));
            }
            let data: HistoryData = self.query(&graphql, variables).await?;

            let connection = data
                .repository
                .and_then(|r| r.reference)
                .and_then(|r| r.target)
                .and_then(|t| t.history)
                .ok_or_else(branch_not_found)?;
            commits.extend(connection.nodes.into_iter().map(Commit::from));

            let reached_start = history
                .stop_at
                .as_deref()
                .is_some_and(|oid| commits.iter().any(|c| c.oid == oid));
            if reached_start {
                debug!("Start commit found on page {}", page);
                break;
            }
            if !connection.page_info.has_next_page || connection.page_info.end_cursor.is_none() {
                break;
            }
            cursor = connection.page_info.end_cursor;
            page += 1;
        }
        Ok(commits)
    }

    async fn fetch_pull_requests(
        &self,
        until: NaiveDate,
        mut cb: PageProgress<'_>,
    ) -> Result<Vec<PullRequest>> {
        let graphql = query::with_pull_request_fields(query::PULL_REQUEST_SEARCH);
        let search = format!("repo:{}/{} is:pr created:<={}", self.owner, self.name, until);

        let mut page = 1;
        let mut cursor = None;
        let mut pull_requests: Vec<PullRequest> = vec![];
        loop {
            cb(page);
            let mut variables = Map::new();
            variables.insert("search".into(), json!(search));
            variables.insert("pageSize".into(), json!(PAGE_SIZE));
            if let Some(cursor) = &cursor {
                variables.insert("cursor".into(), json!(cursor));
            }
            let data: SearchData = self.query(&graphql, variables).await?;

            let connection = data.search;
            pull_requests.extend(connection.nodes.into_iter().map(PullRequest::from));
            if !connection.page_info.has_next_page || connection.page_info.end_cursor.is_none() {
                break;
            }
            cursor = connection.page_info.end_cursor;
            page += 1;
        }
        Ok(pull_requests)
    }
}

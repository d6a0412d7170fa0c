use crate::error::{ReportError, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;

/// Where the pull requests linked to issues come from.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestSource {
    /// Search the repository for pull requests created up to the sprint end.
    #[default]
    Search,
    /// Use the pull requests GitHub associates with each fetched commit.
    Commit,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReportConfig {
    pub owner: String,
    pub repository: String,
    pub milestone: u64,
    pub default_team: String,
    #[serde(default)]
    pub label_teams: IndexMap<String, String>,
    #[serde(default)]
    pub mail_teams: IndexMap<String, String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_commit: Option<String>,
    #[serde(default)]
    pub end_commit: Option<String>,
    #[serde(default)]
    pub blacklist: Vec<String>,
    #[serde(default)]
    pub whitelist: Vec<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub pull_requests: PullRequestSource,
}

// Create
impl ReportConfig {
    pub fn from_config(path: &str) -> Result<Self> {
        let json_str = fs::read_to_string(path)
            .map_err(|e| ReportError::config(format!("cannot read `{}`: {}", path, e)))?;
        Self::parse(&json_str)
    }
}

// Parser
impl ReportConfig {
    fn parse(json_str: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json_str)?;
        config.start_commit = non_blank(config.start_commit);
        config.end_commit = non_blank(config.end_commit);
        config.branch = non_blank(config.branch);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            return Err(ReportError::config("'owner' must not be empty"));
        }
        if self.repository.trim().is_empty() {
            return Err(ReportError::config("'repository' must not be empty"));
        }
        if self.default_team.trim().is_empty() {
            return Err(ReportError::config("'defaultTeam' must not be empty"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ReportError::config(format!(
                    "'startDate' {} is after 'endDate' {}",
                    start, end
                )));
            }
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

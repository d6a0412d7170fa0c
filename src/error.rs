use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

/// Fatal failures of a report run. Anything recoverable is folded into the
/// report as a warning instead.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Missing credential or an invalid configuration file.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("milestone #{milestone} not found in {owner}/{repository}")]
    MilestoneNotFound {
        owner: String,
        repository: String,
        milestone: u64,
    },

    #[error("milestone #{milestone} has no issues")]
    MilestoneEmpty { milestone: u64 },

    #[error("branch '{branch}' not found")]
    BranchNotFound { branch: String },

    /// A configured start/end commit never showed up in the branch history.
    #[error("commit {oid} not found in history of branch '{branch}'")]
    BoundaryNotFound { oid: String, branch: String },

    #[error("no commits in range to derive the sprint window from, configure startDate and endDate")]
    EmptyHistory,

    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    #[error("GitHub GraphQL error: {0}")]
    GraphQl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub fn config(message: impl ToString) -> Self {
        Self::Configuration(message.to_string())
    }
}

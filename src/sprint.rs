use crate::analyze::window::truncate_history;
use crate::analyze::{LabelFilter, Linker, SprintWindow};
use crate::error::{ReportError, Result};
use crate::github::{HistoryQuery, RecordFetcher};
use crate::model::{Commit, Milestone, PullRequest, PullRequestSource, ReportConfig, Repository};
use crate::report::{MarkdownReport, SprintReport};
use crate::utils::{page_progress, MultiProgressNew};
use indicatif::MultiProgress;
use tracing::info;

/// Raw records of one sprint, as fetched.
#[derive(Debug, Clone)]
pub struct SprintRecords {
    pub repository: Repository,
    pub milestone: Milestone,
    pub branch: String,
    /// Commit range, newest first.
    pub commits: Vec<Commit>,
    /// Independently searched pull requests, empty when they come with the commits.
    pub pull_requests: Vec<PullRequest>,
    pub window: SprintWindow,
}

pub async fn fetch_records<F: RecordFetcher>(
    fetcher: &F,
    config: &ReportConfig,
    multi_progress: &MultiProgress,
) -> Result<SprintRecords> {
    let milestone_pb = multi_progress.add_spinner("Fetch milestone ...");
    let (repository, milestone) = fetcher
        .fetch_milestone(config.milestone, page_progress(&milestone_pb, "milestone issues"))
        .await?;
    milestone_pb.finish_with_message(format!(
        "✅ Completed fetch milestone `{}` (find {} issues)",
        milestone.title,
        milestone.issues.len()
    ));
    info!("Milestone `{}` holds {} issues", milestone.title, milestone.issues.len());

    let branch = config
        .branch
        .clone()
        .or_else(|| repository.default_branch.clone())
        .ok_or_else(|| {
            ReportError::config("no branch configured and the repository has no default branch")
        })?;

    let commits_pb = multi_progress.add_spinner(format!("Read history of `{}` ...", branch));
    let history = HistoryQuery {
        branch: branch.clone(),
        since: config.start_date,
        until: config.end_date,
        stop_at: config.start_commit.clone(),
        with_pull_requests: config.pull_requests == PullRequestSource::Commit,
    };
    let commits = fetcher
        .fetch_commit_history(&history, page_progress(&commits_pb, "commits"))
        .await?;
    let commits = truncate_history(
        commits,
        config.start_commit.as_deref(),
        config.end_commit.as_deref(),
        &branch,
    )?;
    commits_pb.finish_with_message(format!(
        "✅ Completed read history of `{}` (find {} commits)",
        branch,
        commits.len()
    ));
    info!("Branch `{}` has {} commits in range", branch, commits.len());

    let window = SprintWindow::resolve(config.start_date, config.end_date, &commits)?;

    let pull_requests = match config.pull_requests {
        PullRequestSource::Search => {
            let pb = multi_progress.add_spinner("Fetch pull requests ...");
            let pull_requests = fetcher
                .fetch_pull_requests(window.end, page_progress(&pb, "pull requests"))
                .await?;
            pb.finish_with_message(format!(
                "✅ Completed fetch pull requests (find {} pull requests)",
                pull_requests.len()
            ));
            pull_requests
        }
        PullRequestSource::Commit => vec![],
    };

    Ok(SprintRecords {
        repository,
        milestone,
        branch,
        commits,
        pull_requests,
        window,
    })
}

/// Links, attributes and filters the records and renders the Markdown report.
pub fn render_report(records: &SprintRecords, config: &ReportConfig) -> String {
    let linker = Linker::new(config, &records.milestone.issues);
    let commits = linker.annotate_commits(&records.commits);
    let linkage = linker.link(&commits, &records.pull_requests);
    let linkage = LabelFilter::new(config).apply(linkage);
    info!(
        "{} issues reported, {} excluded, {} commits not mapped to issues",
        linkage.issues.len(),
        linkage.excluded,
        linkage.unassignable.len()
    );

    let report = SprintReport {
        repository: &records.repository,
        milestone: &records.milestone,
        window: records.window,
        branch: &records.branch,
        commits: &records.commits,
        linkage: &linkage,
    };
    report.render_markdown()
}

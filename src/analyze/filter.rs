use crate::analyze::model::Linkage;
use crate::model::{Issue, ReportConfig};
use tracing::debug;

/// Label based exclusion (blacklist) and inclusion (whitelist) of issues.
pub struct LabelFilter<'c> {
    blacklist: &'c [String],
    whitelist: &'c [String],
}

impl<'c> LabelFilter<'c> {
    pub fn new(config: &'c ReportConfig) -> Self {
        Self {
            blacklist: &config.blacklist,
            whitelist: &config.whitelist,
        }
    }

    pub fn keeps(&self, issue: &Issue) -> bool {
        if self.blacklist.iter().any(|label| issue.has_label(label)) {
            return false;
        }
        self.whitelist.is_empty() || self.whitelist.iter().any(|label| issue.has_label(label))
    }

    /// Builds a new issue list without the filtered issues and takes their
    /// pull request and commit counts off the totals.
    pub fn apply<'a>(&self, linkage: Linkage<'a>) -> Linkage<'a> {
        let Linkage {
            issues,
            unassignable,
            mut totals,
            mut excluded,
        } = linkage;

        let mut kept = Vec::with_capacity(issues.len());
        for issue in issues {
            if self.keeps(issue.issue) {
                kept.push(issue);
                continue;
            }
            debug!(
                "Issue #{} excluded by label filter ({} pull requests, {} commits)",
                issue.issue.number,
                issue.pull_requests.len(),
                issue.commits.len()
            );
            totals.pull_requests = totals.pull_requests.saturating_sub(issue.pull_requests.len());
            totals.commits = totals.commits.saturating_sub(issue.commits.len());
            excluded += 1;
        }

        Linkage {
            issues: kept,
            unassignable,
            totals,
            excluded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::linker::Linker;
    use crate::analyze::tests::{commit, issue, pull_request};
    use crate::model::tests::sample_config;
    use pretty_assertions::assert_eq;

    #[test]
    fn blacklist_and_whitelist_refine_each_other() {
        let mut config = sample_config();
        config.blacklist = vec!["invalid".to_string()];
        config.whitelist = vec!["bug".to_string(), "feature".to_string()];
        let filter = LabelFilter::new(&config);

        assert!(filter.keeps(&issue(1, &["bug"])));
        assert!(!filter.keeps(&issue(2, &["bug", "invalid"])));
        assert!(!filter.keeps(&issue(3, &["docs"])));
        assert!(!filter.keeps(&issue(4, &[])));

        config.whitelist.clear();
        let filter = LabelFilter::new(&config);
        assert!(filter.keeps(&issue(4, &[])));
    }

    #[test]
    fn removed_issue_counts_are_subtracted_once() {
        let config = sample_config();
        let issues = vec![issue(5, &["bug"]), issue(6, &["invalid"])];
        let linker = Linker::new(&config, &issues);
        let commits = vec![
            commit("a1", "fix #5", None),
            commit("b2", "fix #6", None),
            commit("c3", "close gh-6", None),
            commit("d4", "random text", None),
        ];
        let pull_requests = vec![
            pull_request("https://github.com/o/r/pull/1", "gh-5", &[]),
            pull_request("https://github.com/o/r/pull/2", "gh-6", &[]),
        ];
        let annotated = linker.annotate_commits(&commits);
        let linkage = linker.link(&annotated, &pull_requests);
        assert_eq!(linkage.totals.commits, 4);
        assert_eq!(linkage.totals.pull_requests, 2);

        let filter = LabelFilter::new(&config);
        let filtered = filter.apply(linkage);
        assert_eq!(filtered.issues.len(), 1);
        assert_eq!(filtered.issues[0].issue.number, 5);
        assert_eq!(filtered.totals.commits, 2);
        assert_eq!(filtered.totals.pull_requests, 1);
        assert_eq!(filtered.excluded, 1);

        // commits of kept issues plus unassignable ones add up to the total
        let per_issue: usize = filtered.issues.iter().map(|i| i.commits.len()).sum();
        assert_eq!(per_issue + filtered.unassignable.len(), filtered.totals.commits);

        let again = filter.apply(filtered.clone());
        assert_eq!(again, filtered);
    }

    #[test]
    fn whitelisted_out_issue_counts_are_subtracted() {
        let mut config = sample_config();
        config.blacklist.clear();
        config.whitelist = vec!["foo".to_string()];
        let issues = vec![issue(5, &["bug"]), issue(6, &["foo"])];
        let linker = Linker::new(&config, &issues);
        let commits = vec![
            commit("a1", "fix #5", None),
            commit("b2", "resolve #5", None),
            commit("c3", "fix #6", None),
        ];
        let pull_requests = vec![pull_request("https://github.com/o/r/pull/1", "gh-5", &[])];
        let annotated = linker.annotate_commits(&commits);
        let linkage = linker.link(&annotated, &pull_requests);

        let filtered = LabelFilter::new(&config).apply(linkage);
        assert_eq!(filtered.issues.len(), 1);
        assert_eq!(filtered.issues[0].issue.number, 6);
        assert_eq!(filtered.totals.commits, 1);
        assert_eq!(filtered.totals.pull_requests, 0);
        assert_eq!(filtered.excluded, 1);
    }

    #[test]
    fn both_lists_remove_several_issues_exactly() {
        let mut config = sample_config();
        config.blacklist = vec!["invalid".to_string()];
        config.whitelist = vec!["bug".to_string()];
        let issues = vec![
            issue(5, &["bug"]),
            issue(6, &["docs"]),
            issue(7, &["bug", "invalid"]),
        ];
        let linker = Linker::new(&config, &issues);
        let commits = vec![
            commit("a1", "fix #5", None),
            commit("b2", "fix #6", None),
            commit("c3", "fix #7", None),
            commit("d4", "close #7", None),
            commit("e5", "random text", None),
        ];
        let pull_requests = vec![
            pull_request("https://github.com/o/r/pull/1", "gh-6", &[]),
            pull_request("https://github.com/o/r/pull/2", "gh-7", &[]),
            pull_request("https://github.com/o/r/pull/3", "gh-5", &[]),
        ];
        let annotated = linker.annotate_commits(&commits);
        let linkage = linker.link(&annotated, &pull_requests);
        assert_eq!(linkage.totals.commits, 5);
        assert_eq!(linkage.totals.pull_requests, 3);

        let filtered = LabelFilter::new(&config).apply(linkage);
        let kept = filtered
            .issues
            .iter()
            .map(|i| i.issue.number)
            .collect::<Vec<_>>();
        assert_eq!(kept, vec![5]);
        assert_eq!(filtered.totals.commits, 2);
        assert_eq!(filtered.totals.pull_requests, 1);
        assert_eq!(filtered.excluded, 2);

        let per_issue: usize = filtered.issues.iter().map(|i| i.commits.len()).sum();
        assert_eq!(per_issue + filtered.unassignable.len(), filtered.totals.commits);
    }
}

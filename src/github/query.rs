pub const PAGE_SIZE: u32 = 100;

pub const MILESTONE_ISSUES: &str = r#"
query($owner: String!, $name: String!, $milestone: Int!, $pageSize: Int!, $cursor: String) {
  repository(owner: $owner, name: $name) {
    url
    defaultBranchRef {
      name
    }
    milestone(number: $milestone) {
      title
      url
      issues(first: $pageSize, after: $cursor) {
        pageInfo {
          hasNextPage
          endCursor
        }
        nodes {
          url
          title
          state
          number
          labels(first: 20) {
            nodes {
              name
            }
          }
        }
      }
    }
  }
}
"#;

pub const COMMIT_HISTORY: &str = r#"
query($owner: String!, $name: String!, $qualifiedName: String!, $pageSize: Int!, $cursor: String,
      $since: GitTimestamp, $until: GitTimestamp, $withPullRequests: Boolean!) {
  repository(owner: $owner, name: $name) {
    ref(qualifiedName: $qualifiedName) {
      target {
        ... on Commit {
          history(first: $pageSize, after: $cursor, since: $since, until: $until) {
            pageInfo {
              hasNextPage
              endCursor
            }
            nodes {
              messageHeadline
              message
              oid
              abbreviatedOid
              url
              committedDate
              author {
                email
              }
              associatedPullRequests(first: 5) @include(if: $withPullRequests) {
                nodes {
                  ...PullRequestFields
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

pub const PULL_REQUEST_SEARCH: &str = r#"
query($search: String!, $pageSize: Int!, $cursor: String) {
  search(query: $search, type: ISSUE, first: $pageSize, after: $cursor) {
    pageInfo {
      hasNextPage
      endCursor
    }
    nodes {
      ... on PullRequest {
        ...PullRequestFields
      }
    }
  }
}
"#;

pub const PULL_REQUEST_FIELDS: &str = r#"
fragment PullRequestFields on PullRequest {
  url
  state
  mergedAt
  headRefName
  closingIssuesReferences(first: 10) {
    nodes {
      number
    }
  }
}
"#;

/// Appends the shared pull request fragment to a query using it.
pub fn with_pull_request_fields(query: &str) -> String {
    format!("{}{}", query, PULL_REQUEST_FIELDS)
}

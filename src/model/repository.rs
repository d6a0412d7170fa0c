#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    pub url: String,
    pub default_branch: Option<String>,
}

// New
impl Repository {
    pub fn new(
        owner: impl ToString,
        name: impl ToString,
        url: impl ToString,
        default_branch: Option<String>,
    ) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            default_branch,
        }
    }
}

impl Repository {
    /// `owner/name`, as shown in the report header and used in search queries.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

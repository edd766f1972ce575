use async_trait::async_trait;
use derive_more::Constructor;
use thiserror::Error;

pub use crate::classifier::ChangedFile;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request failed: {0}")]
    Request(#[source] anyhow::Error),
    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One entry of a repository commit listing: the committer's display name
/// and the URL of the commit's own detail document.
#[derive(Debug, Clone, Constructor)]
pub struct CommitSummary {
    pub committer: String,
    pub detail_url: String,
}

/// The hosting platform endpoints the collector needs.
///
/// Malformed commit records are already dropped by implementations; a
/// listing payload that is not a list at all surfaces as
/// [`Error::UnexpectedPayload`].
#[async_trait]
pub trait CommitClient: Send + Sync {
    /// Names of all repositories of an organization.
    async fn org_repos(&self, organization: &str) -> Result<Vec<String>>;

    /// Head commit SHA of every branch of a repository.
    async fn branch_heads(&self, owner: &str, project: &str) -> Result<Vec<String>>;

    /// Commits reachable from `branch_sha` since the `since` timestamp.
    async fn commits_since(
        &self,
        owner: &str,
        project: &str,
        branch_sha: &str,
        since: &str,
    ) -> Result<Vec<CommitSummary>>;

    /// The changed-file list of a single commit.
    async fn commit_detail(&self, detail_url: &str) -> Result<Vec<ChangedFile>>;
}

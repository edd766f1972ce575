mod builder;
mod fetch;
mod payload;

pub use builder::GithubClientBuilder;

use async_trait::async_trait;
use fetch::{grab_json, Credentials};
use log::warn;
use reqwest::Client;
use serde_json::Value;
use testcommits::api::{ChangedFile, CommitClient, CommitSummary, Error, Result};

/// GitHub REST v3 client. Build one through [`GithubClientBuilder`].
pub struct GithubClient {
    pub(crate) client: Client,
    pub(crate) github_url: String,
    pub(crate) auth: Option<Credentials>,
}

impl GithubClient {
    fn org_repos_url(&self, organization: &str) -> String {
        format!("{}/orgs/{}/repos", self.github_url, organization)
    }

    fn branches_url(&self, owner: &str, project: &str) -> String {
        format!("{}/repos/{}/{}/branches", self.github_url, owner, project)
    }

    fn commits_url(&self, owner: &str, project: &str) -> String {
        format!("{}/repos/{}/{}/commits", self.github_url, owner, project)
    }

    async fn grab_list(&self, url: &str, params: &[(&str, &str)], what: &str) -> Result<Vec<Value>> {
        let value = grab_json(&self.client, self.auth.as_ref(), url, params).await?;
        match value {
            Value::Array(items) => Ok(items),
            other => Err(Error::UnexpectedPayload(format!(
                "expected a list of {}, got {}",
                what, other
            ))),
        }
    }
}

#[async_trait]
impl CommitClient for GithubClient {
    async fn org_repos(&self, organization: &str) -> Result<Vec<String>> {
        let items = self
            .grab_list(&self.org_repos_url(organization), &[], "repositories")
            .await?;
        let repos: Vec<payload::Repo> =
            serde_json::from_value(Value::Array(items)).map_err(anyhow::Error::from)?;
        Ok(repos.into_iter().map(|repo| repo.name).collect())
    }

    async fn branch_heads(&self, owner: &str, project: &str) -> Result<Vec<String>> {
        let items = self
            .grab_list(&self.branches_url(owner, project), &[], "branches")
            .await?;
        let branches: Vec<payload::Branch> =
            serde_json::from_value(Value::Array(items)).map_err(anyhow::Error::from)?;
        Ok(branches.into_iter().map(|branch| branch.commit.sha).collect())
    }

    async fn commits_since(
        &self,
        owner: &str,
        project: &str,
        branch_sha: &str,
        since: &str,
    ) -> Result<Vec<CommitSummary>> {
        let params = [("since", since), ("sha", branch_sha)];
        let items = self
            .grab_list(&self.commits_url(owner, project), &params, "commits")
            .await?;
        let mut commits = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<payload::CommitSummary>(item) {
                Ok(summary) => commits.push(summary.into()),
                Err(err) => warn!(
                    "Skipping a malformed commit record of {}/{}: {}",
                    owner, project, err
                ),
            }
        }
        Ok(commits)
    }

    async fn commit_detail(&self, detail_url: &str) -> Result<Vec<ChangedFile>> {
        let value = grab_json(&self.client, self.auth.as_ref(), detail_url, &[]).await?;
        if !value.is_object() {
            return Err(Error::UnexpectedPayload(format!(
                "expected a commit object, got {}",
                value
            )));
        }
        let detail: payload::CommitDetail =
            serde_json::from_value(value).map_err(anyhow::Error::from)?;
        Ok(detail.files.into_iter().map(ChangedFile::from).collect())
    }
}

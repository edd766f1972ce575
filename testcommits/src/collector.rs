use crate::api::{CommitClient, CommitSummary, Error, Result};
use crate::commit::Commit;
use crate::counter::{CommitStats, TestCommitCounter};
use log::{debug, warn};
use std::collections::HashMap;

/// A branch listing that comes back as something other than a list is
/// usually a hiccup on the API side; give up after this many attempts.
const MAX_BRANCH_ATTEMPTS: u32 = 3;

/// One repository being counted.
///
/// Loading runs strictly in sequence: branches, then the commit listing per
/// branch head, then every individual commit's detail.
pub struct Project {
    pub owner: String,
    pub name: String,
    pub stats: TestCommitCounter,
    pub branch_shas: Vec<String>,
    pub commits: Vec<CommitSummary>,
    restrict_to_known_users: bool,
}

impl Project {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, restrict_to_known_users: bool) -> Self {
        Project {
            owner: owner.into(),
            name: name.into(),
            stats: TestCommitCounter::default(),
            branch_shas: Vec::new(),
            commits: Vec::new(),
            restrict_to_known_users,
        }
    }

    pub async fn load<C: CommitClient>(
        &mut self,
        client: &C,
        since: &str,
        users: &mut UserStats,
    ) -> Result<()> {
        debug!("Loading project {}...", self.name);
        self.branch_shas = self.load_branches(client).await?;
        self.commits = self.load_project_commits(client, since).await?;
        self.load_individual_commits(client, users).await
    }

    async fn load_branches<C: CommitClient>(&self, client: &C) -> Result<Vec<String>> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match client.branch_heads(&self.owner, &self.name).await {
                Err(Error::UnexpectedPayload(payload)) if attempts < MAX_BRANCH_ATTEMPTS => {
                    warn!(
                        "Branch listing of {} was not a list ({}), retrying",
                        self.name, payload
                    );
                }
                other => return other,
            }
        }
    }

    async fn load_project_commits<C: CommitClient>(
        &self,
        client: &C,
        since: &str,
    ) -> Result<Vec<CommitSummary>> {
        // A commit reachable from two branch heads is listed, and later
        // counted, twice.
        let mut commits = Vec::new();
        for sha in &self.branch_shas {
            commits.extend(
                client
                    .commits_since(&self.owner, &self.name, sha, since)
                    .await?,
            );
        }
        Ok(commits)
    }

    async fn load_individual_commits<C: CommitClient>(
        &mut self,
        client: &C,
        users: &mut UserStats,
    ) -> Result<()> {
        for summary in &self.commits {
            if self.restrict_to_known_users && !users.contains(&summary.committer) {
                continue;
            }
            let files = client.commit_detail(&summary.detail_url).await?;
            let commit = Commit::new(summary.committer.clone(), &files);
            if commit.is_testcommit() {
                debug!(
                    "{}: commit by {} touches {} test file(s)",
                    self.name, commit.user, commit.num_testfiles_changed
                );
            }
            users.get_or_create(&commit.user).add_commit(&commit);
            self.stats.add_commit(&commit);
        }
        Ok(())
    }

    /// Inactive projects are dropped from the report entirely.
    pub fn is_active(&self) -> bool {
        self.stats.num_commits > 0
    }
}

impl CommitStats for Project {
    fn name(&self) -> &str {
        &self.name
    }

    fn counter(&self) -> &TestCommitCounter {
        &self.stats
    }
}

/// Per-committer aggregate, keyed by display name.
pub struct User {
    pub name: String,
    pub stats: TestCommitCounter,
}

impl User {
    fn new(name: String) -> Self {
        User {
            name,
            stats: TestCommitCounter::default(),
        }
    }

    pub fn add_commit(&mut self, commit: &Commit) {
        self.stats.add_commit(commit);
    }
}

impl CommitStats for User {
    fn name(&self) -> &str {
        &self.name
    }

    fn counter(&self) -> &TestCommitCounter {
        &self.stats
    }
}

/// The committer-name-to-user map threaded through every project load.
#[derive(Default)]
pub struct UserStats {
    users: HashMap<String, User>,
}

impl UserStats {
    pub fn contains(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    pub fn get_or_create(&mut self, name: &str) -> &mut User {
        self.users
            .entry(name.to_string())
            .or_insert_with_key(|key| User::new(key.clone()))
    }

    pub fn into_users(self) -> Vec<User> {
        self.users.into_values().collect()
    }
}

use serde::Deserialize;
use testcommits::api::ChangedFile;

#[derive(Deserialize, Debug)]
pub struct Repo {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct Branch {
    pub commit: BranchCommit,
}

#[derive(Deserialize, Debug)]
pub struct BranchCommit {
    pub sha: String,
}

#[derive(Deserialize, Debug)]
pub struct CommitSummary {
    pub commit: CommitInfo,
    pub url: String,
}

#[derive(Deserialize, Debug)]
pub struct CommitInfo {
    pub committer: Committer,
}

#[derive(Deserialize, Debug)]
pub struct Committer {
    pub name: String,
}

impl From<CommitSummary> for testcommits::api::CommitSummary {
    fn from(summary: CommitSummary) -> Self {
        testcommits::api::CommitSummary::new(summary.commit.committer.name, summary.url)
    }
}

/// Detail of a single commit. A 401 error body (after the retry) carries no
/// `files` key; an empty list keeps that commit counted as untested, like
/// any other commit without test files.
#[derive(Deserialize, Debug)]
pub struct CommitDetail {
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

#[derive(Deserialize, Debug)]
pub struct FileEntry {
    pub filename: String,
    pub patch: Option<String>,
}

impl From<FileEntry> for ChangedFile {
    fn from(file: FileEntry) -> Self {
        ChangedFile::new(file.filename, file.patch)
    }
}

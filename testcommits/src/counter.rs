use crate::commit::Commit;
use std::cmp::Ordering;

/// Running totals for one project or one committer.
///
/// `num_testcommits` can never exceed `num_commits`: both only grow through
/// [`TestCommitCounter::add_commit`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TestCommitCounter {
    pub num_commits: u32,
    pub num_testcommits: u32,
    pub testfiles_changed: u32,
}

impl TestCommitCounter {
    pub fn add_commit(&mut self, commit: &Commit) {
        self.num_commits += 1;
        if commit.is_testcommit() {
            self.num_testcommits += 1;
            self.testfiles_changed += commit.num_testfiles_changed;
        }
    }

    /// Percentage of test commits, rendered as `(NN%)`, floored.
    ///
    /// Empty when there are no test commits: no `(0%)` noise in the report.
    pub fn percentage(&self) -> String {
        if self.num_testcommits == 0 {
            return String::new();
        }
        format!("({}%)", self.bare_percentage())
    }

    /// The percentage as a bare number string, for the JSON export.
    pub fn bare_percentage(&self) -> String {
        if self.num_testcommits == 0 {
            return String::new();
        }
        (100 * self.num_testcommits / self.num_commits).to_string()
    }
}

/// Report order: most test commits first, fewer total commits breaking ties
/// (the smaller project earned the same count with less activity).
pub fn ranking(a: &TestCommitCounter, b: &TestCommitCounter) -> Ordering {
    b.num_testcommits
        .cmp(&a.num_testcommits)
        .then_with(|| a.num_commits.cmp(&b.num_commits))
}

/// What the report needs from a ranked item, whether project or committer.
pub trait CommitStats {
    fn name(&self) -> &str;
    fn counter(&self) -> &TestCommitCounter;
}

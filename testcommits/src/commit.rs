use crate::classifier::{is_testfile, ChangedFile};

/// One commit, reduced to what the counters need: who made it and how many
/// of its changed files were test-related.
#[derive(Debug, Clone)]
pub struct Commit {
    pub user: String,
    pub num_testfiles_changed: u32,
}

impl Commit {
    pub fn new(user: impl Into<String>, files: &[ChangedFile]) -> Self {
        let num_testfiles_changed = files.iter().filter(|file| is_testfile(file)).count() as u32;
        Commit {
            user: user.into(),
            num_testfiles_changed,
        }
    }

    pub fn is_testcommit(&self) -> bool {
        self.num_testfiles_changed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_testfiles() {
        let files = vec![
            ChangedFile::new("README.txt".to_string(), None),
            ChangedFile::new("myproject/tests.py".to_string(), None),
        ];
        let commit = Commit::new("Reinout", &files);
        assert_eq!(commit.num_testfiles_changed, 1);
        assert!(commit.is_testcommit());
    }

    #[test]
    fn no_testfiles_is_no_testcommit() {
        let files = vec![ChangedFile::new("README.txt".to_string(), None)];
        let commit = Commit::new("Reinout", &files);
        assert!(!commit.is_testcommit());
    }
}

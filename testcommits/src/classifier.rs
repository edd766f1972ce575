use derive_more::Constructor;

/// A changed file from a commit detail payload.
#[derive(Debug, Clone, Constructor)]
pub struct ChangedFile {
    pub filename: String,
    pub patch: Option<String>,
}

/// Decides whether a changed file counts as test-related.
///
/// Rule order matters: the `testsettings.py` exclusion short-circuits
/// everything else.
pub fn is_testfile(file: &ChangedFile) -> bool {
    if file.filename.contains("testsettings.py") {
        // Almost always has nothing to do with an added test.
        return false;
    }
    if file.filename.contains("test") {
        return true;
    }
    if file.filename.ends_with(".rst") || file.filename.ends_with(".txt") {
        // Possible doctest.
        if file.patch.as_deref().unwrap_or("").contains(">>>") {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(filename: &str, patch: Option<&str>) -> ChangedFile {
        ChangedFile::new(filename.to_string(), patch.map(String::from))
    }

    #[test]
    fn test_in_path_is_testfile() {
        assert!(is_testfile(&file("myproject/tests.py", None)));
        assert!(is_testfile(&file("myproject/test_thingy.js", None)));
    }

    #[test]
    fn testsettings_is_never_a_testfile() {
        assert!(!is_testfile(&file("myproject/testsettings.py", None)));
        // The exclusion wins even with a doctest-looking patch.
        assert!(!is_testfile(&file("testsettings.py", Some(">>> 1 + 1"))));
    }

    #[test]
    fn rst_with_doctest_marker_is_testfile() {
        assert!(is_testfile(&file("README.rst", Some("+    >>> thingy()"))));
        assert!(is_testfile(&file("docs/usage.txt", Some(">>> 2"))));
    }

    #[test]
    fn rst_without_doctest_marker_is_not() {
        assert!(!is_testfile(&file("README.rst", Some("just prose"))));
        assert!(!is_testfile(&file("README.rst", None)));
    }

    #[test]
    fn regular_file_is_not_a_testfile() {
        assert!(!is_testfile(&file("myproject/models.py", None)));
    }
}

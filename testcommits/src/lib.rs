//! Test commit counting
//!
//! # Overview
//!
//! Estimates, per repository and per committer, how much recent development
//! activity included test-file changes.
//! A commit counts as a "test commit" when at least one of its changed files
//! is classified as test-related: its path contains `test`, or it is a
//! `.rst`/`.txt` file whose patch carries a doctest marker (`>>>`).
//!
//! The crate holds the pure model: the classifier, the per-commit wrapper,
//! the counter with its ranking order, and the project/user collector that
//! drives a [`api::CommitClient`] implementation. All network I/O lives
//! behind that trait.

pub mod classifier;
pub mod commit;
pub mod counter;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "collector")]
pub mod collector;

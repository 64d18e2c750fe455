//! Membership difference: lines of one text that occur nowhere in another.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::domain::errors::FileAccessError;
use crate::infra::fs::read_text;

/// Lines of the file at `left` whose literal text appears nowhere in the file at `right`.
///
/// Both files are read in full before any comparison, so a missing or unreadable
/// file yields an error and no partial result.
pub fn difference(left: &Path, right: &Path) -> Result<Vec<String>, FileAccessError> {
    let read = |path: &Path| {
        read_text(path).map_err(|source| FileAccessError {
            left: left.to_path_buf(),
            right: right.to_path_buf(),
            failed: path.to_path_buf(),
            source,
        })
    };

    let candidates = read(left)?;
    let reference = read(right)?;
    let missing = difference_text(&candidates, &reference);

    tracing::info!(
        left = %left.display(),
        right = %right.display(),
        missing = missing.len(),
        "computed file difference"
    );
    Ok(missing)
}

/// In-memory form of [`difference`].
///
/// Each line of `left` is matched verbatim as a substring of the whole of `right`;
/// no character in a line has special meaning. Empty lines always match.
pub fn difference_text(left: &str, right: &str) -> Vec<String> {
    left.lines()
        .filter(|line| !right.contains(*line))
        .map(str::to_owned)
        .collect()
}

/// Run several independent differences in parallel, one result per pair in input order.
pub fn difference_batch(
    pairs: &[(PathBuf, PathBuf)],
) -> Vec<Result<Vec<String>, FileAccessError>> {
    pairs
        .par_iter()
        .map(|(left, right)| difference(left, right))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reports_lines_absent_from_other_text() {
        assert_eq!(difference_text("x\ny\nz", "y and w"), vec!["x", "z"]);
    }

    #[test]
    fn matching_is_substring_not_positional() {
        assert_eq!(
            difference_text("alpha\nbeta", "gamma\nalphabeta"),
            Vec::<String>::new()
        );
        assert_eq!(
            difference_text("alpha\nbeta", "gamma\nalphabet"),
            vec!["beta"]
        );
    }

    #[test]
    fn pattern_characters_are_literal() {
        assert_eq!(difference_text("a.c\n[x]\n.*", "abc [x]"), vec!["a.c", ".*"]);
    }

    #[test]
    fn duplicates_are_reported_each_time_and_empty_lines_never() {
        assert_eq!(difference_text("q\n\nq\nr", "r"), vec!["q", "q"]);
    }

    #[test]
    fn reads_both_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let left = dir.path().join("a.txt");
        let right = dir.path().join("b.txt");
        fs::write(&left, "x\ny\nz\n")?;
        fs::write(&right, "y and w")?;

        assert_eq!(difference(&left, &right)?, vec!["x", "z"]);
        Ok(())
    }

    #[test]
    fn missing_file_names_both_paths() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let left = dir.path().join("a.txt");
        let right = dir.path().join("missing.txt");
        fs::write(&left, "x")?;

        let err = difference(&left, &right).unwrap_err();
        assert_eq!(err.failed, right);
        let message = err.to_string();
        assert!(message.contains("a.txt"));
        assert!(message.contains("missing.txt"));
        Ok(())
    }

    #[test]
    fn missing_left_file_fails_before_reading_right() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let left = dir.path().join("gone.txt");
        let right = dir.path().join("also-gone.txt");

        let err = difference(&left, &right).unwrap_err();
        assert_eq!(err.failed, left);
        Ok(())
    }

    #[test]
    fn batch_preserves_pair_order() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "one\ntwo")?;
        fs::write(&b, "two\nthree")?;

        let results = difference_batch(&[
            (a.clone(), b.clone()),
            (b.clone(), a.clone()),
            (a.clone(), dir.path().join("nope.txt")),
        ]);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &vec!["one".to_string()]);
        assert_eq!(results[1].as_ref().unwrap(), &vec!["three".to_string()]);
        assert!(results[2].is_err());
        Ok(())
    }
}

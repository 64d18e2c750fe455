//! Whole-text transformations: line sorting and word capitalization.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::infra::config::Config;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+").expect("word pattern compiles"));

/// Knobs for [`sort_lines_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOptions {
    /// Remove empty lines after sorting instead of keeping them in place.
    pub drop_empty_lines: bool,
}

impl SortOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            drop_empty_lines: config.sort.drop_empty_lines(),
        }
    }
}

/// Sort lines by code point order, keeping duplicates and empty lines.
pub fn sort_lines(text: &str) -> String {
    sort_lines_with(text, SortOptions::default())
}

pub fn sort_lines_with(text: &str, options: SortOptions) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    lines.sort();
    if options.drop_empty_lines {
        lines.retain(|line| !line.is_empty());
    }
    lines.join("\n")
}

/// Capitalize every run of ASCII letters, leaving digits and punctuation alone.
///
/// `"hello WORLD foo-bar"` becomes `"Hello World Foo-Bar"`.
pub fn capitalize_words(text: &str) -> String {
    WORD.replace_all(text, |caps: &Captures<'_>| capitalize(&caps[0]))
        .into_owned()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

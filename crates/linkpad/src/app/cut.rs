//! Column extraction in the spirit of `cut -f`.

use crate::app::range::parse_num_range;
use crate::domain::errors::{CutError, ParseError};

/// Result of a successful cut, with the malformed-data hint if one was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutReport {
    pub text: String,
    /// 1-based line holding the fewest fields when that line is not the last one
    /// and the rows are ragged.
    pub suspect_line: Option<usize>,
}

/// Keep only the fields named by `fields` from every line of `text`.
///
/// Selected fields are re-joined with `separator` and lines with `\n`. Field order
/// and duplication follow the range specification exactly.
pub fn cut(text: &str, fields: &str, separator: &str) -> Result<String, CutError> {
    cut_with_report(text, fields, separator).map(|report| report.text)
}

/// Like [`cut`] but falls back to the unchanged input when the cut cannot be made.
///
/// The failure is logged at `warn` level.
pub fn cut_or_original(text: &str, fields: &str, separator: &str) -> String {
    match cut(text, fields, separator) {
        Ok(selected) => selected,
        Err(err) => {
            tracing::warn!(%err, fields, "cut failed, leaving text unchanged");
            text.to_owned()
        }
    }
}

/// Perform the cut and return the malformed-data hint alongside the text.
pub fn cut_with_report(text: &str, fields: &str, separator: &str) -> Result<CutReport, CutError> {
    if separator.is_empty() {
        return Err(CutError::EmptySeparator);
    }

    let lines: Vec<&str> = text.lines().collect();
    let counts: Vec<usize> = lines
        .iter()
        .map(|line| line.split(separator).count())
        .collect();
    let suspect_line = find_suspect_line(&counts);

    let indices = parse_num_range(fields)?;
    if indices.contains(&0) {
        return Err(CutError::ZeroField);
    }

    let Some(requested) = indices.max() else {
        return Err(CutError::Parse(ParseError::Empty));
    };

    let Some((shortest, min_fields)) = shortest_row(&counts) else {
        return Ok(CutReport {
            text: String::new(),
            suspect_line: None,
        });
    };

    if requested > min_fields {
        return Err(CutError::RangeOutOfBounds {
            requested,
            available: min_fields,
            line: shortest + 1,
        });
    }

    let mut output = Vec::with_capacity(lines.len());
    for (number, line) in lines.iter().enumerate() {
        let columns: Vec<&str> = line.split(separator).collect();
        if columns.len() < requested {
            return Err(CutError::RangeOutOfBounds {
                requested,
                available: columns.len(),
                line: number + 1,
            });
        }
        let selected: Vec<&str> = indices.iter().map(|&index| columns[index - 1]).collect();
        output.push(selected.join(separator));
    }

    tracing::debug!(lines = output.len(), fields, "cut complete");
    Ok(CutReport {
        text: output.join("\n"),
        suspect_line,
    })
}

/// Index and field count of the first row with the fewest fields.
fn shortest_row(counts: &[usize]) -> Option<(usize, usize)> {
    counts
        .iter()
        .copied()
        .enumerate()
        .min_by_key(|(_, count)| *count)
}

/// 1-based line of the shortest row when rows are ragged and that row is not the last one.
fn find_suspect_line(counts: &[usize]) -> Option<usize> {
    let (shortest, min_fields) = shortest_row(counts)?;
    let max_fields = counts.iter().copied().max().unwrap_or(min_fields);
    (shortest + 1 != counts.len() && min_fields < max_fields).then(|| {
        tracing::warn!(
            line = shortest + 1,
            fields = min_fields,
            "data is probably malformed at this line"
        );
        shortest + 1
    })
}

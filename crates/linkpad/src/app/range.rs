//! Expansion of range specifications like `"1-3,5"` into field positions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::errors::ParseError;
use crate::domain::model::FieldIndexList;

/// Upper bound on any single position, keeping `"1-999999999"` from allocating wildly.
pub const MAX_FIELD_INDEX: usize = 100_000;

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<start>[0-9]+)(?:-(?P<end>[0-9]+))?$").expect("token pattern compiles")
});

/// Expand a comma separated range specification into an ordered list of positions.
///
/// Whitespace anywhere in `spec` is ignored. Each token is either a single number
/// (`"5"`) or an inclusive range (`"2-4"`); the expansions are concatenated in the
/// order written.
pub fn parse_num_range(spec: &str) -> Result<FieldIndexList, ParseError> {
    let compact: String = spec.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut indices = Vec::new();
    for token in compact.split(',') {
        indices.extend(parse_range(token)?);
    }

    tracing::debug!(spec, count = indices.len(), "expanded range specification");
    Ok(FieldIndexList::new(indices))
}

/// Expand a single token (no commas) into its inclusive sequence.
pub fn parse_range(token: &str) -> Result<Vec<usize>, ParseError> {
    if !token.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ParseError::MissingStart {
            token: token.to_owned(),
        });
    }

    let captures = TOKEN
        .captures(token)
        .ok_or_else(|| ParseError::MalformedToken {
            token: token.to_owned(),
        })?;

    let start = parse_index(&captures["start"])?;
    let end = match captures.name("end") {
        Some(end) => parse_index(end.as_str())?,
        None => start,
    };

    if end < start {
        return Err(ParseError::ReversedRange { start, end });
    }

    Ok((start..=end).collect())
}

fn parse_index(digits: &str) -> Result<usize, ParseError> {
    let too_large = || ParseError::IndexTooLarge {
        value: digits.to_owned(),
        max: MAX_FIELD_INDEX,
    };
    let value: usize = digits.parse().map_err(|_| too_large())?;
    if value > MAX_FIELD_INDEX {
        return Err(too_large());
    }
    Ok(value)
}

use insta::assert_snapshot;
use linkpad::app::{capitalize_words, cut, cut_or_original, parse_num_range, sort_lines};
use linkpad::domain::errors::{CutError, ParseError};
use proptest::prelude::*;

const PEOPLE: &str = "first,last,number
Braden,Carlson,2
Brynnli,Carlson,2
Arlee,Carlson,4
Troy,Rice,5
Hannah,Rice,4";

#[test]
fn cut_reorders_table_columns() {
    assert_snapshot!(cut(PEOPLE, "2,1", ",").unwrap(), @r"
    last,first
    Carlson,Braden
    Carlson,Brynnli
    Carlson,Arlee
    Rice,Troy
    Rice,Hannah
    ");
}

#[test]
fn cut_then_sort_then_capitalize() {
    let names = cut(PEOPLE, "1", ",").unwrap();
    let sorted = sort_lines(&names.to_lowercase());
    assert_snapshot!(capitalize_words(&sorted).replace('\n', " "), @"Arlee Braden Brynnli First Hannah Troy");
}

#[test]
fn cut_failure_modes_are_typed() {
    assert_eq!(
        cut(PEOPLE, "abc", ","),
        Err(CutError::Parse(ParseError::MissingStart {
            token: "abc".into()
        }))
    );
    assert!(matches!(
        cut(PEOPLE, "2-4", ","),
        Err(CutError::RangeOutOfBounds { requested: 4, .. })
    ));
    assert_eq!(cut_or_original(PEOPLE, "2-4", ","), PEOPLE);
}

fn range_tokens() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((1usize..200, 0usize..20), 1..8)
}

proptest! {
    #[test]
    fn parse_num_range_is_deterministic_and_ordered(tokens in range_tokens()) {
        let spec = tokens
            .iter()
            .map(|(start, len)| {
                if *len == 0 {
                    start.to_string()
                } else {
                    format!("{}-{}", start, start + len)
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        let expected: Vec<usize> = tokens
            .iter()
            .flat_map(|(start, len)| *start..=start + len)
            .collect();

        let first = parse_num_range(&spec).unwrap();
        let second = parse_num_range(&spec).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.into_vec(), expected);
    }

    #[test]
    fn sort_is_a_permutation(lines in prop::collection::vec("[a-zA-Z0-9 ]{1,8}", 0..30)) {
        let sorted = sort_lines(&lines.join("\n"));
        let mut output: Vec<&str> = sorted.lines().collect();
        let mut input: Vec<&str> = lines.iter().map(String::as_str).collect();

        prop_assert!(output.windows(2).all(|pair| pair[0] <= pair[1]));
        output.sort();
        input.sort();
        prop_assert_eq!(output, input);
    }

    #[test]
    fn identity_cut_round_trips(
        rows in prop::collection::vec(prop::collection::vec("[a-z]{1,4}", 3), 1..12)
    ) {
        let text = rows
            .iter()
            .map(|row| row.join(","))
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(cut(&text, "1-3", ",").unwrap(), text);
    }
}

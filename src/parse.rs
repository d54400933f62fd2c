//! Parsing of user-supplied values and comma-separated value lists.

use std::str::FromStr;

use crate::error::{Error, Result};

/// Parses a comma-separated list such as `"15, 10,20"`.
///
/// Entries are trimmed and empty entries are skipped. The first entry that
/// fails to parse is reported together with its position.
///
/// ```
/// use avl_explorer::parse::parse_list;
/// assert_eq!(parse_list::<i32>("3, 1,,2").unwrap(), vec![3, 1, 2]);
/// assert!(parse_list::<i32>("3, x").is_err());
/// ```
pub fn parse_list<T: FromStr>(text: &str) -> Result<Vec<T>> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| parse_token(token, index + 1))
        .collect()
}

/// Parses a single value, ignoring surrounding whitespace.
pub fn parse_value<T: FromStr>(text: &str) -> Result<T> {
    parse_token(text.trim(), 1)
}

fn parse_token<T: FromStr>(token: &str, position: usize) -> Result<T> {
    token.parse().map_err(|_| Error::MalformedInput {
        position,
        token: token.to_string(),
    })
}

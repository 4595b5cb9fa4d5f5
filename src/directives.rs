//! # Directive argument parsing
//!
//! `.data`, `.string`, `.extern` and `.entry` all take an argument list that
//! doesn't fit the five-slot [`crate::lexer::LexedLine`] (a `.data` line can
//! carry arbitrarily many values), so their arguments are parsed directly off
//! the raw line remainder instead.

use crate::error::ErrorKind;
use crate::lexer::normalise_commas;

/// Parse a comma-separated list, validating comma placement generically and
/// delegating each item to `parse_item`. `None` is returned (no list, no
/// error) for a blank remainder; callers that require at least one value
/// check that themselves (`.data` does, `.extern`/`.entry` don't).
fn parse_comma_list<T>(
    text: &str,
    parse_item: impl Fn(&str) -> Result<T, ErrorKind>,
) -> Result<Vec<T>, ErrorKind> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let normalised = normalise_commas(trimmed);
    let tokens: Vec<&str> = normalised.split_whitespace().collect();
    if tokens.first() == Some(&",") || tokens.last() == Some(&",") {
        return Err(ErrorKind::InvalidCommaPosition);
    }

    let mut items = Vec::new();
    let mut expect_value = true;
    for tok in tokens {
        if expect_value {
            if tok == "," {
                return Err(ErrorKind::InvalidCommaPosition);
            }
            items.push(parse_item(tok)?);
        } else if tok != "," {
            return Err(ErrorKind::CommaRequiredBetweenValues);
        }
        expect_value = !expect_value;
    }
    Ok(items)
}

/// `.data`'s value list: at least one signed integer, comma-separated.
pub fn parse_int_list(text: &str) -> Result<Vec<i32>, ErrorKind> {
    if text.trim().is_empty() {
        return Err(ErrorKind::MustProvideValuesToData);
    }
    parse_comma_list(text, |tok| {
        tok.parse::<i32>().map_err(|_| ErrorKind::DataNeedNumValue)
    })
}

/// `.extern`/`.entry`'s identifier list. An empty list is not an error here;
/// neither directive is documented as requiring at least one name.
pub fn parse_ident_list(text: &str) -> Result<Vec<String>, ErrorKind> {
    parse_comma_list(text, |tok| Ok(tok.to_string()))
}

/// Mask a value into the 10-bit two's-complement field shared by `.data`
/// words and instruction immediate operands.
pub fn truncate_to_field(value: i32) -> u16 {
    (value as u16) & 0x03FF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_list_is_an_error() {
        assert_eq!(parse_int_list("   "), Err(ErrorKind::MustProvideValuesToData));
    }

    #[test]
    fn well_formed_int_list_parses() {
        assert_eq!(parse_int_list("5, -6, 15").unwrap(), vec![5, -6, 15]);
    }

    #[test]
    fn leading_comma_is_invalid_position() {
        assert_eq!(parse_int_list(", 5"), Err(ErrorKind::InvalidCommaPosition));
    }

    #[test]
    fn trailing_comma_is_invalid_position() {
        assert_eq!(parse_int_list("5,"), Err(ErrorKind::InvalidCommaPosition));
    }

    #[test]
    fn double_comma_is_invalid_position() {
        assert_eq!(parse_int_list("5, , 6"), Err(ErrorKind::InvalidCommaPosition));
    }

    #[test]
    fn missing_comma_between_values() {
        assert_eq!(parse_int_list("5 6"), Err(ErrorKind::CommaRequiredBetweenValues));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        assert_eq!(parse_int_list("5, X"), Err(ErrorKind::DataNeedNumValue));
    }

    #[test]
    fn empty_ident_list_is_allowed() {
        assert_eq!(parse_ident_list("  ").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn ident_list_parses_several_names() {
        assert_eq!(parse_ident_list("A, B, C").unwrap(), vec!["A", "B", "C"]);
    }

    #[test]
    fn negative_value_truncates_to_ten_bit_twos_complement() {
        assert_eq!(truncate_to_field(-6), 1018);
    }
}

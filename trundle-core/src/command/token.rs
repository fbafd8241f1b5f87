//! Tokenizer and numeral parser

use heapless::Vec;

use super::message::CommandError;

/// Borrowed tokens of one line
pub type Tokens<'a, const N: usize> = Vec<&'a [u8], N>;

fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t')
}

/// Split `line` into `tokens`, replacing their previous content
///
/// Fails with [`CommandError::TooManyTokens`] when the line holds more
/// than `N` tokens; `tokens` then holds the first `N`.
pub fn tokenize<'a, const N: usize>(
    line: &'a [u8],
    tokens: &mut Tokens<'a, N>,
) -> Result<usize, CommandError> {
    tokens.clear();
    for token in line.split(|&b| is_separator(b)).filter(|t| !t.is_empty()) {
        tokens
            .push(token)
            .map_err(|_| CommandError::TooManyTokens)?;
    }
    Ok(tokens.len())
}

/// Parse an unsigned decimal numeral digit by digit
///
/// Parsing stops at the first non-digit byte, so `"12ab"` reads as 12 and
/// an empty or non-numeric token reads as 0. Overflow saturates.
pub fn parse_number(token: &[u8]) -> u32 {
    token
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |acc, &b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tokenize_collapses_separators() {
        let mut tokens: Tokens<'_, 4> = Vec::new();
        let count = tokenize(b"  forward \t10   200 ", &mut tokens).unwrap();
        assert_eq!(count, 3);
        assert_eq!(tokens[0], b"forward");
        assert_eq!(tokens[1], b"10");
        assert_eq!(tokens[2], b"200");
    }

    #[test]
    fn test_tokenize_empty_line() {
        let mut tokens: Tokens<'_, 4> = Vec::new();
        assert_eq!(tokenize(b"", &mut tokens), Ok(0));
        assert_eq!(tokenize(b"   ", &mut tokens), Ok(0));
    }

    #[test]
    fn test_tokenize_too_many() {
        let mut tokens: Tokens<'_, 2> = Vec::new();
        assert_eq!(
            tokenize(b"a b c", &mut tokens),
            Err(CommandError::TooManyTokens)
        );
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(b"0"), 0);
        assert_eq!(parse_number(b"4800"), 4800);
        assert_eq!(parse_number(b"007"), 7);
    }

    #[test]
    fn test_parse_number_stops_at_non_digit() {
        assert_eq!(parse_number(b"12ab"), 12);
        assert_eq!(parse_number(b"x12"), 0);
        assert_eq!(parse_number(b""), 0);
        assert_eq!(parse_number(b"-5"), 0);
    }

    #[test]
    fn test_parse_number_saturates() {
        assert_eq!(parse_number(b"4294967295"), u32::MAX);
        assert_eq!(parse_number(b"99999999999999"), u32::MAX);
    }

    proptest! {
        #[test]
        fn test_parse_number_matches_display(n in any::<u32>()) {
            let text = std::format!("{}", n);
            prop_assert_eq!(parse_number(text.as_bytes()), n);
        }
    }
}

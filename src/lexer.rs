use crate::token::{Token, TokenKind};
use crate::{exerr, ExResult};
use log::{debug, error};

/// Splits a string into [`Token`](Token)s, one at a time. The analyzer is an iterator that
/// passes once over its input. After a lexical error it does not yield anything anymore.
/// The invalid run reported in the error ends at the first whitespace or at the first
/// valid token, e.g., `1 + a b` reports `a` and `x+1` reports `x`.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use calcex::{LexicalAnalyzer, TokenKind};
/// let tokens = LexicalAnalyzer::new(" 23 ( 55 ) * + 66 ").parse_all()?;
/// assert_eq!(tokens.len(), 7);
/// assert_eq!(tokens[1].kind(), TokenKind::OpenParen);
/// #
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LexicalAnalyzer<'a> {
    remaining: &'a str,
    offset: usize,
    finished: bool,
}

impl<'a> LexicalAnalyzer<'a> {
    pub fn new(input: &'a str) -> Self {
        let trimmed = input.trim_start();
        LexicalAnalyzer {
            remaining: trimmed.trim_end(),
            offset: input.len() - trimmed.len(),
            finished: false,
        }
    }

    /// Scans for the next valid token at the beginning of `text`. All token kinds are probed
    /// and the longest match wins. On ties the kind listed first in
    /// [`TokenKind::ALL`](TokenKind::ALL) is taken.
    ///
    /// # Returns
    ///
    /// The token found and the remaining string, or `None` if no kind matches.
    ///
    /// # Errors
    ///
    /// See [`TokenKind::tokenize`](TokenKind::tokenize).
    pub fn find_next_match(text: &'a str) -> ExResult<Option<(Token<'a>, &'a str)>> {
        let longest = TokenKind::ALL
            .iter()
            .copied()
            .filter_map(|kind| kind.find_match(text).map(|n| (n, kind)))
            .fold(None, |best: Option<(usize, TokenKind)>, (n, kind)| match best {
                Some((n_best, _)) if n_best >= n => best,
                _ => Some((n, kind)),
            });
        match longest {
            Some((_, kind)) => kind.tokenize(text),
            None => Ok(None),
        }
    }

    /// Collects all tokens.
    ///
    /// # Errors
    ///
    /// The first lexical error is returned.
    pub fn parse_all(self) -> ExResult<Vec<Token<'a>>> {
        self.collect()
    }

    fn advance(&mut self, n_bytes: usize) {
        let rest = &self.remaining[n_bytes..];
        let trimmed = rest.trim_start();
        self.offset += n_bytes + rest.len() - trimmed.len();
        self.remaining = trimmed;
    }

    /// Length of the run of characters at the beginning of the remaining input that
    /// no token kind matches. The run stops at whitespace.
    fn invalid_span_len(&self) -> usize {
        let mut n_bytes = 0;
        for c in self.remaining.chars() {
            n_bytes += c.len_utf8();
            let rest = &self.remaining[n_bytes..];
            let resumes = match rest.chars().next() {
                None => true,
                Some(c) if c.is_whitespace() => true,
                Some(_) => !matches!(Self::find_next_match(rest), Ok(None)),
            };
            if resumes {
                break;
            }
        }
        n_bytes
    }
}

impl<'a> Iterator for LexicalAnalyzer<'a> {
    type Item = ExResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.remaining.is_empty() {
            debug!("no more data to parse, stopping");
            self.finished = true;
            return None;
        }
        match Self::find_next_match(self.remaining) {
            Ok(Some((token, rest))) => {
                self.advance(self.remaining.len() - rest.len());
                Some(Ok(token))
            }
            Ok(None) => {
                self.finished = true;
                let invalid_span = &self.remaining[..self.invalid_span_len()];
                error!(
                    "invalid syntax: {} at position {}",
                    invalid_span, self.offset
                );
                Some(exerr!(
                    Lexical,
                    "Invalid syntax: {} at position {}",
                    invalid_span,
                    self.offset
                ))
            }
            Err(e) => {
                self.finished = true;
                error!("{}", e.msg);
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LexicalAnalyzer;
    use crate::token::{Token, TokenKind};
    use crate::ErrorKind;

    fn kinds(text: &str) -> Vec<TokenKind> {
        LexicalAnalyzer::new(text)
            .parse_all()
            .unwrap()
            .iter()
            .map(|t| t.kind())
            .collect()
    }

    #[test]
    fn test_kinds() {
        use TokenKind::*;
        assert_eq!(
            kinds("23 ( 55 ) * +             66 "),
            vec![
                IntegerLiteral,
                OpenParen,
                IntegerLiteral,
                CloseParen,
                Operator,
                Operator,
                IntegerLiteral
            ]
        );
        assert_eq!(
            kinds("2*(1+1)+1"),
            vec![
                IntegerLiteral,
                Operator,
                OpenParen,
                IntegerLiteral,
                Operator,
                IntegerLiteral,
                CloseParen,
                Operator,
                IntegerLiteral
            ]
        );
        assert_eq!(kinds("-5"), vec![Operator, IntegerLiteral]);
        assert_eq!(kinds("1.5^.5"), vec![FloatLiteral, Operator, FloatLiteral]);
        assert!(kinds("   ").is_empty());
        assert!(kinds("").is_empty());
    }

    #[test]
    fn test_find_next_match() {
        let (token, rest) = LexicalAnalyzer::find_next_match("34253.666+1")
            .unwrap()
            .unwrap();
        assert_eq!(
            token,
            Token::FloatLiteral {
                lexeme: "34253.666",
                value: 34253.666
            }
        );
        assert_eq!(rest, "+1");
        assert!(LexicalAnalyzer::find_next_match("&1").unwrap().is_none());
    }

    #[test]
    fn test_invalid_span() {
        let err = LexicalAnalyzer::new("2&3").parse_all().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lexical);
        assert_eq!(err.msg, "Invalid syntax: & at position 1");

        let err = LexicalAnalyzer::new("  1 + abc*2").parse_all().unwrap_err();
        assert_eq!(err.msg, "Invalid syntax: abc at position 6");

        let err = LexicalAnalyzer::new("1 + a b").parse_all().unwrap_err();
        assert_eq!(err.msg, "Invalid syntax: a at position 4");

        let err = LexicalAnalyzer::new("3.").parse_all().unwrap_err();
        assert_eq!(err.msg, "Invalid syntax: . at position 1");

        let err = LexicalAnalyzer::new("1+ӭӭ").parse_all().unwrap_err();
        assert!(err.msg.contains("ӭӭ"));
    }

    #[test]
    fn test_stops_after_error() {
        let mut lexer = LexicalAnalyzer::new("1 $ 2");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_valid_numbers() {
        fn check(lexemes: &[&str], kind: TokenKind) {
            let text = lexemes.join(" ");
            let tokens = LexicalAnalyzer::new(&text).parse_all().unwrap();
            assert_eq!(tokens.len(), lexemes.len());
            for (t, lexeme) in tokens.iter().zip(lexemes) {
                assert_eq!(t.kind(), kind);
                assert_eq!(t.lexeme(), *lexeme);
                assert_eq!(t.value().unwrap(), lexeme.parse::<f64>().unwrap());
            }
        }
        let max_int = i64::MAX.to_string();
        check(
            &["1", "44", "666", "0465", "0000", max_int.as_str()],
            TokenKind::IntegerLiteral,
        );
        check(
            &[".1", ".443444", "34253.666", ".0465", "0.0000000000001"],
            TokenKind::FloatLiteral,
        );
    }
}

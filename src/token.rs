use crate::operators::{find_op, Operator, OPERATORS};
use crate::{format_exerr, ExResult};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{self, Display, Formatter};

/// Tokens of an expression. Each token borrows the exact substring of the source it was
/// created from, its lexeme.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Token<'a> {
    IntegerLiteral { lexeme: &'a str, value: i64 },
    FloatLiteral { lexeme: &'a str, value: f64 },
    Operator { lexeme: &'a str, op: &'static Operator },
    OpenParen { lexeme: &'a str },
    CloseParen { lexeme: &'a str },
}

impl<'a> Token<'a> {
    pub fn lexeme(&self) -> &'a str {
        match self {
            Token::IntegerLiteral { lexeme, .. }
            | Token::FloatLiteral { lexeme, .. }
            | Token::Operator { lexeme, .. }
            | Token::OpenParen { lexeme }
            | Token::CloseParen { lexeme } => *lexeme,
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::IntegerLiteral { .. } => TokenKind::IntegerLiteral,
            Token::FloatLiteral { .. } => TokenKind::FloatLiteral,
            Token::Operator { .. } => TokenKind::Operator,
            Token::OpenParen { .. } => TokenKind::OpenParen,
            Token::CloseParen { .. } => TokenKind::CloseParen,
        }
    }

    /// Numeric value of a literal, `None` for all other tokens.
    pub fn value(&self) -> Option<f64> {
        match self {
            Token::IntegerLiteral { value, .. } => Some(*value as f64),
            Token::FloatLiteral { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn op(&self) -> Option<&'static Operator> {
        match self {
            Token::Operator { op, .. } => Some(*op),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Token::IntegerLiteral { .. } | Token::FloatLiteral { .. }
        )
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: '{}'", self.kind(), self.lexeme())
    }
}

lazy_static! {
    static ref RE_INTEGER: Regex = Regex::new(r"^[0-9]+").unwrap();
    static ref RE_FLOAT: Regex = Regex::new(r"^[0-9]*\.[0-9]+").unwrap();
    static ref RE_OPERATOR: Regex = {
        // longer representations first since alternations are leftmost-first
        let mut reprs = OPERATORS.iter().map(|op| op.repr).collect::<Vec<_>>();
        reprs.sort_by(|r1, r2| r2.len().cmp(&r1.len()));
        let alternatives = reprs
            .iter()
            .map(|r| regex::escape(r))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(format!("^(?:{})", alternatives).as_str()).unwrap()
    };
    static ref RE_OPEN_PAREN: Regex = Regex::new(r"^\(").unwrap();
    static ref RE_CLOSE_PAREN: Regex = Regex::new(r"^\)").unwrap();
}

/// The closed set of lexical categories.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    IntegerLiteral,
    FloatLiteral,
    Operator,
    OpenParen,
    CloseParen,
}

impl TokenKind {
    /// All kinds in probing order. Literals come before operators.
    pub const ALL: [TokenKind; 5] = [
        TokenKind::IntegerLiteral,
        TokenKind::FloatLiteral,
        TokenKind::Operator,
        TokenKind::OpenParen,
        TokenKind::CloseParen,
    ];

    fn regex(&self) -> &'static Regex {
        match self {
            TokenKind::IntegerLiteral => &*RE_INTEGER,
            TokenKind::FloatLiteral => &*RE_FLOAT,
            TokenKind::Operator => &*RE_OPERATOR,
            TokenKind::OpenParen => &*RE_OPEN_PAREN,
            TokenKind::CloseParen => &*RE_CLOSE_PAREN,
        }
    }

    /// Returns the length in bytes of the match at the beginning of `text`, if there is one.
    pub fn find_match(&self, text: &str) -> Option<usize> {
        self.regex()
            .find(text)
            .map(|m| m.end())
            .filter(|n| *n > 0)
    }

    /// Creates a token of this kind from the beginning of `text`.
    ///
    /// # Returns
    ///
    /// The token and the remaining text, or `None` if this kind does not match.
    ///
    /// # Errors
    ///
    /// An integer literal that does not fit into an `i64` is a lexical error.
    pub fn tokenize<'a>(&self, text: &'a str) -> ExResult<Option<(Token<'a>, &'a str)>> {
        let n = match self.find_match(text) {
            Some(n) => n,
            None => return Ok(None),
        };
        let (lexeme, remainder) = text.split_at(n);
        let token = match self {
            TokenKind::IntegerLiteral => Token::IntegerLiteral {
                lexeme,
                value: lexeme.parse::<i64>().map_err(|e| {
                    format_exerr!(Lexical, "cannot parse integer literal {}, {}", lexeme, e)
                })?,
            },
            TokenKind::FloatLiteral => Token::FloatLiteral {
                lexeme,
                value: lexeme.parse::<f64>().map_err(|e| {
                    format_exerr!(Lexical, "cannot parse float literal {}, {}", lexeme, e)
                })?,
            },
            TokenKind::Operator => Token::Operator {
                lexeme,
                op: find_op(lexeme)?,
            },
            TokenKind::OpenParen => Token::OpenParen { lexeme },
            TokenKind::CloseParen => Token::CloseParen { lexeme },
        };
        Ok(Some((token, remainder)))
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::IntegerLiteral => "IntegerLiteral",
            TokenKind::FloatLiteral => "FloatLiteral",
            TokenKind::Operator => "Operator",
            TokenKind::OpenParen => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Token, TokenKind};
    use crate::ErrorKind;

    #[test]
    fn test_find_match() {
        assert_eq!(TokenKind::IntegerLiteral.find_match("123+4"), Some(3));
        assert_eq!(TokenKind::IntegerLiteral.find_match("+4"), None);
        assert_eq!(TokenKind::FloatLiteral.find_match("12.5*2"), Some(4));
        assert_eq!(TokenKind::FloatLiteral.find_match(".5"), Some(2));
        assert_eq!(TokenKind::FloatLiteral.find_match("3."), None);
        assert_eq!(TokenKind::FloatLiteral.find_match("12"), None);
        assert_eq!(TokenKind::Operator.find_match("^2"), Some(1));
        assert_eq!(TokenKind::Operator.find_match("-5"), Some(1));
        assert_eq!(TokenKind::Operator.find_match("&"), None);
        assert_eq!(TokenKind::OpenParen.find_match("(1)"), Some(1));
        assert_eq!(TokenKind::CloseParen.find_match("(1)"), None);
        assert_eq!(TokenKind::CloseParen.find_match(")"), Some(1));
    }

    #[test]
    fn test_tokenize() {
        let (token, rest) = TokenKind::IntegerLiteral.tokenize("0465+1").unwrap().unwrap();
        assert_eq!(
            token,
            Token::IntegerLiteral {
                lexeme: "0465",
                value: 465
            }
        );
        assert_eq!(rest, "+1");
        let (token, rest) = TokenKind::FloatLiteral.tokenize(".25)").unwrap().unwrap();
        assert_eq!(token.value(), Some(0.25));
        assert_eq!(token.kind(), TokenKind::FloatLiteral);
        assert_eq!(rest, ")");
        let (token, rest) = TokenKind::Operator.tokenize("/2").unwrap().unwrap();
        assert_eq!(token.op().unwrap().repr(), "/");
        assert_eq!(token.lexeme(), "/");
        assert_eq!(rest, "2");
        assert!(TokenKind::OpenParen.tokenize("1").unwrap().is_none());
    }

    #[test]
    fn test_integer_overflow() {
        let err = TokenKind::IntegerLiteral
            .tokenize("99999999999999999999")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lexical);
        assert!(err.msg.contains("99999999999999999999"));
    }

    #[test]
    fn test_display() {
        let (token, _) = TokenKind::IntegerLiteral.tokenize("23").unwrap().unwrap();
        assert_eq!(format!("{}", token), "IntegerLiteral: '23'");
        let (token, _) = TokenKind::CloseParen.tokenize(")").unwrap().unwrap();
        assert_eq!(format!("{}", token), "CloseParen: ')'");
        assert!(!token.is_literal());
    }
}

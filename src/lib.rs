#![doc(html_root_url = "https://docs.rs/calcex/0.3.0")]
//! Calcex tokenizes and evaluates flat arithmetic expressions such as `2*(1+1)+1`.
//! Expressions consist of integer and floating point literals, the binary operators
//! `+`, `-`, `*`, `/`, and `^`, and parentheses.
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! let result = calcex::eval_str("2*(1+1)+1")?;
//! assert_eq!(result, 5.0);
//! #
//! #     Ok(())
//! # }
//! ```
//! Operators have the usual priorities, i.e., `^` binds tighter than `*` and `/`, which
//! bind tighter than `+` and `-`. Operators of the same priority associate from left to
//! right such that `8-3-2` is `3` and `2^3^2` is `64`.
//!
//! Two parsing strategies are available. [`parse_postfix`](parse_postfix) brings the tokens
//! into postfix order with the shunting-yard algorithm,
//! [`parse_tree`](parse_tree) builds a binary expression tree.
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use calcex::{eval_postfix, evaluate, parse_postfix, parse_tree, tokenize};
//! let tokens = tokenize("(2+3)*4^.5")?;
//! let postfix = parse_postfix(&tokens)?;
//! let tree = parse_tree(&tokens)?;
//! assert_eq!(eval_postfix(&postfix)?, 10.0);
//! assert_eq!(evaluate(&tree)?, 10.0);
//! #
//! #     Ok(())
//! # }
//! ```
//! There are no unary operators, i.e., `-5` is an operator followed by a literal and does not
//! parse. Division by zero is an error of kind [`ErrorKind::Math`](ErrorKind::Math).
//!
//! The crate logs diagnostics via the [`log`](https://docs.rs/log) facade. To serialize
//! tokens, e.g., a postfix sequence, as strings, activate the feature `serde`.
//!
mod bintree;
mod lexer;
mod operators;
mod result;
#[cfg(feature = "serde")]
mod serde;
mod shunting_yard;
mod token;
mod tree_parser;

pub use {
    bintree::{BinTree, Node},
    lexer::LexicalAnalyzer,
    operators::{find_op, priority_groups, Operator, OPERATORS},
    result::{ErrorKind, ExError, ExResult},
    shunting_yard::{eval_postfix, ShuntingYardParser},
    token::{Token, TokenKind},
    tree_parser::{evaluate, parse_tree},
};

/// Splits a string into tokens.
///
/// # Errors
///
/// A lexical error is returned for the first run of characters that does not form a token,
/// e.g., `&` in `2&3`. Runs stop at whitespace, so `1 + a b` reports `a`.
///
/// Integer literals are stored as `i64`. A run of digits that does not fit, e.g.,
/// `99999999999999999999`, is a lexical error. Arbitrary precision is not supported.
pub fn tokenize(text: &str) -> ExResult<Vec<Token<'_>>> {
    LexicalAnalyzer::new(text).parse_all()
}

/// Brings tokens into postfix order with the shunting-yard algorithm.
///
/// # Errors
///
/// See [`ShuntingYardParser::parse`](ShuntingYardParser::parse).
pub fn parse_postfix<'a>(tokens: &[Token<'a>]) -> ExResult<Vec<Token<'a>>> {
    ShuntingYardParser::new(tokens.iter().copied().map(Ok)).parse()
}

/// Tokenizes a string, builds the expression tree, and evaluates it.
///
/// # Errors
///
/// See [`tokenize`](tokenize), [`parse_tree`](parse_tree), and [`evaluate`](evaluate).
pub fn eval_str(text: &str) -> ExResult<f64> {
    let tokens = tokenize(text)?;
    evaluate(&parse_tree(&tokens)?)
}

#[cfg(test)]
mod tests {
    use crate::{eval_postfix, eval_str, parse_postfix, tokenize, ErrorKind};

    #[test]
    fn test_eval_str() {
        assert_eq!(eval_str("2*(1+1)+1").unwrap(), 5.0);
        assert_eq!(eval_str(" 1.3 + 0.7 ").unwrap(), 2.0);
        assert_eq!(eval_str("2^10").unwrap(), 1024.0);
        assert!(eval_str("").is_err());
        assert!(eval_str("-5").is_err());
        assert_eq!(eval_str("1.3+0.7**2").unwrap_err().kind, ErrorKind::Syntax);
        assert_eq!(eval_str("2&3").unwrap_err().kind, ErrorKind::Lexical);
    }

    #[test]
    fn test_parse_postfix() {
        let tokens = tokenize("2*(1+1)+1").unwrap();
        let postfix = parse_postfix(&tokens).unwrap();
        assert_eq!(postfix.len(), 7);
        assert_eq!(eval_postfix(&postfix).unwrap(), 5.0);
    }
}

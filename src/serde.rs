use std::{fmt, marker::PhantomData};

use serde::{de, de::Visitor, Deserialize, Deserializer, Serialize, Serializer};

use crate::{LexicalAnalyzer, Token};

/// Tokens are serialized as their lexemes. Hence, a postfix sequence is serialized as a
/// sequence of strings.
impl Serialize for Token<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.lexeme())
    }
}

impl<'de: 'a, 'a> Deserialize<'de> for Token<'a> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(TokenVisitor {
            lifetime_dummy: PhantomData,
        })
    }
}

#[derive(Debug)]
struct TokenVisitor<'a> {
    lifetime_dummy: PhantomData<&'a ()>,
}

impl<'de: 'a, 'a> Visitor<'de> for TokenVisitor<'a> {
    type Value = Token<'a>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a borrowed &str that is the lexeme of exactly one token")
    }

    fn visit_borrowed_str<E>(self, lexeme: &'de str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match LexicalAnalyzer::find_next_match(lexeme) {
            Ok(Some((token, ""))) => Ok(token),
            Ok(_) => Err(E::custom(format!(
                "Parse error - {} is not the lexeme of a single token",
                lexeme
            ))),
            Err(e) => Err(E::custom(format!("Parse error - {}", e.msg))),
        }
    }
}

#[cfg(test)]
use {
    crate::{eval_postfix, parse_postfix, tokenize},
    serde_test::Token as SerdeToken,
};

#[test]
fn test_ser_de_token() {
    let tokens = tokenize("2.5 ^ (1 + 3)").unwrap();
    serde_test::assert_ser_tokens(&tokens[0], &[SerdeToken::Str("2.5")]);
    serde_test::assert_ser_tokens(&tokens[2], &[SerdeToken::Str("(")]);
    serde_test::assert_de_tokens(&tokens[1], &[SerdeToken::BorrowedStr("^")]);
    serde_test::assert_de_tokens(&tokens[3], &[SerdeToken::BorrowedStr("1")]);
    serde_test::assert_de_tokens_error::<Token>(
        &[SerdeToken::BorrowedStr("1+")],
        "Parse error - 1+ is not the lexeme of a single token",
    );
}

#[test]
fn test_ser_de_postfix() {
    let tokens = tokenize("2*(1+1)+1").unwrap();
    let postfix = parse_postfix(&tokens).unwrap();
    let serialized = serde_json::to_string(&postfix).unwrap();
    assert_eq!(serialized, r#"["2","1","1","+","*","1","+"]"#);
    let deserialized = serde_json::from_str::<Vec<Token>>(serialized.as_str()).unwrap();
    assert_eq!(deserialized, postfix);
    assert_eq!(eval_postfix(&deserialized).unwrap(), 5.0);
    assert!(serde_json::from_str::<Vec<Token>>(r#"["2","&"]"#).is_err());
}

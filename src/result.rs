use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Category of an [`ExError`](ExError).
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ErrorKind {
    /// A run of characters that no token pattern matches, or a literal out of range.
    Lexical,
    /// Unbalanced or empty parentheses and operators without operands.
    Syntax,
    /// Arithmetic that has no result, e.g., division by zero.
    Math,
    /// The tree parser did not reduce its input to a single node.
    Internal,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::Lexical => "lexical error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Math => "math error",
            ErrorKind::Internal => "internal error",
        };
        write!(f, "{}", name)
    }
}

/// This will be thrown at you if something within calcex went wrong. Ok, obviously it is not an
/// exception, so thrown needs to be understood figuratively.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct ExError {
    pub kind: ErrorKind,
    pub msg: String,
}
impl ExError {
    pub fn new(kind: ErrorKind, msg: &str) -> ExError {
        ExError {
            kind,
            msg: msg.to_string(),
        }
    }
}
impl Display for ExError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}
impl Error for ExError {}

/// calcex' result type with [`ExError`](ExError) as error type.
pub type ExResult<U> = Result<U, ExError>;

/// Creates an [`ExError`](ExError) of the given [`ErrorKind`](ErrorKind) with a formatted message.
/// ```rust
/// use calcex::{format_exerr, ErrorKind};
/// let err = format_exerr!(Syntax, "no operand at index {}", 3);
/// assert_eq!(err.kind, ErrorKind::Syntax);
/// assert_eq!(err.msg, "no operand at index 3");
/// ```
#[macro_export]
macro_rules! format_exerr {
    ($kind:ident, $s:literal $(, $exps:expr )* $(,)?) => {
        $crate::ExError::new($crate::ErrorKind::$kind, format!($s $(, $exps)*).as_str())
    };
}

/// Wraps [`format_exerr`](format_exerr) into `Err`.
#[macro_export]
macro_rules! exerr {
    ($kind:ident, $s:literal $(, $exps:expr )* $(,)?) => {
        Err($crate::format_exerr!($kind, $s $(, $exps)*))
    };
}

use crate::operators::Operator;
use crate::token::Token;
use crate::{exerr, format_exerr, ExResult};
use log::debug;
use smallvec::SmallVec;

const N_OPS_ON_STACK: usize = 16;
const N_VALS_ON_STACK: usize = 16;

/// Converts a sequence of tokens into postfix order with one operator stack.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use calcex::{LexicalAnalyzer, ShuntingYardParser};
/// let postfix = ShuntingYardParser::new(LexicalAnalyzer::new("(2+1)*7")).parse()?;
/// let lexemes = postfix.iter().map(|t| t.lexeme()).collect::<Vec<_>>();
/// assert_eq!(lexemes, ["2", "1", "+", "7", "*"]);
/// #
/// #     Ok(())
/// # }
/// ```
pub struct ShuntingYardParser<'a, I>
where
    I: Iterator<Item = ExResult<Token<'a>>>,
{
    tokens: I,
    operators_stack: SmallVec<[Token<'a>; N_OPS_ON_STACK]>,
    output_queue: Vec<Token<'a>>,
}

impl<'a, I> ShuntingYardParser<'a, I>
where
    I: Iterator<Item = ExResult<Token<'a>>>,
{
    pub fn new<II>(tokens: II) -> Self
    where
        II: IntoIterator<IntoIter = I>,
    {
        ShuntingYardParser {
            tokens: tokens.into_iter(),
            operators_stack: SmallVec::new(),
            output_queue: Vec::new(),
        }
    }

    /// Consumes all tokens and returns them in postfix order. An incoming operator pops
    /// stacked operators of higher and of equal priority, so `8-3-2` becomes `8 3 - 2 -`
    /// and `2^3^2` becomes `2 3 ^ 2 ^`.
    ///
    /// # Errors
    ///
    /// * errors of the token sequence are passed on,
    /// * a closing parenthesis without an opening one, e.g., `1+2)`, or an opening parenthesis
    ///   without a closing one, e.g., `(1+2`, is a syntax error.
    pub fn parse(mut self) -> ExResult<Vec<Token<'a>>> {
        let mut idx = 0;
        while let Some(token) = self.tokens.next() {
            let token = token?;
            match token {
                Token::IntegerLiteral { .. } | Token::FloatLiteral { .. } => {
                    self.output_queue.push(token)
                }
                Token::Operator { op, .. } => self.handle_operator(token, op),
                Token::OpenParen { .. } => self.operators_stack.push(token),
                Token::CloseParen { .. } => self.handle_close_paren(idx)?,
            }
            idx += 1;
        }

        // add the remaining operators to the output queue
        while let Some(top) = self.operators_stack.pop() {
            if let Token::OpenParen { .. } = top {
                return exerr!(
                    Syntax,
                    "Unbalanced parenthesis - Missing close parenthesis for the open parenthesis number {}",
                    self.operators_stack
                        .iter()
                        .filter(|t| matches!(t, Token::OpenParen { .. }))
                        .count()
                        + 1
                );
            }
            self.output_queue.push(top);
        }
        Ok(self.output_queue)
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.operators_stack.last()
    }

    fn handle_operator(&mut self, token: Token<'a>, op: &Operator) {
        while let Some(top_op) = self.peek().and_then(|top| top.op()) {
            // operators of the same priority are popped, too, to associate from left to right
            if top_op.prio() < op.prio() {
                break;
            }
            if let Some(top) = self.operators_stack.pop() {
                self.output_queue.push(top);
            }
        }
        self.operators_stack.push(token);
    }

    fn handle_close_paren(&mut self, idx: usize) -> ExResult<()> {
        while let Some(top) = self.operators_stack.pop() {
            if let Token::OpenParen { .. } = top {
                debug!("found balancing open parenthesis, discarding both");
                return Ok(());
            }
            self.output_queue.push(top);
        }
        exerr!(
            Syntax,
            "Unbalanced parenthesis - Missing open parenthesis for the close parenthesis at index {}",
            idx
        )
    }
}

/// Evaluates tokens in postfix order with a stack of values.
///
/// # Errors
///
/// * an operator without two operands on the stack or values left over at the end,
///   e.g., postfix sequences of `1+` or `1 2`, are syntax errors,
/// * parentheses cannot occur in postfix order and are syntax errors,
/// * errors of operators such as division by zero are passed on.
pub fn eval_postfix(postfix: &[Token]) -> ExResult<f64> {
    let mut values = SmallVec::<[f64; N_VALS_ON_STACK]>::new();
    for (idx, token) in postfix.iter().enumerate() {
        match token {
            Token::IntegerLiteral { .. } | Token::FloatLiteral { .. } => {
                if let Some(v) = token.value() {
                    values.push(v);
                }
            }
            Token::Operator { op, .. } => {
                let missing_operand = || {
                    format_exerr!(
                        Syntax,
                        "operator {} at index {} is missing an operand",
                        op.repr(),
                        idx
                    )
                };
                let right = values.pop().ok_or_else(missing_operand)?;
                let left = values.pop().ok_or_else(missing_operand)?;
                values.push(op.apply(left, right)?);
            }
            Token::OpenParen { .. } | Token::CloseParen { .. } => {
                return exerr!(
                    Syntax,
                    "parenthesis at index {} in postfix order",
                    idx
                );
            }
        }
    }
    match values.as_slice() {
        [v] => Ok(*v),
        [] => exerr!(Syntax, "cannot evaluate empty expression"),
        _ => exerr!(
            Syntax,
            "{} values remain after evaluation, operators are missing",
            values.len()
        ),
    }
}

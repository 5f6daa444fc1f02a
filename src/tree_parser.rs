use crate::bintree::Node;
use crate::operators::{priority_groups, Operator};
use crate::token::Token;
use crate::{exerr, format_exerr, ExResult};
use log::debug;
use smallvec::SmallVec;

const N_NODES_ON_STACK: usize = 32;

/// Element of the list the tree parser reduces. Tokens are replaced step by step by
/// sub-trees.
#[derive(Debug)]
enum Item<'a> {
    Token(Token<'a>),
    Node(Node<'a>),
}

/// An item together with the index of the token it stems from, used in error messages.
#[derive(Debug)]
struct Slot<'a> {
    idx: usize,
    item: Item<'a>,
}

impl<'a> Slot<'a> {
    fn is_open_paren(&self) -> bool {
        matches!(self.item, Item::Token(Token::OpenParen { .. }))
    }
    fn is_close_paren(&self) -> bool {
        matches!(self.item, Item::Token(Token::CloseParen { .. }))
    }
    fn is_operand(&self) -> bool {
        match &self.item {
            Item::Node(_) => true,
            Item::Token(token) => token.is_literal(),
        }
    }
    fn into_node(self) -> ExResult<Node<'a>> {
        match self.item {
            Item::Node(node) => Ok(node),
            Item::Token(token) if token.is_literal() => Ok(Node::Literal(token)),
            Item::Token(token) => exerr!(
                Syntax,
                "expected an operand at index {}, found {}",
                self.idx,
                token.lexeme()
            ),
        }
    }
}

/// Resolves parenthesized groups from the innermost, leftmost one outwards and splices
/// each group's tree into the list.
fn resolve_parens(slots: &mut Vec<Slot>) -> ExResult<()> {
    while let Some(close) = slots.iter().position(|s| s.is_close_paren()) {
        let open = slots[..close]
            .iter()
            .rposition(|s| s.is_open_paren())
            .ok_or_else(|| {
                format_exerr!(
                    Syntax,
                    "No open parenthesis for close parenthesis at index {}",
                    slots[close].idx
                )
            })?;
        let idx_open = slots[open].idx;
        if close == open + 1 {
            return exerr!(Syntax, "empty parentheses at index {}", idx_open);
        }
        debug!(
            "resolving group between parentheses at {} and {}",
            idx_open, slots[close].idx
        );
        let inner = slots.drain(open + 1..close).collect::<Vec<_>>();
        let node = parse_slots(inner)?;
        // open paren and close paren are adjacent after draining
        slots.splice(
            open..open + 2,
            [Slot {
                idx: idx_open,
                item: Item::Node(node),
            }],
        );
    }
    match slots.iter().find(|s| s.is_open_paren()) {
        Some(open) => exerr!(
            Syntax,
            "No close parenthesis for open parenthesis at index {}",
            open.idx
        ),
        None => Ok(()),
    }
}

/// Combines each operator with its neighbours from the highest priority group to the
/// lowest. Within a group, operators are combined from left to right in one pass.
fn reduce_operators(slots: &mut Vec<Slot>) -> ExResult<()> {
    for &prio in priority_groups() {
        let mut reduced = Vec::with_capacity(slots.len());
        let mut rest = slots.drain(..);
        while let Some(slot) = rest.next() {
            let (lexeme, op) = match slot.item {
                Item::Token(Token::Operator { lexeme, op }) if op.prio() == prio => (lexeme, op),
                _ => {
                    reduced.push(slot);
                    continue;
                }
            };
            let missing_operand = |side| {
                format_exerr!(
                    Syntax,
                    "operator {} at index {} is missing its {} operand",
                    lexeme,
                    slot.idx,
                    side
                )
            };
            if !reduced.last().map_or(false, |s: &Slot| s.is_operand()) {
                return Err(missing_operand("left"));
            }
            let right = match rest.next() {
                Some(right) if right.is_operand() => right.into_node()?,
                _ => return Err(missing_operand("right")),
            };
            let left = match reduced.pop() {
                Some(left) => left.into_node()?,
                None => return Err(missing_operand("left")),
            };
            reduced.push(Slot {
                idx: slot.idx,
                item: Item::Node(Node::tree(lexeme, op, left, right)),
            });
        }
        drop(rest);
        *slots = reduced;
    }
    Ok(())
}

fn parse_slots(mut slots: Vec<Slot<'_>>) -> ExResult<Node<'_>> {
    if slots.is_empty() {
        return exerr!(Syntax, "cannot parse empty expression");
    }
    resolve_parens(&mut slots)?;
    reduce_operators(&mut slots)?;
    let n_remaining = slots.len();
    match slots.pop() {
        Some(slot) if n_remaining == 1 => slot.into_node(),
        _ => exerr!(
            Internal,
            "tree parser did not consume all tokens, {} elements remain",
            n_remaining
        ),
    }
}

/// Builds an expression tree from a list of tokens. Parenthesized groups are parsed
/// recursively and operators are combined with their operands following their priorities.
/// Operators of the same priority are combined from left to right.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use calcex::{evaluate, parse_tree, tokenize};
/// let tokens = tokenize("2*(1+1)+1")?;
/// let tree = parse_tree(&tokens)?;
/// assert_eq!(format!("{}", tree), "BinTree(+, BinTree(*, 2, BinTree(+, 1, 1)), 1)");
/// assert_eq!(evaluate(&tree)?, 5.0);
/// #
/// #     Ok(())
/// # }
/// ```
///
/// # Errors
///
/// A syntax error is returned if
/// * the list is empty,
/// * a close parenthesis has no open parenthesis before it, e.g., `1+2)`, or vice versa,
///   e.g., `(1+2`,
/// * a pair of parentheses is empty, e.g., `()`,
/// * an operator has no operand on its left or right, e.g., `+1` or `1*`.
///
/// If the tokens cannot be combined into a single tree, e.g., `1 2`, an internal error
/// is returned.
pub fn parse_tree<'a>(tokens: &[Token<'a>]) -> ExResult<Node<'a>> {
    let slots = tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| Slot {
            idx,
            item: Item::Token(*token),
        })
        .collect::<Vec<_>>();
    parse_slots(slots)
}

enum Step<'t, 'a> {
    Visit(&'t Node<'a>),
    Apply(&'static Operator),
}

/// Evaluates a tree bottom-up. Literals evaluate to their values, trees to the result of
/// their operator applied to the values of the left and the right child. The traversal
/// uses explicit stacks, so deep trees such as those of long chains `1-1-...-1` do not
/// exhaust the call stack.
///
/// # Errors
///
/// Errors of operators, i.e., division by zero, are passed on.
pub fn evaluate(node: &Node) -> ExResult<f64> {
    let mut steps = SmallVec::<[Step; N_NODES_ON_STACK]>::new();
    let mut values = SmallVec::<[f64; N_NODES_ON_STACK]>::new();
    steps.push(Step::Visit(node));
    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(Node::Literal(token)) => values.push(
                token
                    .value()
                    .ok_or_else(|| format_exerr!(Internal, "{} is not a literal", token))?,
            ),
            Step::Visit(Node::Tree(tree)) => {
                steps.push(Step::Apply(tree.op));
                steps.push(Step::Visit(&tree.right));
                steps.push(Step::Visit(&tree.left));
            }
            Step::Apply(op) => {
                let right = values.pop();
                let left = values.pop();
                match (left, right) {
                    (Some(left), Some(right)) => values.push(op.apply(left, right)?),
                    _ => return exerr!(Internal, "operator {} lacks operands", op.repr()),
                }
            }
        }
    }
    match values.as_slice() {
        [v] => Ok(*v),
        _ => exerr!(Internal, "{} values remain after evaluation", values.len()),
    }
}

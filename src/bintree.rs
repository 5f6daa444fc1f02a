use crate::operators::Operator;
use crate::token::Token;
use smallvec::SmallVec;
use std::fmt::{self, Debug, Display, Formatter};
use std::mem;

const N_NODES_ON_STACK: usize = 32;

/// Stands in for sub-trees that have been moved out of a tree while it is dropped.
const DETACHED: Token<'static> = Token::IntegerLiteral {
    lexeme: "",
    value: 0,
};

/// A node of an expression tree is either a literal token or an operator applied to
/// two sub-trees.
///
/// Chains such as `1-1-...-1` produce trees as deep as the number of operators. Hence,
/// traversals in this crate, i.e., [`evaluate`](crate::evaluate), formatting, comparison,
/// and dropping, use explicit stacks instead of recursion.
pub enum Node<'a> {
    Literal(Token<'a>),
    Tree(Box<BinTree<'a>>),
}

impl<'a> Node<'a> {
    pub fn tree(lexeme: &'a str, op: &'static Operator, left: Node<'a>, right: Node<'a>) -> Self {
        Node::Tree(Box::new(BinTree {
            lexeme,
            op,
            left,
            right,
        }))
    }

    /// Number of operators in the tree.
    pub fn n_ops(&self) -> usize {
        let mut n_ops = 0;
        let mut nodes = SmallVec::<[&Node; N_NODES_ON_STACK]>::new();
        nodes.push(self);
        while let Some(node) = nodes.pop() {
            if let Node::Tree(tree) = node {
                n_ops += 1;
                nodes.push(&tree.right);
                nodes.push(&tree.left);
            }
        }
        n_ops
    }
}

/// Binary expression tree. Each tree exclusively owns its children.
#[derive(PartialEq)]
pub struct BinTree<'a> {
    /// The operator's representation in the parsed string.
    pub lexeme: &'a str,
    pub op: &'static Operator,
    pub left: Node<'a>,
    pub right: Node<'a>,
}

fn detach_subtrees<'a>(
    tree: &mut BinTree<'a>,
    detached: &mut SmallVec<[Box<BinTree<'a>>; N_NODES_ON_STACK]>,
) {
    for child in [&mut tree.left, &mut tree.right] {
        if matches!(child, Node::Tree(_)) {
            if let Node::Tree(subtree) = mem::replace(child, Node::Literal(DETACHED)) {
                detached.push(subtree);
            }
        }
    }
}

impl Drop for BinTree<'_> {
    fn drop(&mut self) {
        let mut detached = SmallVec::new();
        detach_subtrees(self, &mut detached);
        // each popped tree is dropped with literal children only
        while let Some(mut tree) = detached.pop() {
            detach_subtrees(&mut tree, &mut detached);
        }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = SmallVec::<[(&Node, &Node); N_NODES_ON_STACK]>::new();
        pairs.push((self, other));
        while let Some(pair) = pairs.pop() {
            match pair {
                (Node::Literal(t1), Node::Literal(t2)) => {
                    if t1 != t2 {
                        return false;
                    }
                }
                (Node::Tree(t1), Node::Tree(t2)) => {
                    if t1.lexeme != t2.lexeme || t1.op != t2.op {
                        return false;
                    }
                    pairs.push((&t1.right, &t2.right));
                    pairs.push((&t1.left, &t2.left));
                }
                _ => return false,
            }
        }
        true
    }
}

enum Piece<'t, 'a> {
    Text(&'t str),
    Node(&'t Node<'a>),
}

impl Display for Node<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut pieces = SmallVec::<[Piece; N_NODES_ON_STACK]>::new();
        pieces.push(Piece::Node(self));
        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Node(Node::Literal(token)) => f.write_str(token.lexeme())?,
                Piece::Node(Node::Tree(tree)) => {
                    write!(f, "BinTree({}, ", tree.lexeme)?;
                    pieces.push(Piece::Text(")"));
                    pieces.push(Piece::Node(&tree.right));
                    pieces.push(Piece::Text(", "));
                    pieces.push(Piece::Node(&tree.left));
                }
            }
        }
        Ok(())
    }
}

impl Display for BinTree<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "BinTree({}, {}, {})", self.lexeme, self.left, self.right)
    }
}

impl Debug for Node<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Node({})", self)
    }
}

impl Debug for BinTree<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

use crate::{format_exerr, ExError, ExResult};
use lazy_static::lazy_static;
use std::fmt::{self, Debug, Formatter};

fn make_op_not_available_error(repr: &str) -> ExError {
    format_exerr!(Lexical, "operator {} not available", repr)
}

/// A binary operator of the registry.
#[derive(Copy, Clone)]
pub struct Operator {
    /// Representation of the operator in the string to be parsed, e.g., `-` or `^`.
    pub repr: &'static str,
    /// Priority of the binary operation. An operation with a higher number
    /// is executed first, e.g., `*` has a higher priority than `+`.
    pub prio: i32,
    /// Implementation of the binary operation, e.g., `|a, b| Ok(a * b)` for multiplication.
    pub apply: fn(f64, f64) -> ExResult<f64>,
}

impl Operator {
    pub fn repr(&self) -> &'static str {
        self.repr
    }
    pub fn prio(&self) -> i32 {
        self.prio
    }
    /// Applies the operator to the left and the right operand, in this order.
    pub fn apply(&self, left: f64, right: f64) -> ExResult<f64> {
        (self.apply)(left, right)
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.repr == other.repr && self.prio == other.prio
    }
}
impl Eq for Operator {}

impl Debug for Operator {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Operator({}, prio {})", self.repr, self.prio)
    }
}

fn divide(a: f64, b: f64) -> ExResult<f64> {
    if b == 0.0 {
        Err(format_exerr!(Math, "division by zero in {}/{}", a, b))
    } else {
        Ok(a / b)
    }
}

/// The operator registry. Each entry maps a symbol to its priority and function.
pub static OPERATORS: [Operator; 5] = [
    Operator {
        repr: "^",
        prio: 2,
        apply: |a: f64, b: f64| Ok(a.powf(b)),
    },
    Operator {
        repr: "*",
        prio: 1,
        apply: |a, b| Ok(a * b),
    },
    Operator {
        repr: "/",
        prio: 1,
        apply: divide,
    },
    Operator {
        repr: "+",
        prio: 0,
        apply: |a, b| Ok(a + b),
    },
    Operator {
        repr: "-",
        prio: 0,
        apply: |a, b| Ok(a - b),
    },
];

/// Returns the operator with representation `repr` from the registry.
pub fn find_op(repr: &str) -> ExResult<&'static Operator> {
    OPERATORS
        .iter()
        .find(|op| op.repr == repr)
        .ok_or_else(|| make_op_not_available_error(repr))
}

lazy_static! {
    static ref PRIORITY_GROUPS: Vec<i32> = {
        let mut prios = OPERATORS.iter().map(|op| op.prio).collect::<Vec<_>>();
        prios.sort_unstable_by(|p1, p2| p2.cmp(p1));
        prios.dedup();
        prios
    };
}

/// Distinct priorities of the registry from the highest to the lowest.
pub fn priority_groups() -> &'static [i32] {
    &PRIORITY_GROUPS
}

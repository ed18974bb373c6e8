//! Formula Abstract Syntax Tree types

use gridcalc_core::CellAddress;
use std::fmt;

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    /// Numeric literal
    Number(f64),

    /// Single cell reference
    CellRef(CellAddress),

    /// Left-associative run of operators of one precedence level,
    /// e.g. `a - b + c` or `a * b / c`
    ///
    /// Kept flat so long formulas do not nest one node per operator.
    Chain {
        first: Box<FormulaExpr>,
        rest: Vec<(BinaryOperator, FormulaExpr)>,
    },

    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<FormulaExpr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

impl FormulaExpr {
    /// Build an operator chain; a chain with no operators is just `first`
    pub fn chain(first: FormulaExpr, rest: Vec<(BinaryOperator, FormulaExpr)>) -> Self {
        if rest.is_empty() {
            first
        } else {
            FormulaExpr::Chain {
                first: Box::new(first),
                rest,
            }
        }
    }

    /// Build a single binary operation
    pub fn binary(op: BinaryOperator, left: FormulaExpr, right: FormulaExpr) -> Self {
        Self::chain(left, vec![(op, right)])
    }

    /// Build a negation node
    pub fn negate(operand: FormulaExpr) -> Self {
        FormulaExpr::UnaryOp {
            op: UnaryOperator::Negate,
            operand: Box::new(operand),
        }
    }

    /// Cells referenced anywhere in the expression
    ///
    /// Each address appears once, in the order it is first met reading the
    /// formula left to right.
    pub fn references(&self) -> Vec<CellAddress> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references(&self, refs: &mut Vec<CellAddress>) {
        match self {
            FormulaExpr::Number(_) => {}
            FormulaExpr::CellRef(addr) => {
                if !refs.contains(addr) {
                    refs.push(*addr);
                }
            }
            FormulaExpr::Chain { first, rest } => {
                first.collect_references(refs);
                for (_, operand) in rest {
                    operand.collect_references(refs);
                }
            }
            FormulaExpr::UnaryOp { operand, .. } => operand.collect_references(refs),
        }
    }
}

impl BinaryOperator {
    /// The character that spells this operator in a formula
    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_are_distinct_and_ordered() {
        let b2 = CellAddress::new(1, 1);
        let a1 = CellAddress::new(0, 0);
        let expr = FormulaExpr::binary(
            BinaryOperator::Add,
            FormulaExpr::CellRef(b2),
            FormulaExpr::binary(
                BinaryOperator::Multiply,
                FormulaExpr::negate(FormulaExpr::CellRef(a1)),
                FormulaExpr::CellRef(b2),
            ),
        );

        assert_eq!(expr.references(), vec![b2, a1]);
        assert!(FormulaExpr::Number(3.0).references().is_empty());
    }

    #[test]
    fn test_chain_without_operators_collapses() {
        let a1 = FormulaExpr::CellRef(CellAddress::new(0, 0));
        assert_eq!(FormulaExpr::chain(a1.clone(), Vec::new()), a1);
    }
}

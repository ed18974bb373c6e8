//! Formula evaluator
//!
//! Evaluates formula ASTs to produce values. Evaluation never fails: any
//! problem along the way turns into [`Value::Invalid`], which then absorbs
//! every operation it takes part in.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use gridcalc_core::{CellAddress, Value};

/// Context for formula evaluation
///
/// Resolves cell references while an expression is evaluated. Taking
/// `&mut self` lets a grid compute and cache referenced cells on demand.
pub trait EvaluationContext {
    /// Get the value of the cell at `address`
    fn cell_value(&mut self, address: CellAddress) -> Value;
}

/// A context with no cells: every reference reads as `0`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl EvaluationContext for EmptyContext {
    fn cell_value(&mut self, _address: CellAddress) -> Value {
        Value::Number(0.0)
    }
}

impl<F> EvaluationContext for F
where
    F: FnMut(CellAddress) -> Value,
{
    fn cell_value(&mut self, address: CellAddress) -> Value {
        self(address)
    }
}

/// Evaluate a formula expression
///
/// Every operand of a chain is evaluated, left to right, so
/// every referenced cell is resolved even when the result is already known
/// to be invalid.
pub fn evaluate<C: EvaluationContext + ?Sized>(expr: &FormulaExpr, ctx: &mut C) -> Value {
    match expr {
        FormulaExpr::Number(n) => Value::Number(*n),

        FormulaExpr::CellRef(address) => ctx.cell_value(*address),

        FormulaExpr::Chain { first, rest } => {
            let mut acc = evaluate(first, ctx);
            for (op, operand) in rest {
                let right = evaluate(operand, ctx);
                acc = evaluate_binary_op(*op, &acc, &right);
            }
            acc
        }

        FormulaExpr::UnaryOp { op, operand } => {
            let val = evaluate(operand, ctx);
            match op {
                UnaryOperator::Negate => -&val,
            }
        }
    }
}

/// Evaluate a binary operation
fn evaluate_binary_op(op: BinaryOperator, left: &Value, right: &Value) -> Value {
    match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Subtract => left - right,
        BinaryOperator::Multiply => left * right,
        BinaryOperator::Divide => left / right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_formula;
    use std::collections::HashMap;

    fn eval(formula: &str) -> Value {
        let ast = parse_formula(formula).unwrap();
        evaluate(&ast, &mut EmptyContext)
    }

    fn eval_with(formula: &str, cells: &HashMap<CellAddress, Value>) -> Value {
        let ast = parse_formula(formula).unwrap();
        let mut lookup = |addr: CellAddress| {
            cells.get(&addr).cloned().unwrap_or(Value::Number(0.0))
        };
        evaluate(&ast, &mut lookup)
    }

    fn sheet(entries: &[(&str, Value)]) -> HashMap<CellAddress, Value> {
        entries
            .iter()
            .map(|(a1, v)| (CellAddress::parse(a1).unwrap(), v.clone()))
            .collect()
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("=1+2"), Value::Number(3.0));
        assert_eq!(eval("=5-3"), Value::Number(2.0));
        assert_eq!(eval("=4*3"), Value::Number(12.0));
        assert_eq!(eval("=10/4"), Value::Number(2.5));
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(eval("=1+2*3"), Value::Number(7.0));
        assert_eq!(eval("=(1+2)*3"), Value::Number(9.0));
        assert_eq!(eval("=10-4/2"), Value::Number(8.0));
        assert_eq!(eval("=8/4/2"), Value::Number(1.0));
    }

    #[test]
    fn test_evaluate_unary() {
        assert_eq!(eval("=-5"), Value::Number(-5.0));
        assert_eq!(eval("=3*-2"), Value::Number(-6.0));
        assert_eq!(eval("=-(2+3)"), Value::Number(-5.0));
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(eval("=1/0"), Value::Invalid);
        assert_eq!(eval("=1/(2-2)"), Value::Invalid);
        assert_eq!(eval("=1/0+1"), Value::Invalid);
    }

    #[test]
    fn test_evaluate_references() {
        let cells = sheet(&[("A1", Value::Number(5.0)), ("B2", Value::Number(2.0))]);

        assert_eq!(eval_with("=A1", &cells), Value::Number(5.0));
        assert_eq!(eval_with("=a1*b2+1", &cells), Value::Number(11.0));
        assert_eq!(eval_with("=A1/0", &cells), Value::Invalid);
        assert_eq!(eval_with("=A1/0+1", &cells), Value::Invalid);
        // Absent cells read as zero in this context
        assert_eq!(eval_with("=C3+1", &cells), Value::Number(1.0));
    }

    #[test]
    fn test_evaluate_text_references() {
        let cells = sheet(&[("A1", Value::text("hi")), ("A2", Value::Invalid)]);

        // A bare reference passes text through untouched
        assert_eq!(eval_with("=A1", &cells), Value::text("hi"));
        assert_eq!(eval_with("=(A1)", &cells), Value::text("hi"));

        assert_eq!(eval_with("=A1+1", &cells), Value::Invalid);
        assert_eq!(eval_with("=-A1", &cells), Value::Invalid);
        assert_eq!(eval_with("=A2", &cells), Value::Invalid);
        assert_eq!(eval_with("=A2*0", &cells), Value::Invalid);
    }

    #[test]
    fn test_evaluate_long_chains() {
        let sum = format!("=1{}", "+1".repeat(100_000));
        assert_eq!(eval(&sum), Value::Number(100_001.0));

        let product = format!("=1{}", "*1".repeat(100_000));
        assert_eq!(eval(&product), Value::Number(1.0));
    }

    #[test]
    fn test_too_deep_nesting_is_rejected() {
        let formula = format!("={}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(parse_formula(&formula).is_err());
    }

    #[test]
    fn test_all_references_resolved_after_invalid() {
        let mut seen = Vec::new();
        let ast = parse_formula("=1/0+A1+B1").unwrap();
        let mut lookup = |addr: CellAddress| {
            seen.push(addr);
            Value::Number(1.0)
        };

        assert_eq!(evaluate(&ast, &mut lookup), Value::Invalid);
        assert_eq!(seen, vec![CellAddress::new(0, 0), CellAddress::new(0, 1)]);
    }
}

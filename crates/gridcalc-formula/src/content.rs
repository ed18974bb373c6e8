//! Formula classification
//!
//! The text a user types into a cell is one of three things: a literal
//! string escaped with a leading apostrophe, an expression introduced by
//! '=', or anything else, which is a number when it reads as one and plain
//! text otherwise.

use crate::ast::FormulaExpr;
use crate::error::FormulaError;
use crate::evaluator::{evaluate, EvaluationContext};
use crate::parser::parse_expression;
use gridcalc_core::{CellAddress, Value};

/// What a cell's formula text turns out to be
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Literal text, either escaped with `'` or not readable as a number
    Text(String),
    /// Plain numeric literal
    Number(f64),
    /// `=` followed by a well-formed expression
    Expression(FormulaExpr),
    /// `=` followed by something the parser rejected
    Malformed(FormulaError),
}

/// Classify formula text
///
/// # Example
/// ```rust
/// use gridcalc_formula::{classify, CellContent};
///
/// assert_eq!(classify("'12"), CellContent::Text("12".into()));
/// assert_eq!(classify("12"), CellContent::Number(12.0));
/// assert_eq!(classify("twelve"), CellContent::Text("twelve".into()));
/// assert!(matches!(classify("=12+A1"), CellContent::Expression(_)));
/// assert!(matches!(classify("=12+"), CellContent::Malformed(_)));
/// ```
pub fn classify(formula: &str) -> CellContent {
    if let Some(text) = formula.strip_prefix('\'') {
        return CellContent::Text(text.to_string());
    }

    if let Some(body) = formula.strip_prefix('=') {
        return match parse_expression(body) {
            Ok(expr) => CellContent::Expression(expr),
            Err(e) => CellContent::Malformed(e),
        };
    }

    match parse_number(formula.trim()) {
        Some(n) => CellContent::Number(n),
        None => CellContent::Text(formula.to_string()),
    }
}

/// Read text as a finite floating-point number
///
/// Spellings of infinity and NaN are rejected so they stay text.
pub fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl CellContent {
    /// Evaluate the content, resolving references through `ctx`
    pub fn evaluate<C: EvaluationContext + ?Sized>(&self, ctx: &mut C) -> Value {
        match self {
            CellContent::Text(s) => Value::Text(s.clone()),
            CellContent::Number(n) => Value::Number(*n),
            CellContent::Expression(expr) => evaluate(expr, ctx),
            CellContent::Malformed(_) => Value::Invalid,
        }
    }

    /// Cells this content reads when evaluated
    pub fn references(&self) -> Vec<CellAddress> {
        match self {
            CellContent::Expression(expr) => expr.references(),
            _ => Vec::new(),
        }
    }

    /// Check if this is an `=` formula, well-formed or not
    pub fn is_expression(&self) -> bool {
        matches!(self, CellContent::Expression(_) | CellContent::Malformed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::EmptyContext;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn eval(formula: &str) -> Value {
        classify(formula).evaluate(&mut EmptyContext)
    }

    #[test]
    fn test_apostrophe_escape() {
        assert_eq!(eval("'123"), Value::text("123"));
        assert_eq!(eval("'=1+2"), Value::text("=1+2"));
        assert_eq!(eval("'"), Value::text(""));
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(eval("123"), Value::Number(123.0));
        assert_eq!(eval("-4.5"), Value::Number(-4.5));
        assert_eq!(eval("  7  "), Value::Number(7.0));
        assert_eq!(eval("2e2"), Value::Number(200.0));
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(eval("hello"), Value::text("hello"));
        assert_eq!(eval(""), Value::text(""));
        assert_eq!(eval("inf"), Value::text("inf"));
        assert_eq!(eval("NaN"), Value::text("NaN"));
        // Leading space hides the '=' marker
        assert_eq!(eval(" =1"), Value::text(" =1"));
    }

    #[test]
    fn test_expressions() {
        assert_eq!(eval("=1+2*3"), Value::Number(7.0));
        assert_eq!(eval("=(1+2)*3"), Value::Number(9.0));
        assert_eq!(eval("=3+4*"), Value::Invalid);
        assert_eq!(eval("=1+2)"), Value::Invalid);
    }

    #[test]
    fn test_is_expression() {
        assert!(classify("=1").is_expression());
        assert!(classify("=(").is_expression());
        assert!(!classify("1").is_expression());
        assert!(!classify("'=1").is_expression());
    }

    proptest! {
        #[test]
        fn prop_numeric_literals_evaluate_to_themselves(n in -1.0e12f64..1.0e12f64) {
            let text = n.to_string();
            prop_assert_eq!(eval(&text), Value::Number(n));
        }

        #[test]
        fn prop_escaped_text_is_verbatim(s in "[^\\n]{0,20}") {
            let formula = format!("'{}", s);
            prop_assert_eq!(eval(&formula), Value::Text(s));
        }
    }
}

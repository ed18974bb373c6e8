//! Formula parser
//!
//! A recursive descent parser for the arithmetic formula language:
//!
//! ```text
//! expression := term { ('+' | '-') term }
//! term       := factor { ('*' | '/') factor }
//! factor     := ['-'] ( '(' expression ')' | reference | number )
//! ```
//!
//! Whitespace is removed before parsing, so positions reported in errors
//! count characters of the compacted text. Runs of same-level operators are
//! collected into a flat [`FormulaExpr::Chain`]; only parentheses nest, up to
//! [`MAX_NESTING`] levels.

use crate::ast::{BinaryOperator, FormulaExpr};
use crate::content::parse_number;
use crate::error::{FormulaError, FormulaResult};
use gridcalc_core::CellAddress;

/// Deepest parenthesis nesting a formula may use
pub const MAX_NESTING: usize = 32;

/// Parse a formula string into an AST
///
/// # Example
/// ```rust
/// use gridcalc_formula::parse_formula;
///
/// let ast = parse_formula("=1+2").unwrap();
/// let ast = parse_formula("= (A1 + b2) * -3").unwrap();
/// assert!(parse_formula("1+2").is_err());
/// assert!(parse_formula("=1+").is_err());
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    let body = formula
        .strip_prefix('=')
        .ok_or(FormulaError::MissingPrefix)?;

    parse_expression(body)
}

/// Parse the text after the '=' marker
///
/// All whitespace is dropped first. The whole remainder must be consumed;
/// a valid prefix followed by anything else is an error.
pub fn parse_expression(body: &str) -> FormulaResult<FormulaExpr> {
    let chars: Vec<char> = body.chars().filter(|c| !c.is_whitespace()).collect();

    let mut parser = FormulaParser::new(&chars);
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if !parser.is_at_end() {
        return Err(FormulaError::TrailingInput {
            position: parser.pos,
            rest: chars[parser.pos..].iter().collect(),
        });
    }

    Ok(expr)
}

/// Formula parser
struct FormulaParser<'a> {
    input: &'a [char],
    pos: usize,
    /// Open parentheses around the current position
    depth: usize,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a [char]) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    // === Grammar ===

    /// Sum/difference level. Stops at the first character that is not
    /// '+' or '-' and hands back what it has.
    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        let first = self.parse_term()?;
        let mut rest = Vec::new();

        loop {
            let op = match self.peek_char() {
                Some('+') => BinaryOperator::Add,
                Some('-') => BinaryOperator::Subtract,
                _ => return Ok(FormulaExpr::chain(first, rest)),
            };
            self.advance();

            rest.push((op, self.parse_term()?));
        }
    }

    /// Product/quotient level
    fn parse_term(&mut self) -> FormulaResult<FormulaExpr> {
        let first = self.parse_factor()?;
        let mut rest = Vec::new();

        loop {
            let op = match self.peek_char() {
                Some('*') => BinaryOperator::Multiply,
                Some('/') => BinaryOperator::Divide,
                _ => return Ok(FormulaExpr::chain(first, rest)),
            };
            self.advance();

            rest.push((op, self.parse_factor()?));
        }
    }

    /// Optional unary minus, then a parenthesized expression or a token
    fn parse_factor(&mut self) -> FormulaResult<FormulaExpr> {
        let negative = self.eat('-');

        let operand = if self.peek_char() == Some('(') {
            let open = self.pos;
            if self.depth >= MAX_NESTING {
                return Err(FormulaError::NestingTooDeep {
                    position: open,
                    limit: MAX_NESTING,
                });
            }
            self.advance();

            self.depth += 1;
            let inner = self.parse_expression()?;
            self.depth -= 1;

            if !self.eat(')') {
                return Err(FormulaError::UnclosedParenthesis { position: open });
            }
            inner
        } else {
            self.parse_token()?
        };

        if negative {
            Ok(FormulaExpr::negate(operand))
        } else {
            Ok(operand)
        }
    }

    /// A maximal run of alphanumeric characters and '.', read as a cell
    /// reference when it matches the reference pattern, otherwise as a number
    fn parse_token(&mut self) -> FormulaResult<FormulaExpr> {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_alphanumeric() || c == '.')
        {
            self.advance();
        }

        if self.pos == start {
            return Err(match self.peek_char() {
                Some(character) => FormulaError::UnexpectedCharacter {
                    character,
                    position: start,
                },
                None => FormulaError::UnexpectedEnd,
            });
        }

        let token: String = self.input[start..self.pos].iter().collect();

        if let Some(address) = CellAddress::from_reference(&token) {
            return Ok(FormulaExpr::CellRef(address));
        }

        parse_number(&token)
            .map(FormulaExpr::Number)
            .ok_or(FormulaError::InvalidToken(token))
    }
}

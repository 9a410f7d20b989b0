//! Arithmetic parser
//!
//! A recursive descent parser over the token stream with the usual
//! precedence: unary sign binds tightest, then `*` and `/`, then `+` and `-`.
//! Only numbers, single cell references and parentheses are accepted as
//! operands.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::lexer::{tokenize, Token};

/// Deepest nesting of parentheses and unary signs accepted
const MAX_DEPTH: usize = 256;

/// Longest token stream accepted; bounds the depth of operator chains
const MAX_TOKENS: usize = 4096;

/// Parse an arithmetic formula body into an expression
///
/// # Example
/// ```rust
/// use gridcalc_formula::{parse_expression, Expr};
///
/// let expr = parse_expression("A1+B1*2").unwrap();
/// assert!(matches!(expr, Expr::Binary { .. }));
///
/// assert!(parse_expression("SUM(A1)").is_err());
/// ```
pub fn parse_expression(body: &str) -> FormulaResult<Expr> {
    let tokens = tokenize(body)?;
    parse_tokens(&tokens)
}

/// Parse an already tokenized formula body
pub fn parse_tokens(tokens: &[Token]) -> FormulaResult<Expr> {
    let mut parser = ExpressionParser {
        tokens,
        pos: 0,
        depth: 0,
    };

    if tokens.is_empty() {
        return Err(FormulaError::Parse("empty expression".into()));
    }
    if tokens.len() > MAX_TOKENS {
        return Err(FormulaError::Parse(format!(
            "expression longer than {} tokens",
            MAX_TOKENS
        )));
    }

    let expr = parser.parse_additive()?;

    // Make sure we consumed all input
    if let Some(token) = parser.current_token() {
        return Err(FormulaError::Parse(format!(
            "unexpected {:?} after expression",
            token
        )));
    }

    Ok(expr)
}

struct ExpressionParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> ExpressionParser<'a> {
    fn current_token(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn enter(&mut self) -> FormulaResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(FormulaError::Parse(format!(
                "expression nested deeper than {}",
                MAX_DEPTH
            )));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_additive(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Some(Token::Plus) => BinaryOperator::Add,
                Some(Token::Minus) => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume();
            let right = self.parse_multiplicative()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token() {
                Some(Token::Star) => BinaryOperator::Multiply,
                Some(Token::Slash) => BinaryOperator::Divide,
                _ => break,
            };

            self.consume();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<Expr> {
        let op = match self.current_token() {
            Some(Token::Minus) => UnaryOperator::Negate,
            Some(Token::Plus) => UnaryOperator::Plus,
            _ => return self.parse_primary(),
        };

        self.consume();
        self.enter()?;
        let operand = self.parse_unary()?;
        self.leave();

        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> FormulaResult<Expr> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(Expr::Number(*n)),

            Some(Token::CellRef(cell)) => Ok(Expr::CellRef(*cell)),

            Some(Token::LeftParen) => {
                self.enter()?;
                let expr = self.parse_additive()?;
                self.leave();
                match self.consume() {
                    Some(Token::RightParen) => Ok(expr),
                    other => Err(FormulaError::Parse(format!(
                        "expected ')', got {:?}",
                        other
                    ))),
                }
            }

            Some(Token::Range(range)) => Err(FormulaError::Parse(format!(
                "range {} cannot be used as a number",
                range
            ))),

            Some(Token::Identifier(name)) => {
                Err(FormulaError::Parse(format!("unknown name '{}'", name)))
            }

            Some(token) => Err(FormulaError::Parse(format!("unexpected {:?}", token))),

            None => Err(FormulaError::Parse("unexpected end of formula".into())),
        }
    }
}

//! Formula tokenizer
//!
//! A single left-to-right pass that classifies the text of a formula body
//! into numbers, cell references, ranges, names and operators. References
//! are recognised as whole words, so `AA1` is never mistaken for `A1`.

use crate::error::{FormulaError, FormulaResult};
use gridcalc_core::{CellRange, CellReference};

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Cell reference like A1
    CellRef(CellReference),
    /// Range like A1:B5 (no whitespace around the colon)
    Range(CellRange),
    /// Any other word, e.g. a function name
    Identifier(String),

    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Comma,
    Colon,
}

impl Token {
    /// Whether this token addresses one or more cells
    pub fn is_reference(&self) -> bool {
        matches!(self, Token::CellRef(_) | Token::Range(_))
    }
}

/// Tokenize a whole formula body
pub fn tokenize(input: &str) -> FormulaResult<Vec<Token>> {
    Lexer::new(input).collect()
}

/// Streaming tokenizer; yields an error once and then stops
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over a formula body (without the leading `=`)
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            failed: false,
        }
    }

    fn scan_token(&mut self) -> Option<FormulaResult<Token>> {
        self.skip_whitespace();

        let c = self.peek_char()?;

        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            ',' => Some(Token::Comma),
            ':' => Some(Token::Colon),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Some(Ok(token));
        }

        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).is_some_and(|c| c.is_ascii_digit()))
        {
            return Some(self.scan_number());
        }

        if c.is_ascii_alphabetic() || c == '_' {
            return Some(Ok(self.scan_word_or_ref()));
        }

        Some(Err(FormulaError::Tokenize(format!(
            "unexpected character '{}' at offset {}",
            c, self.pos
        ))))
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        self.skip_digits();

        if self.peek_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        // Exponent only counts when digits follow it
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let sign = usize::from(matches!(self.peek_char_at(1), Some('+' | '-')));
            if self
                .peek_char_at(1 + sign)
                .is_some_and(|c| c.is_ascii_digit())
            {
                for _ in 0..=sign {
                    self.advance();
                }
                self.skip_digits();
            }
        }

        if self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            return Err(FormulaError::Tokenize(format!(
                "malformed number at offset {}",
                start
            )));
        }

        let text = &self.input[start..self.pos];
        text.parse()
            .map(Token::Number)
            .map_err(|_| FormulaError::Tokenize(format!("invalid number '{}'", text)))
    }

    fn scan_word_or_ref(&mut self) -> Token {
        let word = self.scan_word();

        let Some(start) = CellReference::parse(word) else {
            return Token::Identifier(word.to_string());
        };

        // A1:B5 forms a range only when both sides are references
        if self.peek_char() == Some(':') {
            let checkpoint = self.pos;
            self.advance();
            let next_is_word = self
                .peek_char()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
            if next_is_word {
                if let Some(end) = CellReference::parse(self.scan_word()) {
                    return Token::Range(CellRange::new(start, end));
                }
            }
            self.pos = checkpoint;
        }

        Token::CellRef(start)
    }

    fn scan_word(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        &self.input[start..self.pos]
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = FormulaResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let token = self.scan_token();
        if matches!(token, Some(Err(_))) {
            self.failed = true;
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(row: u32, col: u32) -> CellReference {
        CellReference::new(row, col)
    }

    #[test]
    fn test_tokenize_arithmetic() {
        let tokens = tokenize("A1 + b2*2.5").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::CellRef(cell(0, 0)),
                Token::Plus,
                Token::CellRef(cell(1, 1)),
                Token::Star,
                Token::Number(2.5),
            ]
        );
    }

    #[test]
    fn test_tokenize_range() {
        let tokens = tokenize("SUM(A1:B5)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("SUM".into()),
                Token::LeftParen,
                Token::Range(CellRange::new(cell(0, 0), cell(4, 1))),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_colon_without_reference_stays_a_colon() {
        let tokens = tokenize("A1:foo").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::CellRef(cell(0, 0)),
                Token::Colon,
                Token::Identifier("foo".into()),
            ]
        );

        let tokens = tokenize("A1 : B2").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], Token::Colon);
    }

    #[test]
    fn test_longer_reference_is_one_token() {
        let tokens = tokenize("AA1+A1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::CellRef(cell(0, 26)),
                Token::Plus,
                Token::CellRef(cell(0, 0)),
            ]
        );
    }

    #[test]
    fn test_words_that_are_not_references() {
        assert_eq!(
            tokenize("A0").unwrap(),
            vec![Token::Identifier("A0".into())]
        );
        assert_eq!(
            tokenize("A1B").unwrap(),
            vec![Token::Identifier("A1B".into())]
        );
        assert_eq!(
            tokenize("_x1").unwrap(),
            vec![Token::Identifier("_x1".into())]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tokenize("1e3").unwrap(), vec![Token::Number(1000.0)]);
        assert_eq!(tokenize("2E-1").unwrap(), vec![Token::Number(0.2)]);
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(tokenize("7.").unwrap(), vec![Token::Number(7.0)]);

        assert!(tokenize("1A1").is_err());
        assert!(tokenize("1e").is_err());
        assert!(tokenize("1.2.3").is_err());
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("A1 & B1").unwrap_err();
        assert!(matches!(err, FormulaError::Tokenize(_)));
        assert!(tokenize("$A$1").is_err());
    }

    #[test]
    fn test_lexer_stops_after_error() {
        let tokens: Vec<_> = Lexer::new("A1 # B1").collect();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].is_ok());
        assert!(tokens[1].is_err());
    }
}

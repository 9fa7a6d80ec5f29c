use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::lexer::{Token, tokenize},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum number of nested brackets, prefix operators and power exponents.
pub const MAX_NESTING: usize = 50;
/// Maximum number of operators and trailers in one expression.
pub const MAX_OPERATORS: usize = 1000;

/// Parses `source` as exactly one expression.
///
/// This is the entry point for parsing. The input is tokenized, a single
/// expression (or a bare tuple such as `1, 2`) is parsed, and anything left
/// over other than trailing line breaks is an error.
///
/// # Errors
/// - `EmptyInput` if the source has no tokens.
/// - `TrailingTokens` if a second statement or stray token follows.
/// - Any lexer or grammar error from the sub-rules.
///
/// # Example
/// ```
/// use reckon::{ast::Expr, interpreter::parser::parse};
///
/// let tree = parse("1 + 2").unwrap();
/// assert!(matches!(tree, Expr::BinaryOp { .. }));
///
/// // Names parse fine; it is the evaluator that refuses them.
/// assert!(parse("open('f')").is_ok());
/// assert!(parse("1 +").is_err());
/// ```
pub fn parse(source: &str) -> ParseResult<Expr> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(&tokens, source.len() + 1);

    parser.skip_newlines();
    if parser.peek().is_none() {
        return Err(ParseError::EmptyInput);
    }

    let expr = parser.parse_expression_list()?;

    parser.skip_newlines();
    if let Some((token, column)) = parser.peek() {
        return Err(ParseError::TrailingTokens { token:  token.to_string(),
                                                column: *column, });
    }

    Ok(expr)
}

/// A recursive-descent parser over a slice of `(token, column)` pairs.
///
/// Besides the cursor, the parser tracks how deeply it has recursed and how
/// many operators it has folded into the tree, so that pathological input is
/// rejected with [`ParseError::TooDeep`] instead of exhausting the stack.
pub struct Parser<'a> {
    tokens:    &'a [(Token, usize)],
    pub(in crate::interpreter::parser) position: usize,
    end:       usize,
    nesting:   usize,
    operators: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `tokens`. `end` is the column reported for errors
    /// at the end of input.
    #[must_use]
    pub const fn new(tokens: &'a [(Token, usize)], end: usize) -> Self {
        Self { tokens,
               position: 0,
               end,
               nesting: 0,
               operators: 0 }
    }

    pub(in crate::interpreter::parser) fn peek(&self) -> Option<&'a (Token, usize)> {
        self.tokens.get(self.position)
    }

    pub(in crate::interpreter::parser) fn peek_nth(&self, n: usize) -> Option<&'a (Token, usize)> {
        self.tokens.get(self.position + n)
    }

    /// Consumes the next token if it equals `expected`.
    pub(in crate::interpreter::parser) fn eat(&mut self, expected: &Token) -> bool {
        match self.peek() {
            Some((token, _)) if token == expected => {
                self.position += 1;
                true
            },
            _ => false,
        }
    }

    /// Column of the next token, or the end-of-input column.
    pub(in crate::interpreter::parser) fn column(&self) -> usize {
        self.peek().map_or(self.end, |(_, column)| *column)
    }

    /// Builds the error for whatever token sits at the cursor.
    pub(in crate::interpreter::parser) fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some((token, column)) => ParseError::UnexpectedToken { token:  token.to_string(),
                                                                   column: *column, },
            None => ParseError::UnexpectedEndOfInput { column: self.end },
        }
    }

    pub(in crate::interpreter::parser) fn skip_newlines(&mut self) {
        while self.eat(&Token::NewLine) {}
    }

    /// Runs `rule` one nesting level deeper.
    ///
    /// # Errors
    /// Returns `TooDeep` once more than [`MAX_NESTING`] levels are open.
    pub(in crate::interpreter::parser) fn nested<T>(&mut self,
                                                    rule: impl FnOnce(&mut Self)
                                                                      -> ParseResult<T>)
                                                    -> ParseResult<T> {
        if self.nesting >= MAX_NESTING {
            return Err(ParseError::TooDeep { column: self.column() });
        }
        self.nesting += 1;
        let result = rule(self);
        self.nesting -= 1;
        result
    }

    /// Records one more operator node in the tree being built.
    ///
    /// # Errors
    /// Returns `TooDeep` once more than [`MAX_OPERATORS`] have been recorded.
    pub(in crate::interpreter::parser) fn count_operator(&mut self,
                                                         column: usize)
                                                         -> ParseResult<()> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(ParseError::TooDeep { column });
        }
        Ok(())
    }

    /// Parses an expression, or a bare comma-separated tuple of expressions.
    ///
    /// Grammar: `expression_list := expression ("," expression)* [","]`
    pub fn parse_expression_list(&mut self) -> ParseResult<Expr> {
        let column = self.column();
        let first = self.parse_expression()?;
        if !matches!(self.peek(), Some((Token::Comma, _))) {
            return Ok(first);
        }

        let mut elements = vec![first];
        while self.eat(&Token::Comma) {
            if !self.starts_expression() {
                break;
            }
            elements.push(self.parse_expression()?);
        }
        Ok(Expr::Tuple { elements, column })
    }

    /// Parses a full expression.
    ///
    /// This is the entry point for a single expression. It handles `lambda`
    /// and conditional expressions, then descends through the precedence
    /// hierarchy starting at logical `or`.
    ///
    /// Grammar: `expression := lambda | or_test ["if" or_test "else" expression]`
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        if let Some((Token::Lambda, column)) = self.peek() {
            self.position += 1;
            return self.parse_lambda(*column);
        }

        let body = self.parse_logical_or()?;

        let Some((Token::If, column)) = self.peek() else {
            return Ok(body);
        };
        let column = *column;
        self.position += 1;
        self.count_operator(column)?;

        let test = self.parse_logical_or()?;
        if !self.eat(&Token::Else) {
            return Err(self.unexpected());
        }
        let orelse = self.nested(Self::parse_expression)?;

        Ok(Expr::IfExp { test: Box::new(test),
                         body: Box::new(body),
                         orelse: Box::new(orelse),
                         column })
    }

    /// Parses a `lambda` expression after its keyword.
    ///
    /// Grammar: `lambda := "lambda" [NAME ("," NAME)*] ":" expression`
    fn parse_lambda(&mut self, column: usize) -> ParseResult<Expr> {
        let mut params = Vec::new();
        while let Some((Token::Name(name), _)) = self.peek() {
            self.position += 1;
            params.push(name.clone());
            if !self.eat(&Token::Comma) {
                break;
            }
        }

        if !self.eat(&Token::Colon) {
            return Err(self.unexpected());
        }
        let body = self.nested(Self::parse_expression)?;

        Ok(Expr::Lambda { params,
                          body: Box::new(body),
                          column })
    }

    /// Whether the next token can begin an expression.
    pub(in crate::interpreter::parser) fn starts_expression(&self) -> bool {
        matches!(self.peek(),
                 Some((Token::Integer(_)
                       | Token::Float(_)
                       | Token::Imaginary(_)
                       | Token::Str(_)
                       | Token::Name(_)
                       | Token::True
                       | Token::False
                       | Token::None
                       | Token::Ellipsis
                       | Token::Not
                       | Token::Lambda
                       | Token::Plus
                       | Token::Minus
                       | Token::Tilde
                       | Token::LParen
                       | Token::LBracket
                       | Token::LBrace,
                       _)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, LiteralValue};

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse("   "), Err(ParseError::EmptyInput));
        assert_eq!(parse("# only a comment"), Err(ParseError::EmptyInput));
    }

    #[test]
    fn trailing_newline_is_allowed() {
        assert!(parse("1 + 1\n").is_ok());
    }

    #[test]
    fn second_statement_is_rejected() {
        assert!(matches!(parse("1\n2"), Err(ParseError::TrailingTokens { .. })));
        assert!(matches!(parse("1; 2"), Err(ParseError::TrailingTokens { .. })));
        assert!(matches!(parse("x = 1"), Err(ParseError::TrailingTokens { column: 3, .. })));
    }

    #[test]
    fn bare_tuple_at_top_level() {
        let tree = parse("1, 2,").unwrap();
        assert!(matches!(tree, Expr::Tuple { ref elements, .. } if elements.len() == 2));
    }

    #[test]
    fn conditional_and_lambda_parse() {
        assert!(matches!(parse("1 if 2 else 3").unwrap(), Expr::IfExp { .. }));
        assert!(matches!(parse("lambda x, y: x").unwrap(),
                         Expr::Lambda { ref params, .. } if params.len() == 2));
    }

    #[test]
    fn deep_nesting_is_bounded() {
        let deep = format!("{}1{}", "(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert!(matches!(parse(&deep), Err(ParseError::TooDeep { .. })));

        let limit = format!("{}1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(parse(&limit),
                   Ok(Expr::Literal { value:  LiteralValue::Integer(1),
                                      column: MAX_NESTING + 1, }));
    }

    #[test]
    fn long_operator_chains_are_bounded() {
        let long = vec!["1"; MAX_OPERATORS + 2].join("+");
        assert!(matches!(parse(&long), Err(ParseError::TooDeep { .. })));

        let fine = vec!["1"; 200].join("+");
        assert!(matches!(parse(&fine),
                         Ok(Expr::BinaryOp { op: BinaryOperator::Add, .. })));
    }
}

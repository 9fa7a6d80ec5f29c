use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a comma-separated list of items until a closing token.
    ///
    /// This utility is shared by tuple, list, set and dict displays, call
    /// arguments and subscripts. It repeatedly calls `parse_item` to parse one
    /// element, expecting either:
    ///
    /// - a comma, to continue the list, or
    /// - the specified closing token, to end it.
    ///
    /// An immediately encountered closing token produces an empty list, and a
    /// trailing comma before the closing token is allowed.
    ///
    /// Grammar (simplified): `list := (item ("," item)* [","])? closing`
    ///
    /// # Errors
    /// Returns a `ParseError` if:
    /// - an item fails to parse,
    /// - neither a comma nor the closing token follows an item,
    /// - the input ends before the closing token.
    pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
        &mut self,
        parse_item: impl Fn(&mut Self) -> ParseResult<T>,
        closing: &Token)
        -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        loop {
            if self.eat(closing) {
                break;
            }
            items.push(parse_item(self)?);
            if self.eat(closing) {
                break;
            }
            if !self.eat(&Token::Comma) {
                return Err(self.expected_closing(closing_char(closing)));
            }
        }
        Ok(items)
    }

    /// Builds the error for a missing closing delimiter at the cursor.
    pub(in crate::interpreter::parser) fn expected_closing(&self, expected: char) -> ParseError {
        ParseError::ExpectedClosing { expected,
                                      column: self.column() }
    }
}

const fn closing_char(token: &Token) -> char {
    match token {
        Token::RBracket => ']',
        Token::RBrace => '}',
        _ => ')',
    }
}

use crate::{
    ast::{BinaryOperator, Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a unary expression.
    ///
    /// Supports prefix operators:
    /// - `+` (unary plus)
    /// - `-` (numeric negation)
    /// - `~` (bitwise inversion)
    ///
    /// Unary operators are right-associative, so `-~x` is parsed as
    /// `-(~x)`. Without a prefix operator the function delegates to
    /// [`Parser::parse_power`].
    ///
    /// Grammar:
    /// ```text
    ///     unary := ("+" | "-" | "~") unary
    ///            | power
    /// ```
    pub fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek() {
            Some((Token::Plus, _)) => UnaryOperator::Plus,
            Some((Token::Minus, _)) => UnaryOperator::Minus,
            Some((Token::Tilde, _)) => UnaryOperator::Invert,
            _ => return self.parse_power(),
        };
        let column = self.column();
        self.position += 1;
        self.count_operator(column)?;

        let operand = self.nested(Self::parse_unary)?;
        Ok(Expr::UnaryOp { op,
                           operand: Box::new(operand),
                           column })
    }

    /// Parses exponentiation.
    ///
    /// `**` binds tighter than a unary operator on its left and accepts a
    /// unary expression on its right, which also makes it right-associative:
    /// `-2 ** 2` is `-(2 ** 2)`, `2 ** -1` is valid, and `a ** b ** c` is
    /// `a ** (b ** c)`.
    ///
    /// Grammar: `power := primary ["**" unary]`
    pub fn parse_power(&mut self) -> ParseResult<Expr> {
        let base = self.parse_primary()?;

        let Some((Token::DoubleStar, column)) = self.peek() else {
            return Ok(base);
        };
        self.position += 1;
        self.count_operator(*column)?;

        let exponent = self.nested(Self::parse_unary)?;
        Ok(Expr::BinaryOp { left:   Box::new(base),
                            op:     BinaryOperator::Pow,
                            right:  Box::new(exponent),
                            column: *column, })
    }

    /// Parses an atom followed by any number of trailers.
    ///
    /// Trailers are calls `f(...)`, subscripts `a[...]` and attribute access
    /// `a.b`; they chain left to right, so `a.b(1)[2]` indexes the result of
    /// calling `a.b`.
    ///
    /// Grammar:
    /// ```text
    ///     primary := atom trailer*
    ///     trailer := "(" arguments ")" | "[" subscript "]" | "." NAME
    /// ```
    pub fn parse_primary(&mut self) -> ParseResult<Expr> {
        let mut node = self.parse_atom()?;

        loop {
            let Some((token, column)) = self.peek() else {
                break;
            };
            let column = *column;
            node = match token {
                Token::LParen => {
                    self.position += 1;
                    self.count_operator(column)?;
                    self.nested(|parser| parser.parse_call(node, column))?
                },
                Token::LBracket => {
                    self.position += 1;
                    self.count_operator(column)?;
                    let index = self.nested(Self::parse_subscript)?;
                    Expr::Subscript { value: Box::new(node),
                                      index: Box::new(index),
                                      column }
                },
                Token::Dot => {
                    self.position += 1;
                    self.count_operator(column)?;
                    let Some((Token::Name(attr), _)) = self.peek() else {
                        return Err(self.unexpected());
                    };
                    self.position += 1;
                    Expr::Attribute { value: Box::new(node),
                                      attr: attr.clone(),
                                      column }
                },
                _ => break,
            };
        }

        Ok(node)
    }

    /// Parses an atomic expression.
    ///
    /// Atoms include:
    /// - numeric, imaginary and string literals (adjacent strings concatenate)
    /// - `True`, `False`, `None` and `...`
    /// - names
    /// - parenthesized expressions and tuples
    /// - list, set and dict displays
    ///
    /// # Errors
    /// Returns `UnexpectedToken` or `UnexpectedEndOfInput` when the next token
    /// cannot start an atom.
    fn parse_atom(&mut self) -> ParseResult<Expr> {
        let (token, column) = match self.peek() {
            Some((token, column)) => (token, *column),
            None => return Err(self.unexpected()),
        };

        let value = match token {
            Token::Integer(n) => LiteralValue::Integer(*n),
            Token::Float(n) => LiteralValue::Float(*n),
            Token::Imaginary(n) => LiteralValue::Imaginary(*n),
            Token::True => LiteralValue::Bool(true),
            Token::False => LiteralValue::Bool(false),
            Token::None => LiteralValue::None,
            Token::Ellipsis => LiteralValue::Ellipsis,
            Token::Str(_) => LiteralValue::Str(self.parse_strings()),
            Token::Name(id) => {
                self.position += 1;
                return Ok(Expr::Name { id: id.clone(),
                                       column });
            },
            Token::LParen => {
                self.position += 1;
                return self.nested(|parser| parser.parse_parenthesized(column));
            },
            Token::LBracket => {
                self.position += 1;
                let elements =
                    self.nested(|parser| {
                            parser.parse_comma_separated(Self::parse_expression, &Token::RBracket)
                        })?;
                return Ok(Expr::List { elements, column });
            },
            Token::LBrace => {
                self.position += 1;
                return self.nested(|parser| parser.parse_braced(column));
            },
            _ => return Err(self.unexpected()),
        };

        if !matches!(value, LiteralValue::Str(_)) {
            self.position += 1;
        }
        Ok(Expr::Literal { value, column })
    }

    /// Concatenates consecutive string literals, consuming them.
    fn parse_strings(&mut self) -> String {
        let mut text = String::new();
        while let Some((Token::Str(part), _)) = self.peek() {
            self.position += 1;
            text.push_str(part);
        }
        text
    }

    /// Parses the inside of `( ... )` after the opening parenthesis.
    ///
    /// `()` is the empty tuple, `(x)` is a grouping that yields `x` itself,
    /// and `(x,)` or `(x, y)` are tuples.
    fn parse_parenthesized(&mut self, column: usize) -> ParseResult<Expr> {
        if self.eat(&Token::RParen) {
            return Ok(Expr::Tuple { elements: Vec::new(),
                                    column });
        }

        let first = self.parse_expression()?;
        if self.eat(&Token::RParen) {
            return Ok(first);
        }
        if !self.eat(&Token::Comma) {
            return Err(self.expected_closing(')'));
        }

        let mut elements = vec![first];
        elements.extend(self.parse_comma_separated(Self::parse_expression, &Token::RParen)?);
        Ok(Expr::Tuple { elements, column })
    }

    /// Parses the inside of `{ ... }` after the opening brace.
    ///
    /// `{}` is an empty dict; the first element decides between a dict
    /// (`{k: v, ...}`) and a set (`{a, b}`).
    fn parse_braced(&mut self, column: usize) -> ParseResult<Expr> {
        if self.eat(&Token::RBrace) {
            return Ok(Expr::Dict { entries: Vec::new(),
                                   column });
        }

        let first = self.parse_expression()?;
        if self.eat(&Token::Colon) {
            let value = self.parse_expression()?;
            let mut entries = vec![(first, value)];
            if self.eat(&Token::Comma) {
                entries.extend(self.parse_comma_separated(Self::parse_dict_entry,
                                                          &Token::RBrace)?);
            } else if !self.eat(&Token::RBrace) {
                return Err(self.expected_closing('}'));
            }
            return Ok(Expr::Dict { entries, column });
        }

        let mut elements = vec![first];
        if self.eat(&Token::Comma) {
            elements.extend(self.parse_comma_separated(Self::parse_expression, &Token::RBrace)?);
        } else if !self.eat(&Token::RBrace) {
            return Err(self.expected_closing('}'));
        }
        Ok(Expr::Set { elements, column })
    }

    fn parse_dict_entry(&mut self) -> ParseResult<(Expr, Expr)> {
        let key = self.parse_expression()?;
        if !self.eat(&Token::Colon) {
            return Err(self.unexpected());
        }
        Ok((key, self.parse_expression()?))
    }

    /// Parses call arguments after the opening parenthesis.
    ///
    /// Grammar: `arguments := (argument ("," argument)* [","])?` where an
    /// argument is either `NAME "=" expression` or `expression`.
    fn parse_call(&mut self, func: Expr, column: usize) -> ParseResult<Expr> {
        let mut args = Vec::new();
        let mut keywords = Vec::new();

        for argument in self.parse_comma_separated(Self::parse_argument, &Token::RParen)? {
            match argument {
                (Some(name), value) => keywords.push((name, value)),
                (None, value) if keywords.is_empty() => args.push(value),
                (None, value) => {
                    let token = "positional argument after keyword argument".to_string();
                    return Err(ParseError::UnexpectedToken { token,
                                                             column: value.column() });
                },
            }
        }

        Ok(Expr::Call { func: Box::new(func),
                        args,
                        keywords,
                        column })
    }

    fn parse_argument(&mut self) -> ParseResult<(Option<String>, Expr)> {
        if let Some((Token::Name(name), _)) = self.peek()
           && let Some((Token::Equals, _)) = self.peek_nth(1)
        {
            self.position += 2;
            return Ok((Some(name.clone()), self.parse_expression()?));
        }
        Ok((None, self.parse_expression()?))
    }

    /// Parses the inside of `[ ... ]` after a subscripted value.
    ///
    /// A single index yields that expression, several comma-separated items
    /// yield a tuple, and any item may be a slice `lower:upper:step` with
    /// every part optional.
    fn parse_subscript(&mut self) -> ParseResult<Expr> {
        let column = self.column();
        let mut items = self.parse_comma_separated(Self::parse_slice_item, &Token::RBracket)?;
        match items.len() {
            0 => Err(ParseError::UnexpectedToken { token: "']'".to_string(),
                                                   column }),
            1 => Ok(items.remove(0)),
            _ => Ok(Expr::Tuple { elements: items,
                                  column }),
        }
    }

    fn parse_slice_item(&mut self) -> ParseResult<Expr> {
        let column = self.column();
        let lower = if matches!(self.peek(), Some((Token::Colon, _))) {
            None
        } else {
            let index = self.parse_expression()?;
            if !matches!(self.peek(), Some((Token::Colon, _))) {
                return Ok(index);
            }
            Some(Box::new(index))
        };

        self.eat(&Token::Colon);
        let upper = self.parse_optional_slice_part()?;
        let step = if self.eat(&Token::Colon) {
            self.parse_optional_slice_part()?
        } else {
            None
        };

        Ok(Expr::Slice { lower,
                         upper,
                         step,
                         column })
    }

    fn parse_optional_slice_part(&mut self) -> ParseResult<Option<Box<Expr>>> {
        if self.starts_expression() {
            Ok(Some(Box::new(self.parse_expression()?)))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{BinaryOperator, Expr, LiteralValue, UnaryOperator},
        error::ParseError,
        interpreter::parser::parse,
    };

    #[test]
    fn power_binds_tighter_than_unary_minus() {
        let Expr::UnaryOp { op, operand, .. } = parse("-2 ** 2").unwrap() else {
            panic!("expected a unary operation");
        };
        assert_eq!(op, UnaryOperator::Minus);
        assert!(matches!(*operand, Expr::BinaryOp { op: BinaryOperator::Pow, .. }));
    }

    #[test]
    fn power_is_right_associative() {
        let Expr::BinaryOp { right, .. } = parse("2 ** 3 ** 2").unwrap() else {
            panic!("expected a binary operation");
        };
        assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::Pow, .. }));
    }

    #[test]
    fn power_accepts_unary_exponent() {
        let Expr::BinaryOp { right, .. } = parse("2 ** -1").unwrap() else {
            panic!("expected a binary operation");
        };
        assert!(matches!(*right, Expr::UnaryOp { op: UnaryOperator::Minus, .. }));
    }

    #[test]
    fn grouping_is_transparent() {
        assert_eq!(parse("(7)"),
                   Ok(Expr::Literal { value:  LiteralValue::Integer(7),
                                      column: 2, }));
    }

    #[test]
    fn collection_displays() {
        assert!(matches!(parse("()").unwrap(), Expr::Tuple { ref elements, .. } if elements.is_empty()));
        assert!(matches!(parse("(1,)").unwrap(), Expr::Tuple { ref elements, .. } if elements.len() == 1));
        assert!(matches!(parse("[1, 2,]").unwrap(), Expr::List { ref elements, .. } if elements.len() == 2));
        assert!(matches!(parse("{1, 2}").unwrap(), Expr::Set { .. }));
        assert!(matches!(parse("{1: 2, 3: 4}").unwrap(), Expr::Dict { ref entries, .. } if entries.len() == 2));
        assert!(matches!(parse("{}").unwrap(), Expr::Dict { .. }));
    }

    #[test]
    fn trailers_chain() {
        let Expr::Subscript { value, .. } = parse("a.b(1, key=2)[0]").unwrap() else {
            panic!("expected a subscript");
        };
        let Expr::Call { func, args, keywords, .. } = *value else {
            panic!("expected a call");
        };
        assert_eq!(args.len(), 1);
        assert_eq!(keywords.len(), 1);
        assert!(matches!(*func, Expr::Attribute { ref attr, .. } if attr == "b"));
    }

    #[test]
    fn slices_parse() {
        let Expr::Subscript { index, .. } = parse("a[1:2:3]").unwrap() else {
            panic!("expected a subscript");
        };
        assert!(matches!(*index, Expr::Slice { lower: Some(_), upper: Some(_), step: Some(_), .. }));
        assert!(parse("a[:]").is_ok());
        assert!(parse("a[::2]").is_ok());
    }

    #[test]
    fn adjacent_strings_concatenate() {
        assert_eq!(parse("'a' \"b\""),
                   Ok(Expr::Literal { value:  LiteralValue::Str("ab".to_string()),
                                      column: 1, }));
    }

    #[test]
    fn unclosed_brackets_are_reported() {
        assert!(matches!(parse("(1 + 2"), Err(ParseError::ExpectedClosing { expected: ')', .. })));
        assert!(matches!(parse("[1, 2"), Err(ParseError::ExpectedClosing { expected: ']', .. })));
        assert!(matches!(parse("1 + )"), Err(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn keyword_then_positional_is_rejected() {
        assert!(parse("f(a=1, 2)").is_err());
    }
}

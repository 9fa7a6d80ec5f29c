use crate::{
    ast::{BinaryOperator, BoolOperator, CompareOperator, Expr, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses logical OR expressions.
    ///
    /// Consecutive `or` operands are collected into one [`Expr::BoolOp`].
    ///
    /// Grammar: `or_test := and_test ("or" and_test)*`
    pub fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        self.parse_bool_chain(&Token::Or, BoolOperator::Or, Self::parse_logical_and)
    }

    /// Parses logical AND expressions.
    ///
    /// Grammar: `and_test := not_test ("and" not_test)*`
    pub fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        self.parse_bool_chain(&Token::And, BoolOperator::And, Self::parse_logical_not)
    }

    fn parse_bool_chain(&mut self,
                        keyword: &Token,
                        op: BoolOperator,
                        operand: fn(&mut Self) -> ParseResult<Expr>)
                        -> ParseResult<Expr> {
        let column = self.column();
        let first = operand(self)?;
        if !matches!(self.peek(), Some((token, _)) if token == keyword) {
            return Ok(first);
        }

        let mut values = vec![first];
        while let Some((token, op_column)) = self.peek()
              && token == keyword
        {
            self.position += 1;
            self.count_operator(*op_column)?;
            values.push(operand(self)?);
        }
        Ok(Expr::BoolOp { op,
                          values,
                          column })
    }

    /// Parses logical negation.
    ///
    /// Grammar: `not_test := "not" not_test | comparison`
    pub fn parse_logical_not(&mut self) -> ParseResult<Expr> {
        if let Some((Token::Not, column)) = self.peek() {
            self.position += 1;
            let operand = self.nested(Self::parse_logical_not)?;
            return Ok(Expr::UnaryOp { op:      UnaryOperator::Not,
                                      operand: Box::new(operand),
                                      column:  *column, });
        }
        self.parse_comparison()
    }

    /// Parses relational, equality, identity and membership operators.
    ///
    /// Comparisons chain, so `a < b <= c` becomes a single [`Expr::Compare`]
    /// with two operators.
    ///
    /// Grammar: `comparison := bitwise_or (comp_op bitwise_or)*`
    pub fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let column = self.column();
        let left = self.parse_binary()?;

        let mut ops = Vec::new();
        let mut comparators = Vec::new();
        while let Some(op) = self.comparison_operator() {
            self.count_operator(self.column())?;
            ops.push(op);
            comparators.push(self.parse_binary()?);
        }

        if ops.is_empty() {
            return Ok(left);
        }
        Ok(Expr::Compare { left: Box::new(left),
                           ops,
                           comparators,
                           column })
    }

    /// Consumes a comparison operator, including the two-word `not in` and
    /// `is not`.
    fn comparison_operator(&mut self) -> Option<CompareOperator> {
        let (token, _) = self.peek()?;
        let (op, width) = match token {
            Token::EqualEqual => (CompareOperator::Eq, 1),
            Token::BangEqual => (CompareOperator::NotEq, 1),
            Token::Less => (CompareOperator::Lt, 1),
            Token::LessEqual => (CompareOperator::LtE, 1),
            Token::Greater => (CompareOperator::Gt, 1),
            Token::GreaterEqual => (CompareOperator::GtE, 1),
            Token::In => (CompareOperator::In, 1),
            Token::Is => match self.peek_nth(1) {
                Some((Token::Not, _)) => (CompareOperator::IsNot, 2),
                _ => (CompareOperator::Is, 1),
            },
            Token::Not => match self.peek_nth(1) {
                Some((Token::In, _)) => (CompareOperator::NotIn, 2),
                _ => return None,
            },
            _ => return None,
        };
        self.position += width;
        Some(op)
    }

    /// Parses every left-associative binary operator, from `|` down to the
    /// multiplication level, by precedence climbing.
    ///
    /// One loop covers all six levels. Operands are unary expressions; a
    /// tighter operator on the right recurses with a raised floor, so that
    /// recursion is bounded by the number of levels.
    ///
    /// Grammar:
    /// ```text
    ///     bitwise_or     := bitwise_xor ("|" bitwise_xor)*
    ///     bitwise_xor    := bitwise_and ("^" bitwise_and)*
    ///     bitwise_and    := shift ("&" shift)*
    ///     shift          := additive (("<<" | ">>") additive)*
    ///     additive       := multiplicative (("+" | "-") multiplicative)*
    ///     multiplicative := unary (("*" | "@" | "/" | "//" | "%") unary)*
    /// ```
    pub fn parse_binary(&mut self) -> ParseResult<Expr> {
        self.parse_binary_above(1)
    }

    fn parse_binary_above(&mut self, floor: u8) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        while let Some((token, column)) = self.peek()
              && let Some(op) = token_to_binary_operator(token)
              && let Some(precedence) = binding_power(op)
              && precedence >= floor
        {
            self.position += 1;
            self.count_operator(*column)?;
            let right = self.parse_binary_above(precedence + 1)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    column: *column };
        }
        Ok(left)
    }
}

/// Precedence of a left-associative binary operator; higher binds tighter.
///
/// `**` is right-associative and handled by [`Parser::parse_power`], so it
/// has none.
const fn binding_power(op: BinaryOperator) -> Option<u8> {
    match op {
        BinaryOperator::BitOr => Some(1),
        BinaryOperator::BitXor => Some(2),
        BinaryOperator::BitAnd => Some(3),
        BinaryOperator::LShift | BinaryOperator::RShift => Some(4),
        BinaryOperator::Add | BinaryOperator::Sub => Some(5),
        BinaryOperator::Mul
        | BinaryOperator::MatMul
        | BinaryOperator::Div
        | BinaryOperator::FloorDiv
        | BinaryOperator::Mod => Some(6),
        BinaryOperator::Pow => None,
    }
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token is an infix arithmetic or
/// bitwise operator and `None` for all other tokens.
///
/// # Example
/// ```
/// use reckon::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::DoubleSlash),
///            Some(BinaryOperator::FloorDiv));
/// assert_eq!(token_to_binary_operator(&Token::Less), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::DoubleSlash => Some(BinaryOperator::FloorDiv),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::DoubleStar => Some(BinaryOperator::Pow),
        Token::At => Some(BinaryOperator::MatMul),
        Token::LeftShift => Some(BinaryOperator::LShift),
        Token::RightShift => Some(BinaryOperator::RShift),
        Token::Pipe => Some(BinaryOperator::BitOr),
        Token::Caret => Some(BinaryOperator::BitXor),
        Token::Ampersand => Some(BinaryOperator::BitAnd),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{BinaryOperator, BoolOperator, CompareOperator, Expr},
        interpreter::parser::parse,
    };

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let Expr::BinaryOp { op, right, .. } = parse("1 + 2 * 3").unwrap() else {
            panic!("expected a binary operation");
        };
        assert_eq!(op, BinaryOperator::Add);
        assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::Mul, .. }));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let Expr::BinaryOp { left, .. } = parse("8 - 4 - 2").unwrap() else {
            panic!("expected a binary operation");
        };
        assert!(matches!(*left, Expr::BinaryOp { op: BinaryOperator::Sub, .. }));
    }

    #[test]
    fn comparison_chain_is_one_node() {
        let Expr::Compare { ops, .. } = parse("1 < 2 <= 3 not in 4 is not 5").unwrap() else {
            panic!("expected a comparison");
        };
        assert_eq!(ops,
                   vec![CompareOperator::Lt,
                        CompareOperator::LtE,
                        CompareOperator::NotIn,
                        CompareOperator::IsNot]);
    }

    #[test]
    fn bool_chain_collects_operands() {
        let Expr::BoolOp { op, values, .. } = parse("1 or 2 or 3").unwrap() else {
            panic!("expected a boolean operation");
        };
        assert_eq!(op, BoolOperator::Or);
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn precedence_levels_nest_in_order() {
        // 1 | (2 ^ (3 & ((4 << (5 + (6 * 7))))))
        let mut node = parse("1 | 2 ^ 3 & 4 << 5 + 6 * 7").unwrap();
        for expected in [BinaryOperator::BitOr,
                         BinaryOperator::BitXor,
                         BinaryOperator::BitAnd,
                         BinaryOperator::LShift,
                         BinaryOperator::Add,
                         BinaryOperator::Mul]
        {
            let Expr::BinaryOp { op, right, .. } = node else {
                panic!("expected {expected:?}");
            };
            assert_eq!(op, expected);
            node = *right;
        }
        assert!(matches!(node, Expr::Literal { .. }));
    }

    #[test]
    fn mixed_levels_stay_left_associative() {
        // (1 * 2 + 3) - 4 * 5
        let Expr::BinaryOp { op, left, right, .. } = parse("1 * 2 + 3 - 4 * 5").unwrap() else {
            panic!("expected a binary operation");
        };
        assert_eq!(op, BinaryOperator::Sub);
        assert!(matches!(*left, Expr::BinaryOp { op: BinaryOperator::Add, .. }));
        assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::Mul, .. }));
    }

    #[test]
    fn bitwise_operators_parse_as_binary_nodes() {
        assert!(matches!(parse("1 << 2").unwrap(),
                         Expr::BinaryOp { op: BinaryOperator::LShift, .. }));
        assert!(matches!(parse("1 | 2 & 3").unwrap(),
                         Expr::BinaryOp { op: BinaryOperator::BitOr, .. }));
    }
}

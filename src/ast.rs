/// Represents a literal value in the language.
///
/// `LiteralValue` covers every constant the parser can produce, not only the
/// numbers the evaluator accepts. Strings, booleans and imaginary numbers are
/// kept so that they can be rejected explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Float(f64),
    /// An imaginary literal such as `3j`, holding its magnitude.
    Imaginary(f64),
    /// `True` or `False`.
    Bool(bool),
    /// A string literal, with escape sequences kept verbatim.
    Str(String),
    /// `None`.
    None,
    /// `...`.
    Ellipsis,
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` models the full expression grammar the parser understands, from
/// literals and arithmetic to calls, attribute access, comparisons and
/// collection displays. Only [`Expr::Literal`], [`Expr::UnaryOp`] and
/// [`Expr::BinaryOp`] are ever evaluated; everything else exists so the
/// evaluator can see it and refuse it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean, etc.).
    Literal {
        /// The constant value.
        value:  LiteralValue,
        /// Column in the source text.
        column: usize,
    },
    /// Reference to a name, such as `x` or `open`.
    Name {
        /// The identifier.
        id:     String,
        /// Column in the source text.
        column: usize,
    },
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Column in the source text.
        column:  usize,
    },
    /// A binary operation (addition, shifting, etc.).
    BinaryOp {
        /// Left operand.
        left:   Box<Self>,
        /// The operator.
        op:     BinaryOperator,
        /// Right operand.
        right:  Box<Self>,
        /// Column of the operator in the source text.
        column: usize,
    },
    /// A chain of `and` or `or`, such as `a and b and c`.
    BoolOp {
        /// The boolean operator shared by the chain.
        op:     BoolOperator,
        /// The operands, at least two.
        values: Vec<Self>,
        /// Column in the source text.
        column: usize,
    },
    /// A comparison chain, such as `a < b <= c`.
    Compare {
        /// The leftmost operand.
        left:        Box<Self>,
        /// The operators, one per comparator.
        ops:         Vec<CompareOperator>,
        /// The operands following each operator.
        comparators: Vec<Self>,
        /// Column in the source text.
        column:      usize,
    },
    /// Conditional expression (`body if test else orelse`).
    IfExp {
        /// The condition.
        test:   Box<Self>,
        /// Expression selected when the condition holds.
        body:   Box<Self>,
        /// Expression selected otherwise.
        orelse: Box<Self>,
        /// Column in the source text.
        column: usize,
    },
    /// Anonymous function (`lambda x, y: body`).
    Lambda {
        /// Parameter names.
        params: Vec<String>,
        /// The body expression.
        body:   Box<Self>,
        /// Column in the source text.
        column: usize,
    },
    /// Call expression (e.g. `open('f')`).
    Call {
        /// The callee.
        func:     Box<Self>,
        /// Positional arguments.
        args:     Vec<Self>,
        /// Keyword arguments as `(name, value)` pairs.
        keywords: Vec<(String, Self)>,
        /// Column in the source text.
        column:   usize,
    },
    /// Attribute access (e.g. `x.real`).
    Attribute {
        /// The object whose attribute is read.
        value:  Box<Self>,
        /// The attribute name.
        attr:   String,
        /// Column in the source text.
        column: usize,
    },
    /// Subscript expression (e.g. `a[2]` or `a[1:3]`).
    Subscript {
        /// The object being indexed.
        value:  Box<Self>,
        /// The index, possibly an [`Expr::Slice`].
        index:  Box<Self>,
        /// Column in the source text.
        column: usize,
    },
    /// Slice inside a subscript (`lower:upper:step`).
    Slice {
        /// Optional lower bound.
        lower:  Option<Box<Self>>,
        /// Optional upper bound.
        upper:  Option<Box<Self>>,
        /// Optional step.
        step:   Option<Box<Self>>,
        /// Column in the source text.
        column: usize,
    },
    /// Tuple display, such as `(1, 2)` or `()`.
    Tuple {
        /// Elements of the tuple.
        elements: Vec<Self>,
        /// Column in the source text.
        column:   usize,
    },
    /// List display, such as `[1, 2]`.
    List {
        /// Elements of the list.
        elements: Vec<Self>,
        /// Column in the source text.
        column:   usize,
    },
    /// Set display, such as `{1, 2}`.
    Set {
        /// Elements of the set.
        elements: Vec<Self>,
        /// Column in the source text.
        column:   usize,
    },
    /// Dictionary display, such as `{1: 2}`.
    Dict {
        /// `(key, value)` entries.
        entries: Vec<(Self, Self)>,
        /// Column in the source text.
        column:  usize,
    },
}

impl Expr {
    /// Gets the column from `self`.
    /// ## Example
    /// ```
    /// use reckon::ast::Expr;
    ///
    /// let expr = Expr::Name { id:     "x".to_string(),
    ///                         column: 5, };
    ///
    /// assert_eq!(expr.column(), 5);
    /// ```
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::Literal { column, .. }
            | Self::Name { column, .. }
            | Self::UnaryOp { column, .. }
            | Self::BinaryOp { column, .. }
            | Self::BoolOp { column, .. }
            | Self::Compare { column, .. }
            | Self::IfExp { column, .. }
            | Self::Lambda { column, .. }
            | Self::Call { column, .. }
            | Self::Attribute { column, .. }
            | Self::Subscript { column, .. }
            | Self::Slice { column, .. }
            | Self::Tuple { column, .. }
            | Self::List { column, .. }
            | Self::Set { column, .. }
            | Self::Dict { column, .. } => *column,
        }
    }

    /// Short name of the node kind, used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "literal",
            Self::Name { .. } => "name",
            Self::UnaryOp { .. } => "unary operation",
            Self::BinaryOp { .. } => "binary operation",
            Self::BoolOp { .. } => "boolean operation",
            Self::Compare { .. } => "comparison",
            Self::IfExp { .. } => "conditional expression",
            Self::Lambda { .. } => "lambda",
            Self::Call { .. } => "call",
            Self::Attribute { .. } => "attribute access",
            Self::Subscript { .. } => "subscript",
            Self::Slice { .. } => "slice",
            Self::Tuple { .. } => "tuple",
            Self::List { .. } => "list",
            Self::Set { .. } => "set",
            Self::Dict { .. } => "dict",
        }
    }
}

/// Represents a binary operator.
///
/// The first seven variants form the arithmetic subset; the rest are parsed
/// but never evaluated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// True division (`/`)
    Div,
    /// Floor division (`//`)
    FloorDiv,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Matrix multiplication (`@`)
    MatMul,
    /// Left shift (`<<`)
    LShift,
    /// Right shift (`>>`)
    RShift,
    /// Bitwise or (`|`)
    BitOr,
    /// Bitwise exclusive or (`^`)
    BitXor,
    /// Bitwise and (`&`)
    BitAnd,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Unary plus (`+x`).
    Plus,
    /// Arithmetic negation (`-x`).
    Minus,
    /// Logical not (`not x`).
    Not,
    /// Bitwise inversion (`~x`).
    Invert,
}

/// Represents a boolean chain operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoolOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

/// Represents a comparison operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompareOperator {
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtE,
    /// `>`
    Gt,
    /// `>=`
    GtE,
    /// `is`
    Is,
    /// `is not`
    IsNot,
    /// `in`
    In,
    /// `not in`
    NotIn,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, BitAnd, BitOr, BitXor, Div, FloorDiv, LShift, MatMul, Mod, Mul, Pow, RShift, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            FloorDiv => "//",
            Mod => "%",
            Pow => "**",
            MatMul => "@",
            LShift => "<<",
            RShift => ">>",
            BitOr => "|",
            BitXor => "^",
            BitAnd => "&",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "not",
            Self::Invert => "~",
        };
        write!(f, "{operator}")
    }
}

/// The evaluator module computes a number from a parsed tree.
///
/// The evaluator walks the AST but only accepts integer and float literals,
/// unary `+`/`-` and the seven arithmetic binary operators. Every other node
/// kind is refused before it is evaluated, which is what makes evaluation of
/// untrusted input safe.
///
/// # Responsibilities
/// - Enforces the allow-list of node kinds and operators.
/// - Implements integer/float arithmetic with floor division semantics.
/// - Reports division by zero, overflow, domain errors and excessive nesting.
pub mod evaluator;
/// The lexer module tokenizes source text for further parsing.
///
/// The lexer reads the raw input and produces a stream of tokens for numbers,
/// strings, names, keywords, operators and delimiters. It covers the whole
/// expression surface, not just arithmetic, so that non-arithmetic input is
/// reported by the evaluator as unsupported rather than as a syntax error.
///
/// # Responsibilities
/// - Converts the input into tokens tagged with their 1-based column.
/// - Handles numeric literals in every base, strings and comments.
/// - Reports malformed and oversized literals.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser accepts exactly one expression and produces a generic tree
/// that represents its structure, including node kinds the evaluator will
/// later refuse.
///
/// # Responsibilities
/// - Converts tokens into AST nodes with correct precedence and
///   associativity.
/// - Rejects statements, multiple expressions and stray tokens.
/// - Bounds nesting and operator count so hostile input cannot exhaust the
///   stack.
pub mod parser;
/// The value module defines the numeric result type.
///
/// Evaluation produces either a 64-bit integer or a float, and this module
/// renders both the way a calculator user expects.
pub mod value;

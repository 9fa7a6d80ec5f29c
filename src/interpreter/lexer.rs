use logos::{FilterResult, Logos};

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
///
/// The token set deliberately covers far more than arithmetic: names, strings,
/// comparison and bitwise operators, brackets and keywords are all recognized
/// so that the parser can build a complete tree and the evaluator can reject
/// it by node kind.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexError)]
pub enum Token {
    /// Floating-point literal tokens, such as `3.14`, `.5`, `2.` or `2.1e-10`.
    #[regex(r"[0-9](_?[0-9])*\.([0-9](_?[0-9])*)?([eE][+-]?[0-9](_?[0-9])*)?",
            parse_float)]
    #[regex(r"\.[0-9](_?[0-9])*([eE][+-]?[0-9](_?[0-9])*)?", parse_float)]
    #[regex(r"[0-9](_?[0-9])*[eE][+-]?[0-9](_?[0-9])*", parse_float)]
    Float(f64),
    /// Decimal, hexadecimal, octal and binary integer literals.
    #[regex(r"[0-9](_?[0-9])*", parse_decimal)]
    #[regex(r"0[xX](_?[0-9a-fA-F])+", parse_radix)]
    #[regex(r"0[oO](_?[0-7])+", parse_radix)]
    #[regex(r"0[bB](_?[01])+", parse_radix)]
    Integer(i64),
    /// Imaginary literals such as `3j` or `1.5e3J`.
    #[regex(r"([0-9](_?[0-9])*(\.([0-9](_?[0-9])*)?)?|\.[0-9](_?[0-9])*)([eE][+-]?[0-9](_?[0-9])*)?[jJ]",
            parse_imaginary)]
    Imaginary(f64),
    /// String literals with an optional prefix, such as `'a'` or `b"raw"`.
    #[regex(r#"[rRbBuUfF]{0,2}"([^"\\\n]|\\.)*""#, parse_string, allow_greedy = true)]
    #[regex(r#"[rRbBuUfF]{0,2}'([^'\\\n]|\\.)*'"#, parse_string, allow_greedy = true)]
    Str(String),
    /// `True`
    #[token("True")]
    True,
    /// `False`
    #[token("False")]
    False,
    /// `None`
    #[token("None")]
    None,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `in`
    #[token("in")]
    In,
    /// `is`
    #[token("is")]
    Is,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `lambda`
    #[token("lambda")]
    Lambda,
    /// Identifier tokens such as `x` or `open`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Name(String),
    /// `# Comments.`
    #[regex(r"#[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `**`
    #[token("**")]
    DoubleStar,
    /// `//`
    #[token("//")]
    DoubleSlash,
    /// `<<`
    #[token("<<")]
    LeftShift,
    /// `>>`
    #[token(">>")]
    RightShift,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `@`
    #[token("@")]
    At,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(", open_bracket)]
    LParen,
    /// `)`
    #[token(")", close_bracket)]
    RParen,
    /// `[`
    #[token("[", open_bracket)]
    LBracket,
    /// `]`
    #[token("]", close_bracket)]
    RBracket,
    /// `{`
    #[token("{", open_bracket)]
    LBrace,
    /// `}`
    #[token("}", close_bracket)]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `...`
    #[token("...")]
    Ellipsis,
    /// `.`
    #[token(".")]
    Dot,
    /// A line break outside of any bracket pair. Line breaks inside brackets
    /// are skipped.
    #[token("\n", newline)]
    #[token("\r\n", newline)]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\f]+", logos::skip)]
    Ignored,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Float(v) | Self::Imaginary(v) => return write!(f, "'{v}'"),
            Self::Integer(v) => return write!(f, "'{v}'"),
            Self::Str(_) => "string literal",
            Self::Name(name) => return write!(f, "'{name}'"),
            Self::True => "'True'",
            Self::False => "'False'",
            Self::None => "'None'",
            Self::And => "'and'",
            Self::Or => "'or'",
            Self::Not => "'not'",
            Self::In => "'in'",
            Self::Is => "'is'",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::Lambda => "'lambda'",
            Self::DoubleStar => "'**'",
            Self::DoubleSlash => "'//'",
            Self::LeftShift => "'<<'",
            Self::RightShift => "'>>'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::At => "'@'",
            Self::Ampersand => "'&'",
            Self::Pipe => "'|'",
            Self::Caret => "'^'",
            Self::Tilde => "'~'",
            Self::EqualEqual => "'=='",
            Self::BangEqual => "'!='",
            Self::LessEqual => "'<='",
            Self::GreaterEqual => "'>='",
            Self::Less => "'<'",
            Self::Greater => "'>'",
            Self::Equals => "'='",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Comma => "','",
            Self::Colon => "':'",
            Self::Semicolon => "';'",
            Self::Ellipsis => "'...'",
            Self::Dot => "'.'",
            Self::NewLine => "newline",
            Self::Comment | Self::Ignored => "whitespace",
        };
        f.write_str(text)
    }
}

/// Errors raised by individual lexer callbacks.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The input does not start with any known token.
    #[default]
    InvalidToken,
    /// A decimal literal such as `012` uses leading zeros.
    LeadingZeros,
    /// An integer literal does not fit in 64 bits.
    IntegerTooLarge,
    /// A `0x`, `0o` or `0b` prefix is not followed by any digit of its base.
    /// Holds the name of the base.
    MissingDigits(&'static str),
}

/// Additional information carried by the lexer during tokenization.
#[derive(Default)]
pub struct LexerExtras {
    /// How many brackets are currently open. Line breaks are only significant
    /// when this is zero.
    pub brackets: usize,
}

/// Tokenizes `source` into `(token, column)` pairs.
///
/// Columns are 1-based byte offsets into `source`.
///
/// # Errors
/// Returns a [`ParseError`] at the first byte sequence that is not a valid
/// token, or for integer literals that are malformed or do not fit in `i64`.
///
/// # Example
/// ```
/// use reckon::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2 ** 10").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Integer(2), 1), (Token::DoubleStar, 3), (Token::Integer(10), 6)]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        let column = lexer.span().start + 1;
        match token {
            Ok(tok) => tokens.push((tok, column)),
            Err(LexError::IntegerTooLarge) => return Err(ParseError::LiteralTooLarge { column }),
            Err(LexError::LeadingZeros) => {
                return Err(ParseError::InvalidToken { token: lexer.slice().to_string(),
                                                      detail: "leading zeros in decimal \
                                                               integer literals are not \
                                                               permitted",
                                                      column });
            },
            Err(LexError::MissingDigits(base)) => {
                return Err(ParseError::InvalidToken { token: lexer.slice().to_string(),
                                                      detail: base,
                                                      column });
            },
            Err(LexError::InvalidToken) => {
                let detail = missing_digits(lexer.slice()).unwrap_or("invalid character");
                return Err(ParseError::InvalidToken { token: lexer.slice().to_string(),
                                                      detail,
                                                      column });
            },
        }
    }

    Ok(tokens)
}

fn open_bracket(lex: &mut logos::Lexer<Token>) {
    lex.extras.brackets += 1;
}

fn close_bracket(lex: &mut logos::Lexer<Token>) {
    lex.extras.brackets = lex.extras.brackets.saturating_sub(1);
}

fn newline(lex: &mut logos::Lexer<Token>) -> FilterResult<(), LexError> {
    if lex.extras.brackets > 0 {
        FilterResult::Skip
    } else {
        FilterResult::Emit(())
    }
}

/// Parses a floating-point literal, ignoring digit separators.
fn parse_float(lex: &logos::Lexer<Token>) -> Result<f64, LexError> {
    lex.slice()
       .replace('_', "")
       .parse()
       .map_err(|_| LexError::InvalidToken)
}

/// Parses an imaginary literal's magnitude, dropping the `j` suffix.
fn parse_imaginary(lex: &logos::Lexer<Token>) -> Result<f64, LexError> {
    let slice = lex.slice();
    slice[..slice.len() - 1].replace('_', "")
                            .parse()
                            .map_err(|_| LexError::InvalidToken)
}

/// Parses a decimal integer literal.
///
/// Non-zero literals may not start with `0`; `0`, `00` and `0_0` are all zero.
fn parse_decimal(lex: &logos::Lexer<Token>) -> Result<i64, LexError> {
    // A bare `0x` falls back to this rule with the prefix still in the slice.
    if let Some(base) = missing_digits(lex.slice()) {
        return Err(LexError::MissingDigits(base));
    }
    let digits = lex.slice().replace('_', "");
    if digits.starts_with('0') && digits.bytes().any(|b| b != b'0') {
        return Err(LexError::LeadingZeros);
    }
    digits.parse().map_err(|_| LexError::IntegerTooLarge)
}

fn missing_digits(slice: &str) -> Option<&'static str> {
    match slice.as_bytes() {
        [b'0', b'x' | b'X', ..] => Some("invalid hexadecimal literal"),
        [b'0', b'o' | b'O', ..] => Some("invalid octal literal"),
        [b'0', b'b' | b'B', ..] => Some("invalid binary literal"),
        _ => None,
    }
}

/// Parses a `0x`, `0o` or `0b` prefixed integer literal.
fn parse_radix(lex: &logos::Lexer<Token>) -> Result<i64, LexError> {
    let slice = lex.slice();
    let radix = match slice.as_bytes()[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        _ => 2,
    };
    i64::from_str_radix(&slice[2..].replace('_', ""), radix).map_err(|_| {
                                                                LexError::IntegerTooLarge
                                                            })
}

/// Extracts the body of a string literal without its prefix and quotes.
///
/// Escape sequences are kept verbatim; string values are never evaluated.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let start = slice.find(['"', '\'']).unwrap_or(0);
    slice[start + 1..slice.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap()
                        .into_iter()
                        .map(|(token, _)| token)
                        .collect()
    }

    #[test]
    fn numbers_in_every_base() {
        assert_eq!(kinds("0x1F 0o17 0b101 1_000 00"),
                   vec![Token::Integer(31),
                        Token::Integer(15),
                        Token::Integer(5),
                        Token::Integer(1000),
                        Token::Integer(0)]);
    }

    #[test]
    fn float_forms() {
        assert_eq!(kinds("1.5 1. .5 1e3 2.5E-1"),
                   vec![Token::Float(1.5),
                        Token::Float(1.0),
                        Token::Float(0.5),
                        Token::Float(1000.0),
                        Token::Float(0.25)]);
    }

    #[test]
    fn imaginary_and_strings() {
        assert_eq!(kinds("3j 'a' b\"x\""),
                   vec![Token::Imaginary(3.0),
                        Token::Str("a".to_string()),
                        Token::Str("x".to_string())]);
    }

    #[test]
    fn keywords_win_over_names() {
        assert_eq!(kinds("not note"),
                   vec![Token::Not, Token::Name("note".to_string())]);
    }

    #[test]
    fn operators_take_the_longest_match() {
        assert_eq!(kinds("2**3//4"),
                   vec![Token::Integer(2),
                        Token::DoubleStar,
                        Token::Integer(3),
                        Token::DoubleSlash,
                        Token::Integer(4)]);
    }

    #[test]
    fn newlines_inside_brackets_are_skipped() {
        assert_eq!(kinds("(1\n+ 2)\n"),
                   vec![Token::LParen,
                        Token::Integer(1),
                        Token::Plus,
                        Token::Integer(2),
                        Token::RParen,
                        Token::NewLine]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(kinds("1 # one"), vec![Token::Integer(1)]);
    }

    #[test]
    fn leading_zeros_are_rejected() {
        assert!(matches!(tokenize("012"), Err(ParseError::InvalidToken { column: 1, .. })));
    }

    #[test]
    fn radix_prefix_without_digits_names_its_base() {
        for (src, detail) in [("0b", "invalid binary literal"),
                              ("0X", "invalid hexadecimal literal"),
                              ("1 + 0o", "invalid octal literal")]
        {
            match tokenize(src) {
                Err(ParseError::InvalidToken { detail: got, .. }) => assert_eq!(got, detail, "{src}"),
                other => panic!("{src:?} gave {other:?}"),
            }
        }
        assert_eq!(kinds("0b1 0o7 0x_f"),
                   vec![Token::Integer(1), Token::Integer(7), Token::Integer(15)]);
    }

    #[test]
    fn huge_integer_literal_is_reported() {
        assert!(matches!(tokenize("1 + 99999999999999999999"),
                         Err(ParseError::LiteralTooLarge { column: 5 })));
    }

    #[test]
    fn unknown_character_is_reported_with_column() {
        assert!(matches!(tokenize("1 $ 2"), Err(ParseError::InvalidToken { column: 3, .. })));
    }
}

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Floating-point number
    ///
    /// Must contain a decimal point; there is no exponent form.
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// 0.5
    /// ```
    Double(f64),

    /// Integer
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 314
    /// ```
    Integer(i64),

    /// String literal enclosed in single or double quotes
    ///
    /// The text is kept exactly as written, quotes included. There is no
    /// escape processing, so a literal cannot contain its own quote
    /// character.
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// 'item #1'
    /// ```
    String(String),

    /// Boolean values
    ///
    /// # Examples
    /// ```text
    /// true
    /// false
    /// ```
    Boolean(bool),

    /// Null value
    Null,

    // Identifiers
    /// Variable or function identifier
    ///
    /// Must start with an ASCII letter, underscore, or dollar sign,
    /// followed by letters, digits, underscores, or dollar signs,
    /// optionally ending in a single prime. A trailing prime marks a
    /// next-state variable read and is part of the token text.
    ///
    /// # Examples
    /// ```text
    /// amount
    /// item_count
    /// balance'
    /// ```
    Identifier(String),

    // Comparison
    /// Equality operator
    EqEq,

    /// Inequality operator
    NotEq,

    /// Less than
    Lt,

    /// Greater than
    Gt,

    /// Less than or equal
    LtEq,

    /// Greater than or equal
    GtEq,

    // Arithmetic
    /// Addition
    Plus,

    /// Subtraction or unary negation
    Minus,

    /// Multiplication
    Star,

    /// Division
    Slash,

    // Logical
    /// Logical AND
    ///
    /// # Examples
    /// ```text
    /// amount > 0 && approved == true
    /// ```
    And,

    /// Logical OR
    ///
    /// # Examples
    /// ```text
    /// role == "admin" || role == "auditor"
    /// ```
    Or,

    /// Logical NOT
    Exclamation,

    // Delimiters
    /// Left parenthesis for grouping or function calls
    LParen,

    /// Right parenthesis
    RParen,

    /// Comma for separating function arguments
    Comma,

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Double(n) => write!(f, "{n}"),
            Token::Integer(n) => write!(f, "{n}"),
            Token::String(s) => write!(f, "{s}"),
            Token::Boolean(b) => write!(f, "{b}"),
            Token::Null => write!(f, "null"),
            Token::Identifier(name) => write!(f, "identifier '{name}'"),
            Token::EqEq => write!(f, "'=='"),
            Token::NotEq => write!(f, "'!='"),
            Token::Lt => write!(f, "'<'"),
            Token::Gt => write!(f, "'>'"),
            Token::LtEq => write!(f, "'<='"),
            Token::GtEq => write!(f, "'>='"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::And => write!(f, "'&&'"),
            Token::Or => write!(f, "'||'"),
            Token::Exclamation => write!(f, "'!'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

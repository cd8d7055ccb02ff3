use thiserror::Error;

use crate::ast::Token;

/// Lexical error, positioned by character offset into the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("unexpected '{ch}' at position {position} (did you mean '{hint}'?)")]
    IncompleteOperator {
        ch: char,
        position: usize,
        hint: &'static str,
    },

    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },
}

/// Legal first character of an identifier. `$` is reserved by the
/// escaping scheme of [`crate::ident::to_valid_identifier`] but reads
/// like any other letter here.
pub(crate) fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

/// Legal continuation character of an identifier, the trailing prime
/// aside.
pub(crate) fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    token_start: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            token_start: 0,
        }
    }

    /// Offset of the most recently returned token.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if is_identifier_part(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        // A single trailing prime belongs to the identifier (next-state
        // read), which is also what keeps it apart from a string quote.
        if self.current_char() == Some('\'') {
            result.push('\'');
            self.advance();
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<Token, LexError> {
        let start = self.position;
        let mut result = String::from(quote);
        self.advance();

        while let Some(ch) = self.current_char() {
            result.push(ch);
            self.advance();
            if ch == quote {
                // Raw text including both quotes; no escape processing.
                return Ok(Token::String(result));
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut number = String::new();
        let mut is_double = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_double
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_double = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if is_double {
            match number.parse::<f64>() {
                Ok(n) => Ok(Token::Double(n)),
                Err(_) => Err(LexError::InvalidNumber {
                    text: number,
                    position: start,
                }),
            }
        } else {
            match number.parse::<i64>() {
                Ok(n) => Ok(Token::Integer(n)),
                Err(_) => Err(LexError::InvalidNumber {
                    text: number,
                    position: start,
                }),
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.position;

        match self.current_char() {
            None => Ok(Token::Eof),
            Some('&') => {
                if self.peek_char(1) == Some('&') {
                    self.advance();
                    self.advance();
                    Ok(Token::And)
                } else {
                    Err(LexError::IncompleteOperator {
                        ch: '&',
                        position: self.position,
                        hint: "&&",
                    })
                }
            }
            Some('|') => {
                if self.peek_char(1) == Some('|') {
                    self.advance();
                    self.advance();
                    Ok(Token::Or)
                } else {
                    Err(LexError::IncompleteOperator {
                        ch: '|',
                        position: self.position,
                        hint: "||",
                    })
                }
            }
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::EqEq)
                } else {
                    Err(LexError::IncompleteOperator {
                        ch: '=',
                        position: self.position,
                        hint: "==",
                    })
                }
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::NotEq)
                } else {
                    self.advance();
                    Ok(Token::Exclamation)
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::GtEq)
                } else {
                    self.advance();
                    Ok(Token::Gt)
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::LtEq)
                } else {
                    self.advance();
                    Ok(Token::Lt)
                }
            }
            Some('+') => {
                self.advance();
                Ok(Token::Plus)
            }
            Some('-') => {
                self.advance();
                Ok(Token::Minus)
            }
            Some('*') => {
                self.advance();
                Ok(Token::Star)
            }
            Some('/') => {
                self.advance();
                Ok(Token::Slash)
            }
            Some(',') => {
                self.advance();
                Ok(Token::Comma)
            }
            Some('(') => {
                self.advance();
                Ok(Token::LParen)
            }
            Some(')') => {
                self.advance();
                Ok(Token::RParen)
            }
            Some('"') => self.read_string('"'),
            Some('\'') => self.read_string('\''),
            Some(ch) if is_identifier_start(ch) => {
                let ident = self.read_identifier();

                // A primed identifier never matches a keyword.
                match ident.as_str() {
                    "true" => Ok(Token::Boolean(true)),
                    "false" => Ok(Token::Boolean(false)),
                    "null" => Ok(Token::Null),
                    _ => Ok(Token::Identifier(ident)),
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) => Err(LexError::UnexpectedChar {
                ch,
                position: self.position,
            }),
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("true false null");
    assert_eq!(lexer.next_token(), Ok(Token::Boolean(true)));
    assert_eq!(lexer.next_token(), Ok(Token::Boolean(false)));
    assert_eq!(lexer.next_token(), Ok(Token::Null));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_operators() {
    let mut lexer = Lexer::new("&& || ! == != < > <= >= + - * / ( ) ,");
    assert_eq!(lexer.next_token(), Ok(Token::And));
    assert_eq!(lexer.next_token(), Ok(Token::Or));
    assert_eq!(lexer.next_token(), Ok(Token::Exclamation));
    assert_eq!(lexer.next_token(), Ok(Token::EqEq));
    assert_eq!(lexer.next_token(), Ok(Token::NotEq));
    assert_eq!(lexer.next_token(), Ok(Token::Lt));
    assert_eq!(lexer.next_token(), Ok(Token::Gt));
    assert_eq!(lexer.next_token(), Ok(Token::LtEq));
    assert_eq!(lexer.next_token(), Ok(Token::GtEq));
    assert_eq!(lexer.next_token(), Ok(Token::Plus));
    assert_eq!(lexer.next_token(), Ok(Token::Minus));
    assert_eq!(lexer.next_token(), Ok(Token::Star));
    assert_eq!(lexer.next_token(), Ok(Token::Slash));
    assert_eq!(lexer.next_token(), Ok(Token::LParen));
    assert_eq!(lexer.next_token(), Ok(Token::RParen));
    assert_eq!(lexer.next_token(), Ok(Token::Comma));
}

#[test]
fn test_primed_identifier_vs_string() {
    let mut lexer = Lexer::new("x' == 'a'");
    assert_eq!(
        lexer.next_token(),
        Ok(Token::Identifier("x'".to_string()))
    );
    assert_eq!(lexer.next_token(), Ok(Token::EqEq));
    assert_eq!(lexer.next_token(), Ok(Token::String("'a'".to_string())));
}

#[test]
fn test_strings_keep_their_quotes() {
    let mut lexer = Lexer::new(r#""hello" 'wo rld'"#);
    assert_eq!(
        lexer.next_token(),
        Ok(Token::String("\"hello\"".to_string()))
    );
    assert_eq!(
        lexer.next_token(),
        Ok(Token::String("'wo rld'".to_string()))
    );
}

#[test]
fn test_numbers() {
    let mut lexer = Lexer::new("42 3.14 0.5");
    assert_eq!(lexer.next_token(), Ok(Token::Integer(42)));
    assert_eq!(lexer.next_token(), Ok(Token::Double(3.14)));
    assert_eq!(lexer.next_token(), Ok(Token::Double(0.5)));
}

#[test]
fn test_lex_errors() {
    let mut lexer = Lexer::new("a & b");
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("a".to_string())));
    assert_eq!(
        lexer.next_token(),
        Err(LexError::IncompleteOperator {
            ch: '&',
            position: 2,
            hint: "&&",
        })
    );

    let mut lexer = Lexer::new("\"open");
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnterminatedString { position: 0 })
    );

    let mut lexer = Lexer::new("99999999999999999999");
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::InvalidNumber { .. })
    ));
}

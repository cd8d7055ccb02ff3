use std::mem;

use thiserror::Error;

use crate::{
    ast::{Node, NodeKind, Token},
    lexer::{LexError, Lexer},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found} at position {position}")]
    UnexpectedToken {
        expected: String,
        found: Token,
        position: usize,
    },
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    token_position: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let token_position = lexer.token_start();
        Ok(Parser {
            lexer,
            current_token,
            token_position,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.token_position = self.lexer.token_start();
        Ok(())
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if mem::discriminant(&self.current_token) != mem::discriminant(&expected) {
            return Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.current_token.clone(),
                position: self.token_position,
            });
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    /// Parse primary expressions (atoms): literals, variables, function
    /// calls, and parenthesized expressions.
    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            // Literals
            Token::Double(n) => {
                self.advance()?;
                Ok(Node::leaf(NodeKind::LitDouble(n)))
            }
            Token::Integer(n) => {
                self.advance()?;
                Ok(Node::leaf(NodeKind::LitInteger(n)))
            }
            Token::String(s) => {
                self.advance()?;
                Ok(Node::leaf(NodeKind::LitString(s)))
            }
            Token::Boolean(b) => {
                self.advance()?;
                Ok(Node::leaf(NodeKind::LitBoolean(b)))
            }
            Token::Null => {
                self.advance()?;
                Ok(Node::leaf(NodeKind::LitNull))
            }

            Token::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }

            // Variable reference or function call
            Token::Identifier(name) => {
                self.advance()?;
                if self.check(&Token::LParen) {
                    self.parse_arguments(name)
                } else {
                    Ok(Node::leaf(NodeKind::Variable(name)))
                }
            }

            token => Err(ParseError::UnexpectedToken {
                expected: "an expression".to_string(),
                found: token,
                position: self.token_position,
            }),
        }
    }

    fn parse_arguments(&mut self, name: String) -> Result<Node, ParseError> {
        self.expect(Token::LParen)?;

        let mut args = vec![];
        if !self.check(&Token::RParen) {
            args.push(self.parse_expression()?);
            while self.check(&Token::Comma) {
                self.advance()?;
                args.push(self.parse_expression()?);
            }
        }

        self.expect(Token::RParen)?;
        Ok(Node::function(name, args))
    }

    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        if self.check(&Token::Minus) {
            self.advance()?;
            let operand = self.parse_unary()?;
            Ok(Node::unary(NodeKind::Negation, operand))
        } else {
            self.parse_primary()
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let kind = match &self.current_token {
                Token::Star => NodeKind::Mult,
                Token::Slash => NodeKind::Div,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_unary()?;
            left = Node::binary(kind, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let kind = match &self.current_token {
                Token::Plus => NodeKind::Plus,
                Token::Minus => NodeKind::Minus,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = Node::binary(kind, left, right);
        }
        Ok(left)
    }

    /// Comparisons do not chain: at most one comparison operator per
    /// level, so `a < b < c` leaves the second `<` for the caller to
    /// reject.
    fn parse_comparison(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_additive()?;

        if let Some(kind) = match &self.current_token {
            Token::EqEq => Some(NodeKind::Equal),
            Token::NotEq => Some(NodeKind::NotEqual),
            Token::Lt => Some(NodeKind::LessThan),
            Token::Gt => Some(NodeKind::GreaterThan),
            Token::LtEq => Some(NodeKind::AtMost),
            Token::GtEq => Some(NodeKind::AtLeast),
            _ => None,
        } {
            self.advance()?;
            let right = self.parse_additive()?;
            left = Node::binary(kind, left, right);
        }
        Ok(left)
    }

    // `!` binds looser than comparisons: `!a == b` negates the whole
    // comparison.
    fn parse_not(&mut self) -> Result<Node, ParseError> {
        if self.check(&Token::Exclamation) {
            self.advance()?;
            let operand = self.parse_not()?;
            Ok(Node::unary(NodeKind::Not, operand))
        } else {
            self.parse_comparison()
        }
    }

    fn parse_and(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_not()?;

        while self.check(&Token::And) {
            self.advance()?;
            let right = self.parse_not()?;
            left = Node::binary(NodeKind::And, left, right);
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(&Token::Or) {
            self.advance()?;
            let right = self.parse_and()?;
            left = Node::binary(NodeKind::Or, left, right);
        }
        Ok(left)
    }

    pub fn parse_expression(&mut self) -> Result<Node, ParseError> {
        self.parse_or()
    }

    /// Parse a complete guard, requiring the whole input to be consumed.
    /// A successful parse always yields a root with exactly one child.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(Token::Eof)?;
        Ok(Node::root(expr))
    }
}

// tests/lexer_tests.rs

use guard_lang::ast::Token;
use guard_lang::lexer::{LexError, Lexer};

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("!", Token::Exclamation),
        ("+", Token::Plus),
        ("-", Token::Minus),
        ("*", Token::Star),
        ("/", Token::Slash),
        ("(", Token::LParen),
        (")", Token::RParen),
        (",", Token::Comma),
        ("<", Token::Lt),
        (">", Token::Gt),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

// ============================================================================
// Two Character Tokens
// ============================================================================

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![
        ("==", Token::EqEq),
        ("!=", Token::NotEq),
        ("<=", Token::LtEq),
        (">=", Token::GtEq),
        ("&&", Token::And),
        ("||", Token::Or),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_two_char_vs_single_char() {
    // Valid: < followed by ==
    let mut lexer = Lexer::new("< ==");
    assert_eq!(lexer.next_token().unwrap(), Token::Lt);
    assert_eq!(lexer.next_token().unwrap(), Token::EqEq);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);

    // Valid: <= as single token
    let mut lexer = Lexer::new("<=");
    assert_eq!(lexer.next_token().unwrap(), Token::LtEq);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);

    // ! is NOT when no = follows
    let mut lexer = Lexer::new("!x != y");
    assert_eq!(lexer.next_token().unwrap(), Token::Exclamation);
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("x".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::NotEq);
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("y".to_string())
    );
}

#[test]
fn test_incomplete_operators() {
    let test_cases = vec![("a & b", '&', "&&"), ("a | b", '|', "||"), ("a = b", '=', "==")];

    for (input, ch, hint) in test_cases {
        let mut lexer = Lexer::new(input);
        lexer.next_token().unwrap(); // Gets the identifier
        let err = lexer.next_token().unwrap_err();
        assert_eq!(
            err,
            LexError::IncompleteOperator {
                ch,
                position: 2,
                hint,
            },
            "Failed for input: {}",
            input
        );
        assert!(err.to_string().contains(&format!("did you mean '{}'", hint)));
    }
}

// ============================================================================
// Keywords
// ============================================================================

#[test]
fn test_keywords() {
    let test_cases = vec![
        ("true", Token::Boolean(true)),
        ("false", Token::Boolean(false)),
        ("null", Token::Null),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_keywords_vs_identifiers() {
    // Keyword prefixes stay identifiers
    let test_cases = vec!["truth", "falsehood", "nullable", "True", "NULL"];

    for input in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::Identifier(input.to_string()),
            "Failed for input: {}",
            input
        );
    }

    // A primed keyword is an identifier, not a keyword
    let mut lexer = Lexer::new("true'");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("true'".to_string())
    );
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifiers() {
    let test_cases = vec!["amount", "item_count", "_private", "x2", "a$20b", "$x"];

    for input in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::Identifier(input.to_string()),
            "Failed for input: {}",
            input
        );
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_primed_identifiers() {
    let mut lexer = Lexer::new("balance' >= balance");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("balance'".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::GtEq);
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("balance".to_string())
    );
}

#[test]
fn test_prime_ends_the_identifier() {
    // Only one trailing prime is consumed; a second one starts a string
    let mut lexer = Lexer::new("x'y");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("x'".to_string())
    );
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("y".to_string())
    );

    let mut lexer = Lexer::new("x''");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("x'".to_string())
    );
    assert_eq!(
        lexer.next_token().unwrap_err(),
        LexError::UnterminatedString { position: 2 }
    );
}

#[test]
fn test_primed_identifier_vs_string() {
    let mut lexer = Lexer::new("x' == 'a'");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("x'".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::EqEq);
    assert_eq!(lexer.next_token().unwrap(), Token::String("'a'".to_string()));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_strings_keep_their_quotes() {
    let test_cases = vec![
        (r#""hello""#, "\"hello\""),
        ("'hello'", "'hello'"),
        ("'two words'", "'two words'"),
        ("''", "''"),
        // No escape processing: the other quote kind passes through
        (r#"'he said "hi"'"#, "'he said \"hi\"'"),
        (r#""it's""#, "\"it's\""),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(
            lexer.next_token().unwrap(),
            Token::String(expected.to_string()),
            "Failed for input: {}",
            input
        );
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new("\"open");
    assert_eq!(
        lexer.next_token().unwrap_err(),
        LexError::UnterminatedString { position: 0 }
    );

    let mut lexer = Lexer::new("x == 'open");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert_eq!(
        lexer.next_token().unwrap_err(),
        LexError::UnterminatedString { position: 5 }
    );
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers() {
    let mut lexer = Lexer::new("42 0 3.14 0.5 123.456");
    assert_eq!(lexer.next_token().unwrap(), Token::Integer(42));
    assert_eq!(lexer.next_token().unwrap(), Token::Integer(0));
    assert_eq!(lexer.next_token().unwrap(), Token::Double(3.14));
    assert_eq!(lexer.next_token().unwrap(), Token::Double(0.5));
    assert_eq!(lexer.next_token().unwrap(), Token::Double(123.456));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_dot_needs_digits_on_both_sides() {
    // "1." is an integer followed by a stray dot
    let mut lexer = Lexer::new("1.");
    assert_eq!(lexer.next_token().unwrap(), Token::Integer(1));
    assert_eq!(
        lexer.next_token().unwrap_err(),
        LexError::UnexpectedChar {
            ch: '.',
            position: 1
        }
    );

    // ".5" does not start a number
    let mut lexer = Lexer::new(".5");
    assert_eq!(
        lexer.next_token().unwrap_err(),
        LexError::UnexpectedChar {
            ch: '.',
            position: 0
        }
    );

    // Only one decimal point per number
    let mut lexer = Lexer::new("3.14.15");
    assert_eq!(lexer.next_token().unwrap(), Token::Double(3.14));
    assert_eq!(
        lexer.next_token().unwrap_err(),
        LexError::UnexpectedChar {
            ch: '.',
            position: 4
        }
    );
}

#[test]
fn test_integer_overflow() {
    let mut lexer = Lexer::new("99999999999999999999");
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::InvalidNumber { .. })
    ));
}

// ============================================================================
// Errors and Positions
// ============================================================================

#[test]
fn test_unexpected_characters() {
    let test_cases = vec![("#", '#', 0), ("a @ b", '@', 2), ("x %", '%', 2)];

    for (input, ch, position) in test_cases {
        let mut lexer = Lexer::new(input);
        let mut result = lexer.next_token();
        while let Ok(token) = &result {
            assert_ne!(*token, Token::Eof, "No error for input: {}", input);
            result = lexer.next_token();
        }
        assert_eq!(
            result.unwrap_err(),
            LexError::UnexpectedChar { ch, position },
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_token_start_positions() {
    let mut lexer = Lexer::new("  amount >= 100");
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), 2);
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), 9);
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), 12);
}

#[test]
fn test_eof_is_repeatable() {
    let mut lexer = Lexer::new("x");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("x".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_whitespace_forms() {
    let mut lexer = Lexer::new("a\t&&\n  b");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("a".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("b".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

// ============================================================================
// Full Guards
// ============================================================================

#[test]
fn test_realistic_guard() {
    let mut lexer = Lexer::new("(amount > 1000.50 && approved == true) || override'");
    let expected = vec![
        Token::LParen,
        Token::Identifier("amount".to_string()),
        Token::Gt,
        Token::Double(1000.50),
        Token::And,
        Token::Identifier("approved".to_string()),
        Token::EqEq,
        Token::Boolean(true),
        Token::RParen,
        Token::Or,
        Token::Identifier("override'".to_string()),
        Token::Eof,
    ];

    for token in expected {
        assert_eq!(lexer.next_token().unwrap(), token);
    }
}

#[test]
fn test_function_call_tokens() {
    let mut lexer = Lexer::new("min(x, 2) != null");
    let expected = vec![
        Token::Identifier("min".to_string()),
        Token::LParen,
        Token::Identifier("x".to_string()),
        Token::Comma,
        Token::Integer(2),
        Token::RParen,
        Token::NotEq,
        Token::Null,
        Token::Eof,
    ];

    for token in expected {
        assert_eq!(lexer.next_token().unwrap(), token);
    }
}

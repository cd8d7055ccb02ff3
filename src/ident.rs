//! Identifier validation and sanitation.
//!
//! Process models name their variables freely ("total amount",
//! "Betrag (EUR)"); guards need them as grammar identifiers. The
//! mapping keeps legal characters and escapes every other code point
//! as `$XX` per UTF-8 byte, uppercase hex, so distinct names stay
//! distinct and the result is always a legal identifier.

use thiserror::Error;

use crate::lexer::{is_identifier_part, is_identifier_start};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot transform an empty string into a valid identifier")]
pub struct InvalidIdentifierError;

/// Whether `text` is a legal identifier of the guard grammar (one
/// trailing prime allowed) or one of the keywords `true`, `false`,
/// `null`.
pub fn is_valid_identifier(text: &str) -> bool {
    if matches!(text, "true" | "false" | "null") {
        return true;
    }
    let body = text.strip_suffix('\'').unwrap_or(text);
    let mut chars = body.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

/// Maps an arbitrary non-empty string to a legal identifier.
///
/// Identifier characters pass through; every other code point becomes
/// `$XX` escapes of its UTF-8 bytes. If the first character is still
/// not a legal start (a digit), a `_` is prefixed. Note a trailing
/// prime is escaped like any other character; call
/// [`is_valid_identifier`] first when primed names should pass
/// through untouched.
///
/// # Examples
///
/// ```
/// use guard_lang::ident::to_valid_identifier;
///
/// assert_eq!(to_valid_identifier("total amount").unwrap(), "total$20amount");
/// assert_eq!(to_valid_identifier("2nd").unwrap(), "_2nd");
/// ```
pub fn to_valid_identifier(text: &str) -> Result<String, InvalidIdentifierError> {
    if text.is_empty() {
        return Err(InvalidIdentifierError);
    }
    let mut result = String::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        if is_identifier_part(ch) {
            result.push(ch);
        } else {
            for byte in ch.encode_utf8(&mut buf).bytes() {
                result.push_str(&format!("${byte:02X}"));
            }
        }
    }
    if !result.starts_with(is_identifier_start) {
        result.insert(0, '_');
    }
    Ok(result)
}

#[test]
fn test_valid_identifiers() {
    assert!(is_valid_identifier("x"));
    assert!(is_valid_identifier("x'"));
    assert!(is_valid_identifier("_tmp"));
    assert!(is_valid_identifier("caseID_2"));
    assert!(is_valid_identifier("$20"));
    assert!(is_valid_identifier("true"));
    assert!(is_valid_identifier("null"));
}

#[test]
fn test_invalid_identifiers() {
    assert!(!is_valid_identifier(""));
    assert!(!is_valid_identifier("'"));
    assert!(!is_valid_identifier("2nd"));
    assert!(!is_valid_identifier("x''"));
    assert!(!is_valid_identifier("total amount"));
    assert!(!is_valid_identifier("a-b"));
}

#[test]
fn test_to_valid_identifier_escapes() {
    assert_eq!(to_valid_identifier("amount").unwrap(), "amount");
    assert_eq!(to_valid_identifier("total amount").unwrap(), "total$20amount");
    assert_eq!(to_valid_identifier("a.b").unwrap(), "a$2Eb");
    assert_eq!(to_valid_identifier("x'").unwrap(), "x$27");
    assert_eq!(to_valid_identifier("Betrag (\u{20ac})").unwrap(), "Betrag$20$28$E2$82$AC$29");
    assert_eq!(to_valid_identifier("2nd").unwrap(), "_2nd");
    assert!(to_valid_identifier("").is_err());
}

#[test]
fn test_sanitized_names_are_valid() {
    for name in ["total amount", "2nd", "a.b", "x'", "\u{e9}t\u{e9}"] {
        assert!(is_valid_identifier(&to_valid_identifier(name).unwrap()));
    }
}

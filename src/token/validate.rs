//! # Character classes
//! Byte-level classification shared by the lexer and by consumers that want to check
//! user-provided names before inserting them into a document.

/// Lookup table for bytes which could appear in an identifier. This includes the
/// ascii printable characters with "{}(),= \t\n\\#%\"" removed, as well as bytes
/// that could appear in non-ascii UTF-8.
///
/// Since every byte `>= 0x80` is permitted, a run of permitted bytes never ends in the
/// middle of a multi-byte char.
pub(crate) static IDENTIFIER_ALLOWED: [bool; 256] = {
    const PR: bool = false; // disallowed printable bytes
    const CT: bool = false; // non-printable ascii
    const __: bool = true; // permitted bytes
    [
        //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
        CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, // 0
        CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, // 1
        CT, __, PR, PR, __, PR, __, __, PR, PR, __, __, PR, __, __, __, // 2
        __, __, __, __, __, __, __, __, __, __, __, __, __, PR, __, __, // 3
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
        __, __, __, __, __, __, __, __, __, __, __, __, PR, __, __, __, // 5
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
        __, __, __, __, __, __, __, __, __, __, __, PR, __, PR, __, CT, // 7
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
    ]
};

/// Whether `byte` may appear in an identifier.
#[inline]
pub fn is_identifier_byte(byte: u8) -> bool {
    IDENTIFIER_ALLOWED[byte as usize]
}

/// The length of the longest identifier prefix of `input`.
#[inline]
pub fn identifier_len(input: &[u8]) -> usize {
    input
        .iter()
        .position(|&b| !IDENTIFIER_ALLOWED[b as usize])
        .unwrap_or(input.len())
}

/// Check if a given string is a non-empty identifier.
#[inline]
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && identifier_len(s.as_bytes()) == s.len()
}

/// Check if a given string is valid as a macro variable: an identifier which does not
/// begin with an ASCII digit.
#[inline]
pub fn is_variable(s: &str) -> bool {
    is_identifier(s) && !s.as_bytes()[0].is_ascii_digit()
}

/// Check if a given string is a non-empty run of ASCII digits.
#[inline]
pub fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_len() {
        assert_eq!(identifier_len(b"key0, title"), 4);
        assert_eq!(identifier_len(b"a:b.c-d_e/f"), 11);
        assert_eq!(identifier_len(b"{x}"), 0);
        assert_eq!(identifier_len("üçx=".as_bytes()), 5);
        assert_eq!(identifier_len(b""), 0);
    }

    #[test]
    fn test_is_variable() {
        assert!(is_variable("a123"));
        assert!(!is_variable("1234"));
        assert!(!is_variable("a{"));
        assert!(!is_variable(" "));
        assert!(!is_variable(""));
    }

    #[test]
    fn test_is_number() {
        assert!(is_number("2024"));
        assert!(!is_number("2024a"));
        assert!(!is_number(""));
    }
}

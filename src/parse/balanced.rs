use memchr::{memchr2, memchr3};

/// The net count of `{` minus `}` in `text`.
///
/// A `\` escapes the following byte, so `\{` and `\}` are not counted. Curly brackets inside
/// a math run delimited by `$...$` or `$$...$$` are not counted either. A `$` or `$$` which
/// is never closed by the same number of dollars does not start a math run and is treated as
/// ordinary text.
pub fn brace_balance(text: &str) -> isize {
    let bytes = text.as_bytes();
    let mut balance = 0;
    let mut idx = 0;

    while let Some(offset) = next_special(&bytes[idx..]) {
        idx += offset;
        match bytes[idx] {
            b'\\' => idx += 2,
            b'$' => {
                let double = bytes.get(idx + 1) == Some(&b'$');
                let open = if double { 2 } else { 1 };
                idx = match math_len(&bytes[idx + open..], double) {
                    Some(len) => idx + open + len + open,
                    None => idx + open,
                };
            }
            b'{' => {
                balance += 1;
                idx += 1;
            }
            _ => {
                balance -= 1;
                idx += 1;
            }
        }
        if idx >= bytes.len() {
            break;
        }
    }

    balance
}

fn next_special(bytes: &[u8]) -> Option<usize> {
    match (memchr3(b'{', b'}', b'\\', bytes), memchr::memchr(b'$', bytes)) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// The length of the body of a math run, up to but excluding the closing dollars.
fn math_len(bytes: &[u8], double: bool) -> Option<usize> {
    let mut idx = 0;
    while let Some(offset) = memchr2(b'\\', b'$', &bytes[idx..]) {
        idx += offset;
        match bytes[idx] {
            b'\\' => idx += 2,
            _ if !double => return Some(idx),
            _ if bytes.get(idx + 1) == Some(&b'$') => return Some(idx),
            _ => idx += 1,
        }
        if idx >= bytes.len() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brace_balance() {
        assert_eq!(brace_balance(""), 0);
        assert_eq!(brace_balance("{a}{b{c}}"), 0);
        assert_eq!(brace_balance("{unbalanced $x$"), 1);
        assert_eq!(brace_balance("a}"), -1);
        assert_eq!(brace_balance("}{"), 0);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(brace_balance("\\{"), 0);
        assert_eq!(brace_balance("\\\\{"), 1);
        assert_eq!(brace_balance("a\\"), 0);
    }

    #[test]
    fn test_math() {
        assert_eq!(brace_balance("$\\alpha$ and {nested}"), 0);
        assert_eq!(brace_balance("$x_{1$"), 0);
        assert_eq!(brace_balance("$$ a $ { $$"), 0);
        // never closed, so not math
        assert_eq!(brace_balance("$ {"), 1);
        assert_eq!(brace_balance("$$ { $"), 1);
        assert_eq!(brace_balance("$\\$ {$"), 0);
    }
}

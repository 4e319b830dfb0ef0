//! String utilities
//!
//! Helpers for cutting user code and model output down to log-friendly sizes.

/// Truncate a string to at most `max_chars` characters.
///
/// Always cuts at a character boundary, so multi-byte code points in source
/// code or model output never cause a panic.
///
/// ```
/// use code_converter::utils::truncate_str;
///
/// assert_eq!(truncate_str("fn main() {}", 7), "fn main");
/// assert_eq!(truncate_str("print('héllo')", 9), "print('hé");
/// ```
pub fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate and append `suffix` when something was cut off.
///
/// ```
/// use code_converter::utils::truncate_with_suffix;
///
/// assert_eq!(truncate_with_suffix("console.log(1)", 7, "..."), "console...");
/// assert_eq!(truncate_with_suffix("x", 7, "..."), "x");
/// ```
pub fn truncate_with_suffix(s: &str, max_chars: usize, suffix: &str) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!("{}{}", truncate_str(s, max_chars), suffix)
    }
}

/// One-line preview of multi-line text for structured log fields
pub fn log_preview(s: &str, max_chars: usize) -> String {
    let flattened = s.trim().replace("\r\n", "\\n").replace('\n', "\\n");
    truncate_with_suffix(&flattened, max_chars, "...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_multibyte() {
        let code = "s = \"日本語\"";
        assert_eq!(truncate_str(code, 6), "s = \"日");
        assert_eq!(truncate_str(code, 100), code);
        assert_eq!(truncate_str("", 3), "");
    }

    #[test]
    fn test_truncate_with_suffix() {
        assert_eq!(truncate_with_suffix("package main", 7, "..."), "package...");
        assert_eq!(truncate_with_suffix("package", 7, "..."), "package");
    }

    #[test]
    fn test_log_preview_flattens_lines() {
        let reply = "\nCode:\r\nfn main() {\n    println!(\"hi\");\n}\n";
        assert_eq!(log_preview(reply, 100), "Code:\\nfn main() {\\n    println!(\"hi\");\\n}");
        assert_eq!(log_preview(reply, 5), "Code:...");
    }
}

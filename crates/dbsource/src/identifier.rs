//! Identifier hygiene for values that end up inside connection URLs.
//!
//! Host names, database names, and users are spliced into the rendered
//! connection string, so they are checked here for characters that would
//! corrupt the URL grammar or smuggle extra parameters. The checks return a
//! problem description instead of an error so validation can accumulate
//! every violation across fields.

/// Maximum identifier length (conservative limit across engines).
/// - PostgreSQL: 63 bytes
/// - SQL Server: 128 characters
/// - MySQL: 64 characters
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Characters that terminate or delimit components of the URL grammars.
const URL_UNSAFE: &[char] = &['/', '?', '#', '&', '=', ';', '@', ':', ','];

/// Check an identifier for structural problems.
///
/// Rejects empty identifiers, embedded null bytes, and identifiers exceeding
/// the maximum length. Returns `Some(problem)` on violation.
pub fn check_identifier(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("must not be empty".to_string());
    }
    if name.contains('\0') {
        return Some("contains a null byte".to_string());
    }
    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Some(format!(
            "exceeds maximum length of {} bytes (got {})",
            MAX_IDENTIFIER_LENGTH,
            name.len()
        ));
    }
    None
}

/// Check an identifier for characters that are unsafe inside a connection URL.
///
/// Runs the structural checks first, then rejects whitespace and URL
/// delimiter characters. Returns `Some(problem)` on violation.
pub fn check_url_safe(name: &str) -> Option<String> {
    if let Some(problem) = check_identifier(name) {
        return Some(problem);
    }
    if name.chars().any(char::is_whitespace) {
        return Some("must not contain whitespace".to_string());
    }
    if let Some(c) = name.chars().find(|c| URL_UNSAFE.contains(c)) {
        return Some(format!("must not contain '{}'", c));
    }
    None
}

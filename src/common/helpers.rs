// Helper functions for safe logging and timestamps

use chrono::Utc;

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```ignore
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    let parts: Vec<&str> = email.split('@').collect();
    match (email.chars().count() > 3, parts.as_slice()) {
        (true, [local, domain]) => match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => "***@***.***".to_string(),
        },
        _ => "***@***.***".to_string(),
    }
}

/// Masks tokens for safe logging
/// Shows only first and last 4 characters
pub fn safe_token_log(token: &str) -> String {
    if token.len() > 8 && token.is_ascii() {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    } else {
        "***".to_string()
    }
}

/// Milliseconds since the Unix epoch, the unit used for job and application dates
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

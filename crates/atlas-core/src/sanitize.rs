//! Input hardening for free text (names, reasons, messages) before it is stored.
//!
//! The rendering layer escapes output as well; this is the input-side pass.

/// Default maximum length, in characters, of a stored text field.
pub const DEFAULT_MAX_LENGTH: usize = 10_000;

/// Trims the input and escapes the five HTML-significant characters.
///
/// `None` becomes an empty string.
#[must_use]
pub fn sanitize_user_content(input: Option<&str>) -> String {
    let Some(raw) = input else {
        return String::new();
    };

    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// [`sanitize_for_storage_with_limit`] with [`DEFAULT_MAX_LENGTH`].
#[must_use]
pub fn sanitize_for_storage(input: Option<&str>) -> String {
    sanitize_for_storage_with_limit(input, DEFAULT_MAX_LENGTH)
}

/// Prepares user text for persistence: trim, escape HTML, strip NUL characters,
/// then truncate to `max_length` characters without signalling an error.
///
/// Applying it twice escapes the `&` of entities produced by the first pass.
#[must_use]
pub fn sanitize_for_storage_with_limit(input: Option<&str>, max_length: usize) -> String {
    sanitize_user_content(input)
        .chars()
        .filter(|&c| c != '\0')
        .take(max_length)
        .collect()
}

//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Base URL of one Supabase service (`/auth/v1`, `/rest/v1`) for a project URL.
///
/// A URL that already ends with `suffix` is kept as is.
pub fn supabase_service_url(project_url: &str, suffix: &str) -> Result<String, &'static str> {
    let trimmed = project_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("Supabase URL must not be empty");
    }
    if !is_http_url(trimmed) {
        return Err("Supabase URL must include http:// or https://");
    }
    if trimmed.ends_with(suffix) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}{suffix}"))
    }
}

/// The backend's own message from a Supabase error body.
///
/// GoTrue and PostgREST disagree on the field name, so the first of `msg`,
/// `message`, `error_description` and `error` wins. Bodies that are not JSON
/// are passed through; an empty body becomes `HTTP <status>`.
pub fn supabase_error_message(status: u16, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        msg: Option<String>,
        message: Option<String>,
        error_description: Option<String>,
        error: Option<String>,
    }

    let from_json = serde_json::from_str::<ErrorBody>(body).ok().and_then(|parsed| {
        [parsed.msg, parsed.message, parsed.error_description, parsed.error]
            .into_iter()
            .flatten()
            .map(|message| message.trim().to_string())
            .find(|message| !message.is_empty())
    });
    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => format!("HTTP {status}"),
        None => compact_text(body),
    }
}

/// Current Unix timestamp in seconds.
pub fn unix_timestamp_now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" https://example.com ".to_string())),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn is_http_url_accepts_valid_schemes() {
        assert!(is_http_url("http://localhost"));
        assert!(is_http_url("https://example.com"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("example.com"));
    }

    #[test]
    fn supabase_service_url_appends_suffix_once() {
        assert_eq!(
            supabase_service_url("https://demo.supabase.co/", "/auth/v1").unwrap(),
            "https://demo.supabase.co/auth/v1"
        );
        assert_eq!(
            supabase_service_url("https://demo.supabase.co/rest/v1", "/rest/v1").unwrap(),
            "https://demo.supabase.co/rest/v1"
        );
        assert!(supabase_service_url("demo.supabase.co", "/auth/v1").is_err());
        assert!(supabase_service_url("  ", "/auth/v1").is_err());
    }

    #[test]
    fn supabase_error_message_keeps_backend_text() {
        assert_eq!(
            supabase_error_message(
                400,
                r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#
            ),
            "Invalid login credentials"
        );
        assert_eq!(
            supabase_error_message(403, r#"{"code":"42501","message":"permission denied for table items"}"#),
            "permission denied for table items"
        );
        assert_eq!(supabase_error_message(502, "upstream timed out"), "upstream timed out");
        assert_eq!(supabase_error_message(502, "  "), "HTTP 502");
    }

    #[test]
    fn compact_text_caps_length() {
        let long = "x".repeat(400);
        assert_eq!(compact_text(&long).len(), 180);
        assert_eq!(compact_text("  short  "), "short");
    }
}

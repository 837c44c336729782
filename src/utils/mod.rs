use url::Url;

use crate::domain::AppError;

/// True for empty or whitespace-only input.
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

/// Parses a website address, accepting only http(s) URLs with a host.
pub fn validate_site_url(input: &str) -> Result<Url, AppError> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed).map_err(|e| AppError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AppError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                other
            )))
        }
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(AppError::InvalidUrl(format!("{}: missing host", trimmed)));
    }

    Ok(url)
}

/// Replace characters that are not allowed in file names, falling back to
/// `fallback` when nothing usable is left.
pub fn sanitize_filename(filename: &str, fallback: &str) -> String {
    let sanitized = filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .trim_matches('.')
        .to_string();

    if sanitized.is_empty() {
        fallback.to_string()
    } else {
        sanitized
    }
}

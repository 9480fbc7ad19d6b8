use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::ScraperError;

const PLACEHOLDER: &str = "{}";

/// Builds the tracking page URL for `code` from a `{}` template.
///
/// The code is trimmed and percent-encoded before substitution.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidTrackingUrl`] if the code is blank, the
/// template has no placeholder, or the result is not a valid URL.
pub fn tracking_url(template: &str, code: &str) -> Result<String, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidTrackingUrl {
        code: code.to_owned(),
        reason,
    };

    let code_trimmed = code.trim();
    if code_trimmed.is_empty() {
        return Err(invalid("tracking code is empty".to_owned()));
    }
    if !template.contains(PLACEHOLDER) {
        return Err(invalid(format!(
            "template \"{template}\" has no `{PLACEHOLDER}` placeholder"
        )));
    }

    let encoded = utf8_percent_encode(code_trimmed, NON_ALPHANUMERIC).to_string();
    let url = template.replacen(PLACEHOLDER, &encoded, 1);

    reqwest::Url::parse(&url).map_err(|e| invalid(format!("\"{url}\" is not a valid URL: {e}")))?;
    Ok(url)
}

/// Host of `url` for error messages, or the whole string if it does not parse.
pub(crate) fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

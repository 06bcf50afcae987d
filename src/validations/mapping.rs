use url::Url;
use validator::ValidationError;

/// Longest shortcode a caller may pick, matches the storage column width
pub const MAX_SHORTCODE_LENGTH: usize = 32;

/// Validates that a URL string is properly formatted and uses http/https
pub fn validate_url(url_str: &str) -> Result<(), ValidationError> {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.host().is_none() {
                let mut err = ValidationError::new("url_host");
                err.message = Some("URL must have a host".into());
                return Err(err);
            }

            if url.scheme() != "http" && url.scheme() != "https" {
                let mut err = ValidationError::new("url_scheme");
                err.message = Some("URL scheme must be http or https".into());
                return Err(err);
            }

            Ok(())
        }
        Err(_) => {
            let mut err = ValidationError::new("url_format");
            err.message = Some("Invalid URL format".into());
            Err(err)
        }
    }
}

/// Validates a caller-chosen shortcode:
/// - empty means "generate one for me" and is accepted
/// - at most 32 characters
/// - ASCII alphanumerics, hyphens and underscores only
pub fn validate_shortcode(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Ok(());
    }

    if code.len() > MAX_SHORTCODE_LENGTH {
        let mut err = ValidationError::new("shortcode_length");
        err.message = Some(
            format!(
                "Shortcode must be between 1 and {} characters",
                MAX_SHORTCODE_LENGTH
            )
            .into(),
        );
        return Err(err);
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        let mut err = ValidationError::new("shortcode_charset");
        err.message = Some(
            "Shortcode can only contain alphanumeric characters, hyphens, and underscores".into(),
        );
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?query=value").is_ok());

        assert!(validate_url("not-a-url").is_err());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_validate_shortcode() {
        assert!(validate_shortcode("abc123").is_ok());
        assert!(validate_shortcode("my-link_2").is_ok());
        assert!(validate_shortcode("").is_ok());

        assert!(validate_shortcode(&"a".repeat(MAX_SHORTCODE_LENGTH + 1)).is_err());
        assert!(validate_shortcode("invalid/code").is_err());
        assert!(validate_shortcode("ünïcode").is_err());
    }
}

use crate::UrlError;
use serde::Serialize;
use url::Url;

/// A validated audit target
///
/// Created from raw user input by [`normalize_target`] and immutable once
/// validated. All downstream components take the target by reference.
#[derive(Debug, Clone, Serialize)]
pub struct AuditTarget {
    /// Normalized absolute URL
    pub url: Url,

    /// Lowercase host component
    pub host: String,

    /// URL scheme (`http` or `https`)
    pub scheme: String,
}

/// Normalizes and validates a raw address into an [`AuditTarget`]
///
/// # Validation Rules
///
/// 1. Reject empty input
/// 2. Prepend `https://` when no scheme is present
/// 3. Reject addresses that do not parse as URLs
/// 4. Reject schemes other than `http` and `https`
/// 5. Reject URLs without a host component
///
/// The host is lowercased by the URL parser. No network access occurs here.
///
/// # Examples
///
/// ```
/// use sitegauge::url::normalize_target;
///
/// let target = normalize_target("Example.com/pricing").unwrap();
/// assert_eq!(target.url.as_str(), "https://example.com/pricing");
/// assert_eq!(target.host, "example.com");
/// assert_eq!(target.scheme, "https");
/// ```
pub fn normalize_target(raw: &str) -> Result<AuditTarget, UrlError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(UrlError::EmptyInput);
    }

    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let url = Url::parse(&candidate).map_err(|e| UrlError::InvalidFormat(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::UnsupportedScheme(url.scheme().to_string()));
    }

    let host = url.host_str().ok_or(UrlError::MissingHost)?.to_lowercase();
    let scheme = url.scheme().to_string();

    Ok(AuditTarget { url, host, scheme })
}

/// Produces the canonical deduplication key for a URL
///
/// Strips the fragment and the trailing slash (except for the root path) so
/// that trivially different spellings of the same page collapse onto one
/// key within a crawl.
pub fn canonical_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_fragment(None);

    let mut s = key.to_string();
    if key.path() != "/" && key.query().is_none() && s.ends_with('/') {
        s.pop();
    }
    s
}

/// Counts the non-empty `/`-delimited segments of a URL path
///
/// The root path `/` has zero segments.
pub fn path_segment_count(url: &Url) -> u32 {
    url.path().split('/').filter(|s| !s.is_empty()).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_https_when_schemeless() {
        let target = normalize_target("example.com").unwrap();
        assert_eq!(target.url.as_str(), "https://example.com/");
        assert_eq!(target.scheme, "https");
    }

    #[test]
    fn test_keeps_explicit_http() {
        let target = normalize_target("http://example.com/page").unwrap();
        assert_eq!(target.scheme, "http");
    }

    #[test]
    fn test_lowercases_host() {
        let target = normalize_target("https://WWW.Example.COM/Page").unwrap();
        assert_eq!(target.host, "www.example.com");
        // Path case is preserved
        assert_eq!(target.url.path(), "/Page");
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(matches!(normalize_target(""), Err(UrlError::EmptyInput)));
        assert!(matches!(normalize_target("   "), Err(UrlError::EmptyInput)));
    }

    #[test]
    fn test_rejects_unsupported_scheme() {
        assert!(matches!(
            normalize_target("ftp://example.com"),
            Err(UrlError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_rejects_missing_host() {
        // `https:///path` parses but carries no host
        let result = normalize_target("https:///path");
        assert!(matches!(
            result,
            Err(UrlError::MissingHost) | Err(UrlError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(normalize_target("ht tp://???").is_err());
    }

    #[test]
    fn test_canonical_key_strips_fragment() {
        let a = Url::parse("https://example.com/page#section").unwrap();
        let b = Url::parse("https://example.com/page").unwrap();
        assert_eq!(canonical_key(&a), canonical_key(&b));
    }

    #[test]
    fn test_canonical_key_strips_trailing_slash() {
        let a = Url::parse("https://example.com/page/").unwrap();
        let b = Url::parse("https://example.com/page").unwrap();
        assert_eq!(canonical_key(&a), canonical_key(&b));
    }

    #[test]
    fn test_canonical_key_keeps_root_slash() {
        let root = Url::parse("https://example.com/").unwrap();
        assert_eq!(canonical_key(&root), "https://example.com/");
    }

    #[test]
    fn test_path_segment_count() {
        let root = Url::parse("https://example.com/").unwrap();
        assert_eq!(path_segment_count(&root), 0);

        let nested = Url::parse("https://example.com/blog/2024/post").unwrap();
        assert_eq!(path_segment_count(&nested), 3);
    }
}

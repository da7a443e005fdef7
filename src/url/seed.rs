use crate::UrlError;
use url::Url;

/// Parses the user-supplied seed URL
///
/// Surrounding whitespace (a trailing newline from the prompt, typically) is
/// removed. The seed must be an absolute `http` or `https` URL with a host,
/// because the crawl scope is derived from that host.
///
/// # Examples
///
/// ```
/// use contact_crawler::url::parse_seed_url;
///
/// let url = parse_seed_url("  http://x.test/\n").unwrap();
/// assert_eq!(url.as_str(), "http://x.test/");
///
/// assert!(parse_seed_url("ftp://x.test/").is_err());
/// ```
pub fn parse_seed_url(input: &str) -> Result<Url, UrlError> {
    let url = Url::parse(input.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingDomain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_http_seed() {
        let url = parse_seed_url("http://x.test/").unwrap();
        assert_eq!(url.host_str(), Some("x.test"));
    }

    #[test]
    fn test_parse_keeps_path_and_query() {
        let url = parse_seed_url("https://x.test/firms?page=2").unwrap();
        assert_eq!(url.as_str(), "https://x.test/firms?page=2");
    }

    #[test]
    fn test_relative_seed_rejected() {
        assert!(matches!(parse_seed_url("/about"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(parse_seed_url(""), Err(UrlError::Parse(_))));
        assert!(matches!(
            parse_seed_url("not a url"),
            Err(UrlError::Parse(_))
        ));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        assert!(matches!(
            parse_seed_url("mailto:a@x.test"),
            Err(UrlError::InvalidScheme(_))
        ));
        assert!(matches!(
            parse_seed_url("file:///etc/passwd"),
            Err(UrlError::InvalidScheme(_))
        ));
    }
}

use url::{ParseError, Url};

/// Resolve a possibly relative reference against a base URL.
///
/// Absolute references are taken as they are, relative ones are resolved following the usual
/// rules, so that `feeds/white.json` next to `https://example.com/csaf/provider-metadata.json`
/// becomes `https://example.com/csaf/feeds/white.json`.
pub fn resolve(base: &Url, reference: &str) -> Result<Url, ParseError> {
    base.join(reference.trim())
}

/// Get the "directory" of a URL.
///
/// This drops the last path segment, as well as any query or fragment.
pub fn base_url(url: &Url) -> Result<Url, ParseError> {
    let mut base = url.join("./")?;
    base.set_query(None);
    base.set_fragment(None);
    Ok(base)
}

#[cfg(test)]
mod test {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).expect("test URL must parse")
    }

    #[test]
    fn resolve_relative() {
        let base = url("https://example.com/.well-known/csaf/provider-metadata.json");
        assert_eq!(
            resolve(&base, "feeds/white.json").ok(),
            Some(url("https://example.com/.well-known/csaf/feeds/white.json"))
        );
    }

    #[test]
    fn resolve_absolute() {
        let base = url("https://example.com/.well-known/csaf/provider-metadata.json");
        assert_eq!(
            resolve(&base, "https://other.example.com/feed.json").ok(),
            Some(url("https://other.example.com/feed.json"))
        );
    }

    #[test]
    fn relative_and_absolute_are_equal() {
        let base = url("https://example.com/csaf/provider-metadata.json");
        assert_eq!(
            resolve(&base, "white/feed.json").ok(),
            resolve(&base, "https://example.com/csaf/white/feed.json").ok(),
        );
    }

    #[test]
    fn base_of_document() {
        assert_eq!(
            base_url(&url("https://example.com/csaf/provider-metadata.json?foo=bar#baz")).ok(),
            Some(url("https://example.com/csaf/"))
        );
    }

    #[test]
    fn base_of_directory() {
        assert_eq!(
            base_url(&url("https://example.com/csaf/")).ok(),
            Some(url("https://example.com/csaf/"))
        );
    }

    #[test]
    fn base_of_cannot_be_a_base() {
        assert!(base_url(&url("mailto:csaf@example.com")).is_err());
    }
}

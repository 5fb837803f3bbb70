use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// `http(s)://` or bare `www.` links, up to whitespace, a quote, angle
// brackets or parentheses.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s"<>()]+|www\.[^\s"<>()]+"#).expect("static URL pattern")
});

/// Links found in `text`, deduplicated, in order of first appearance.
///
/// Matching is case-insensitive on the scheme and `www.` prefix, but the
/// returned links keep their original spelling, so `WWW.a.com` and
/// `www.a.com` are distinct entries.
///
/// ```rust
/// use ingest::extract_urls;
///
/// let urls = extract_urls("Go to <https://bank.example/login> or https://bank.example/login");
/// assert_eq!(urls, ["https://bank.example/login"]);
/// ```
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|url| seen.insert(*url))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_schemes_and_bare_www() {
        let urls = extract_urls(
            "Verify at http://paypa1.example/verify now, or visit www.paypa1.example today.",
        );
        assert_eq!(
            urls,
            vec!["http://paypa1.example/verify", "www.paypa1.example"]
        );
    }

    #[test]
    fn stops_at_quotes_brackets_and_parentheses() {
        let urls = extract_urls(
            r#"<a href="https://evil.example/a?b=1">here</a> (see https://evil.example/c)"#,
        );
        assert_eq!(
            urls,
            vec!["https://evil.example/a?b=1", "https://evil.example/c"]
        );
    }

    #[test]
    fn duplicates_keep_first_position() {
        let urls = extract_urls("https://b.example https://a.example https://b.example");
        assert_eq!(urls, vec!["https://b.example", "https://a.example"]);
    }

    #[test]
    fn scheme_match_is_case_insensitive() {
        let urls = extract_urls("HTTPS://Bank.Example/Login and WWW.bank.example");
        assert_eq!(urls, vec!["HTTPS://Bank.Example/Login", "WWW.bank.example"]);
    }

    #[test]
    fn trailing_punctuation_is_kept() {
        // Only whitespace, quotes, angle brackets and parentheses end a link.
        let urls = extract_urls("Click https://x.example/pay.");
        assert_eq!(urls, vec!["https://x.example/pay."]);
    }

    #[test]
    fn no_links() {
        assert!(extract_urls("").is_empty());
        assert!(extract_urls("ftp://files.example and mailto:a@b.example").is_empty());
    }
}

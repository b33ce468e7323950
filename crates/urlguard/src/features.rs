//! Turn a raw URL string into a `FeatureVector`.
//!
//! Extraction is total: any string, including the empty string or text that
//! is not a URL at all, produces a vector. Host and path are raw slices of
//! the input (see `split.rs`); a string without a `//` authority has no
//! host, and host-dependent features are zero.

use crate::patterns::PatternSet;
use crate::schema::FeatureVector;
use crate::split::{self, UrlParts};

/// Extract features using the shared pattern set.
pub fn extract_features(url: &str) -> FeatureVector {
    FeatureExtractor::new().extract(url)
}

/// Stateless extractor bound to a compiled pattern set.
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor {
    patterns: &'static PatternSet,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self {
            patterns: PatternSet::shared(),
        }
    }

    /// Compute all 21 features of `url`.
    pub fn extract(&self, url: &str) -> FeatureVector {
        let cleaned = split::clean(url);
        let parts = UrlParts::split(&cleaned);
        let host = parts.hostname();
        let path = parts.path;

        FeatureVector {
            has_ip_literal: flag(self.patterns.has_ip_literal(url)),
            abnormal_host: abnormal_host(url, host.as_deref()),
            dot_count: count_char(url, '.'),
            www_count: count_substr(url, "www"),
            at_count: count_char(url, '@'),
            path_dir_count: count_char(path, '/'),
            embedded_domain_count: count_substr(path, "//"),
            is_shortened: flag(self.patterns.is_shortened(url)),
            https_count: count_substr(url, "https"),
            http_count: count_substr(url, "http"),
            percent_count: count_char(url, '%'),
            question_count: count_char(url, '?'),
            hyphen_count: count_char(url, '-'),
            equal_count: count_char(url, '='),
            url_length: char_len(url),
            hostname_length: host.as_deref().map(char_len).unwrap_or(0),
            has_suspicious_word: flag(self.patterns.has_suspicious_word(url)),
            first_dir_length: first_dir_length(path),
            tld_length: tld_length(url),
            // Any Unicode numeric character, not only ASCII `0-9`.
            digit_count: count_where(url, char::is_numeric),
            letter_count: count_where(url, char::is_alphabetic),
        }
    }
}

fn flag(b: bool) -> u32 {
    u32::from(b)
}

fn char_len(s: &str) -> u32 {
    s.chars().count() as u32
}

fn count_char(s: &str, needle: char) -> u32 {
    s.chars().filter(|&c| c == needle).count() as u32
}

/// Non-overlapping occurrences, scanning left to right.
fn count_substr(s: &str, needle: &str) -> u32 {
    s.matches(needle).count() as u32
}

fn count_where(s: &str, pred: impl Fn(char) -> bool) -> u32 {
    s.chars().filter(|&c| pred(c)).count() as u32
}

/// 1 when the lowercased hostname occurs verbatim in the URL text.
///
/// A URL without a host scores 0.
fn abnormal_host(url: &str, host: Option<&str>) -> u32 {
    match host {
        Some(h) if !h.is_empty() => flag(url.contains(h)),
        _ => 0,
    }
}

/// Length of the segment between the first and second `/` of the path.
fn first_dir_length(path: &str) -> u32 {
    path.split('/').nth(1).map(char_len).unwrap_or(0)
}

/// Length of everything after the final `.` of the URL.
fn tld_length(url: &str) -> u32 {
    url.rfind('.').map(|i| char_len(&url[i + 1..])).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FEATURE_DIM;
    use proptest::prelude::*;

    #[test]
    fn test_google_home() {
        let f = extract_features("https://www.google.com");
        assert_eq!(f.https_count, 1);
        assert_eq!(f.http_count, 1);
        assert_eq!(f.www_count, 1);
        assert_eq!(f.dot_count, 2);
        assert_eq!(f.hostname_length, "www.google.com".len() as u32);
        assert_eq!(f.first_dir_length, 0);
        assert_eq!(f.tld_length, 3);
        assert_eq!(f.has_suspicious_word, 0);
        assert_eq!(f.abnormal_host, 1);
        assert_eq!(f.url_length, 22);
    }

    #[test]
    fn test_shortened_link() {
        let f = extract_features("http://bit.ly/abc123");
        assert_eq!(f.is_shortened, 1);
        assert_eq!(f.http_count, 1);
        assert_eq!(f.https_count, 0);
        assert_eq!(f.first_dir_length, 6);
        assert_eq!(f.path_dir_count, 1);
        assert_eq!(f.digit_count, 3);
        assert_eq!(f.letter_count, 12);

        assert_eq!(extract_features("http://example.com").is_shortened, 0);
    }

    #[test]
    fn test_empty_string() {
        let f = extract_features("");
        assert_eq!(f, FeatureVector::default());
        assert_eq!(f.to_array(), [0.0; FEATURE_DIM]);
    }

    #[test]
    fn test_first_dir_length_without_path() {
        assert_eq!(extract_features("http://host").first_dir_length, 0);
        assert_eq!(extract_features("http://host/").first_dir_length, 0);
        assert_eq!(extract_features("http://host/docs/intro").first_dir_length, 4);
    }

    #[test]
    fn test_tld_length_without_dot() {
        assert_eq!(extract_features("http://host/path").tld_length, 0);
        assert_eq!(
            extract_features("https://www.google.com/search").tld_length,
            "com/search".len() as u32
        );
        assert_eq!(extract_features("http://example.com.").tld_length, 0);
    }

    #[test]
    fn test_schemeless_input_is_all_path() {
        let f = extract_features("www.example.com/login/reset");
        assert_eq!(f.hostname_length, 0);
        assert_eq!(f.abnormal_host, 0);
        assert_eq!(f.path_dir_count, 2);
        assert_eq!(f.first_dir_length, "login".len() as u32);
        assert_eq!(f.www_count, 1);
        assert_eq!(f.dot_count, 2);
        assert_eq!(f.has_suspicious_word, 1);
    }

    #[test]
    fn test_embedded_domain_in_path() {
        let f = extract_features("http://evil.example/redirect//http://bank.example//x");
        assert_eq!(f.embedded_domain_count, 3);
        assert_eq!(f.path_dir_count, 7);
        assert_eq!(f.http_count, 2);
    }

    #[test]
    fn test_uppercase_host_is_abnormal() {
        // The hostname is lowercased, so it no longer occurs verbatim.
        assert_eq!(extract_features("http://EXAMPLE.com/").abnormal_host, 0);
        assert_eq!(extract_features("http://example.com/").abnormal_host, 1);
    }

    #[test]
    fn test_ip_literal_and_punctuation_counts() {
        let f = extract_features("http://192.168.10.4/acc-ount?id=1&x=%20@y");
        assert_eq!(f.has_ip_literal, 1);
        assert_eq!(f.question_count, 1);
        assert_eq!(f.equal_count, 2);
        assert_eq!(f.percent_count, 1);
        assert_eq!(f.at_count, 1);
        assert_eq!(f.hyphen_count, 1);
        assert_eq!(f.hostname_length, "192.168.10.4".len() as u32);
    }

    #[test]
    fn test_bare_ipv6_host_not_flagged() {
        let f = extract_features("http://[2001:db8::1]/");
        assert_eq!(f.has_ip_literal, 0);
        assert_eq!(f.hostname_length, "2001:db8::1".len() as u32);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let f = extract_features("http://bücher.example/straße");
        assert_eq!(f.url_length, 28);
        assert_eq!(f.letter_count, 23);
        assert_eq!(f.hostname_length, 14);
        assert_eq!(f.abnormal_host, 1);
        assert_eq!(f.first_dir_length, 6);
    }

    #[test]
    fn test_host_and_path_come_from_raw_text() {
        // (url, path_dir_count, first_dir_length, hostname_length)
        let cases = [
            ("https://www.google.com", 0, 0, 14),
            ("http://example.com", 0, 0, 11),
            ("http://a.com/x/../y", 3, 1, 5),
            ("http://a.com/a b/c", 2, 3, 5),
            ("http://a.com\\evil\\x", 0, 0, 12),
            ("http://300.1.1.1/admin/x", 2, 5, 9),
            ("http://exa mple.com/admin/x", 2, 5, 12),
            ("http://a.com/%7Euser/page", 2, 7, 5),
            ("http://a.com/login;jsessionid=9", 1, 5, 5),
            ("http://user:pw@Shop.example:8443/cart?x=/y", 1, 4, 12),
        ];
        for (url, dirs, first_dir, host) in cases {
            let f = extract_features(url);
            assert_eq!(
                (f.path_dir_count, f.first_dir_length, f.hostname_length),
                (dirs, first_dir, host),
                "{url}"
            );
        }
    }

    #[test]
    fn test_unicode_digits_are_counted() {
        let f = extract_features("http://a.com/\u{663}\u{664}x\u{b2}");
        assert_eq!(f.digit_count, 3);
        assert_eq!(f.letter_count, 9);
    }

    proptest! {
        #[test]
        fn prop_extract_is_total_and_deterministic(url in ".{0,200}") {
            let a = extract_features(&url);
            let b = extract_features(&url);
            prop_assert_eq!(a, b);
            prop_assert_eq!(a.to_array().len(), FEATURE_DIM);
            prop_assert_eq!(a.url_length as usize, url.chars().count());
        }

        #[test]
        fn prop_http_count_covers_https(url in "(https?://|www\\.|[a-z./?=-]){0,40}") {
            let f = extract_features(&url);
            prop_assert!(f.http_count >= f.https_count);
        }
    }
}

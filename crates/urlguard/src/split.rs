//! Non-normalizing URL split.
//!
//! Host and path are taken as slices of the input text, the way the training
//! pipeline's `urlparse` saw them: no percent-encoding, no dot-segment
//! resolution, no IDNA, no validation. Anything can be split, so nothing
//! here fails.

use std::borrow::Cow;

/// Schemes whose last path segment may carry `;params`.
const PARAM_SCHEMES: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtsps", "rtspu",
    "sip", "sips", "mms", "sftp", "tel",
];

/// Drop tab, CR and LF before splitting.
pub(crate) fn clean(url: &str) -> Cow<'_, str> {
    if url.contains(['\t', '\r', '\n']) {
        Cow::Owned(url.chars().filter(|c| !matches!(c, '\t' | '\r' | '\n')).collect())
    } else {
        Cow::Borrowed(url)
    }
}

/// Authority and path of one URL, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UrlParts<'a> {
    pub netloc: &'a str,
    pub path: &'a str,
}

impl<'a> UrlParts<'a> {
    pub(crate) fn split(url: &'a str) -> Self {
        let url = url.trim_start_matches(|c: char| c <= ' ');

        let (scheme, rest) = match url.find(':') {
            Some(i)
                if i > 0
                    && url.as_bytes()[0].is_ascii_alphabetic()
                    && url[..i].chars().all(is_scheme_char) =>
            {
                (&url[..i], &url[i + 1..])
            }
            _ => ("", url),
        };

        let (netloc, rest) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after
                    .find(|c| matches!(c, '/' | '?' | '#'))
                    .unwrap_or(after.len());
                after.split_at(end)
            }
            None => ("", rest),
        };

        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
        let rest = rest.split_once('?').map_or(rest, |(before, _)| before);

        let uses_params = PARAM_SCHEMES
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme));
        let path = if uses_params { strip_params(rest) } else { rest };

        Self { netloc, path }
    }

    /// Lowercased host: userinfo, port and IPv6 brackets removed.
    pub(crate) fn hostname(&self) -> Option<String> {
        let hostinfo = self.netloc.rsplit_once('@').map_or(self.netloc, |(_, h)| h);
        let host = match hostinfo.split_once('[') {
            Some((_, bracketed)) => bracketed.split_once(']').map_or(bracketed, |(h, _)| h),
            None => hostinfo.split_once(':').map_or(hostinfo, |(h, _)| h),
        };
        (!host.is_empty()).then(|| host.to_lowercase())
    }
}

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

/// Cut `;params` from the last path segment.
fn strip_params(path: &str) -> &str {
    let last_segment = path.rfind('/').unwrap_or(0);
    match path[last_segment..].find(';') {
        Some(i) => &path[..last_segment + i],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(url: &str) -> (&str, &str) {
        let p = UrlParts::split(url);
        (p.netloc, p.path)
    }

    #[test]
    fn test_split_keeps_raw_text() {
        assert_eq!(parts("https://www.google.com"), ("www.google.com", ""));
        assert_eq!(parts("http://a.com/x/../y"), ("a.com", "/x/../y"));
        assert_eq!(parts("http://a.com/a b/c"), ("a.com", "/a b/c"));
        assert_eq!(parts("http://a.com\\evil\\x"), ("a.com\\evil\\x", ""));
        assert_eq!(parts("http://exa mple.com/admin/x"), ("exa mple.com", "/admin/x"));
        assert_eq!(parts("http://a.com/p?q=/x#/frag"), ("a.com", "/p"));
        assert_eq!(parts("http://a.com#/frag?q"), ("a.com", ""));
    }

    #[test]
    fn test_split_without_scheme() {
        assert_eq!(parts("www.example.com/login"), ("", "www.example.com/login"));
        assert_eq!(parts("//cdn.example/x"), ("cdn.example", "/x"));
        assert_eq!(parts("1http://a.com/x"), ("", "1http://a.com/x"));
        assert_eq!(parts(""), ("", ""));
    }

    #[test]
    fn test_params_only_cut_for_known_schemes() {
        assert_eq!(parts("http://a.com/login;jsessionid=9").1, "/login");
        assert_eq!(parts("http://a.com/a;b/c;d").1, "/a;b/c");
        assert_eq!(parts("http://a.com/a;b/c").1, "/a;b/c");
        assert_eq!(parts("git://a.com/x;y").1, "/x;y");
    }

    #[test]
    fn test_hostname() {
        let host = |url: &str| UrlParts::split(url).hostname();
        assert_eq!(host("http://user:pw@Host.COM:8080/x").as_deref(), Some("host.com"));
        assert_eq!(host("http://[2001:DB8::1]:443/").as_deref(), Some("2001:db8::1"));
        assert_eq!(host("http://Bücher.example/").as_deref(), Some("bücher.example"));
        assert_eq!(host("http://300.1.1.1/admin").as_deref(), Some("300.1.1.1"));
        assert_eq!(host("http://user@/x"), None);
        assert_eq!(host("no scheme"), None);
    }

    #[test]
    fn test_clean_strips_control_whitespace() {
        assert_eq!(clean("http://a.com/x"), "http://a.com/x");
        assert!(matches!(clean("http://a.com/x"), Cow::Borrowed(_)));
        assert_eq!(clean("http://a\t.com/x\r\n"), "http://a.com/x");
    }
}

//! Heuristic text patterns, compiled once per process.

use regex::Regex;
use std::sync::LazyLock;

/// IPv4 dotted quad followed by `/`, or a hex dotted quad followed by `/`
/// and then an eight-group IPv6 literal. The second alternative only fires
/// when both halves appear back to back, so bare IPv6 hosts never match;
/// models were trained on this exact behaviour.
const IP_LITERAL: &str = concat!(
    r"(([01]?\d\d?|2[0-4]\d|25[0-5])\.([01]?\d\d?|2[0-4]\d|25[0-5])\.([01]?\d\d?|2[0-4]\d|25[0-5])\.",
    r"([01]?\d\d?|2[0-4]\d|25[0-5])/)|",
    r"((0x[0-9a-fA-F]{1,2})\.(0x[0-9a-fA-F]{1,2})\.(0x[0-9a-fA-F]{1,2})\.(0x[0-9a-fA-F]{1,2})/)",
    r"(?:[a-fA-F0-9]{1,4}:){7}[a-fA-F0-9]{1,4}",
);

/// Well-known link shortener domains.
const SHORTENER: &str = r"bit\.ly|goo\.gl|tinyurl|t\.co";

/// Payment, login and account bait words. Case-sensitive.
const SUSPICIOUS_WORDS: &str = r"PayPal|login|signin|bank|account|update|free|bonus|ebay";

/// The compiled heuristic patterns used by feature extraction.
#[derive(Debug)]
pub struct PatternSet {
    ip_literal: Regex,
    shortener: Regex,
    suspicious: Regex,
}

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(PatternSet::compile);

impl PatternSet {
    fn compile() -> Self {
        Self {
            ip_literal: Regex::new(IP_LITERAL).expect("ip literal regex is valid"),
            shortener: Regex::new(SHORTENER).expect("shortener regex is valid"),
            suspicious: Regex::new(SUSPICIOUS_WORDS).expect("suspicious word regex is valid"),
        }
    }

    /// The process-wide pattern set.
    pub fn shared() -> &'static PatternSet {
        &PATTERNS
    }

    pub fn has_ip_literal(&self, url: &str) -> bool {
        self.ip_literal.is_match(url)
    }

    pub fn is_shortened(&self, url: &str) -> bool {
        self.shortener.is_match(url)
    }

    pub fn has_suspicious_word(&self, url: &str) -> bool {
        self.suspicious.is_match(url)
    }
}

/// Compile the pattern set now instead of on the first request.
pub fn warm_up() {
    LazyLock::force(&PATTERNS);
}

//! The feature schema: 21 numeric columns in the order the classifier was trained on.
//!
//! Column order is the contract between extraction and the model artifact.
//! `FEATURE_NAMES` holds the training column names and is compared against
//! the artifact metadata at load time; bump `SCHEMA_VERSION` whenever a
//! column is added, removed or reordered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of columns in a feature vector.
pub const FEATURE_DIM: usize = 21;

/// Version of the column layout below.
pub const SCHEMA_VERSION: u32 = 1;

/// Training column names, in classifier input order.
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "use_of_ip",
    "abnormal_url",
    "count.",
    "count-www",
    "count@",
    "count_dir",
    "count_embed_domian",
    "short_url",
    "count-https",
    "count-http",
    "count%",
    "count?",
    "count-",
    "count=",
    "url_length",
    "hostname_length",
    "sus_url",
    "fd_length",
    "tld_length",
    "count-digits",
    "count-letters",
];

// ── Column indices ──
pub const FEAT_HAS_IP_LITERAL: usize = 0;
pub const FEAT_ABNORMAL_HOST: usize = 1;
pub const FEAT_DOT_COUNT: usize = 2;
pub const FEAT_WWW_COUNT: usize = 3;
pub const FEAT_AT_COUNT: usize = 4;
pub const FEAT_PATH_DIR_COUNT: usize = 5;
pub const FEAT_EMBEDDED_DOMAIN_COUNT: usize = 6;
pub const FEAT_IS_SHORTENED: usize = 7;
pub const FEAT_HTTPS_COUNT: usize = 8;
pub const FEAT_HTTP_COUNT: usize = 9;
pub const FEAT_PERCENT_COUNT: usize = 10;
pub const FEAT_QUESTION_COUNT: usize = 11;
pub const FEAT_HYPHEN_COUNT: usize = 12;
pub const FEAT_EQUAL_COUNT: usize = 13;
pub const FEAT_URL_LENGTH: usize = 14;
pub const FEAT_HOSTNAME_LENGTH: usize = 15;
pub const FEAT_HAS_SUSPICIOUS_WORD: usize = 16;
pub const FEAT_FIRST_DIR_LENGTH: usize = 17;
pub const FEAT_TLD_LENGTH: usize = 18;
pub const FEAT_DIGIT_COUNT: usize = 19;
pub const FEAT_LETTER_COUNT: usize = 20;

/// Errors raised when rebuilding a vector from its positional form.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("expected 21 feature values, got {0}")]
    WrongLength(usize),
    #[error("feature {name} (column {index}) is not a non-negative integer: {value}")]
    InvalidValue {
        index: usize,
        name: &'static str,
        value: f64,
    },
}

/// Lexical and structural summary of one URL.
///
/// Field declaration order matches `FEATURE_NAMES`; `to_array` and
/// `from_slice` are the only places that map fields to columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector {
    pub has_ip_literal: u32,
    pub abnormal_host: u32,
    pub dot_count: u32,
    pub www_count: u32,
    pub at_count: u32,
    pub path_dir_count: u32,
    pub embedded_domain_count: u32,
    pub is_shortened: u32,
    pub https_count: u32,
    pub http_count: u32,
    pub percent_count: u32,
    pub question_count: u32,
    pub hyphen_count: u32,
    pub equal_count: u32,
    pub url_length: u32,
    pub hostname_length: u32,
    pub has_suspicious_word: u32,
    pub first_dir_length: u32,
    pub tld_length: u32,
    pub digit_count: u32,
    pub letter_count: u32,
}

impl FeatureVector {
    /// Positional form handed to the classifier.
    pub fn to_array(&self) -> [f64; FEATURE_DIM] {
        let mut cols = [0.0f64; FEATURE_DIM];
        cols[FEAT_HAS_IP_LITERAL] = self.has_ip_literal as f64;
        cols[FEAT_ABNORMAL_HOST] = self.abnormal_host as f64;
        cols[FEAT_DOT_COUNT] = self.dot_count as f64;
        cols[FEAT_WWW_COUNT] = self.www_count as f64;
        cols[FEAT_AT_COUNT] = self.at_count as f64;
        cols[FEAT_PATH_DIR_COUNT] = self.path_dir_count as f64;
        cols[FEAT_EMBEDDED_DOMAIN_COUNT] = self.embedded_domain_count as f64;
        cols[FEAT_IS_SHORTENED] = self.is_shortened as f64;
        cols[FEAT_HTTPS_COUNT] = self.https_count as f64;
        cols[FEAT_HTTP_COUNT] = self.http_count as f64;
        cols[FEAT_PERCENT_COUNT] = self.percent_count as f64;
        cols[FEAT_QUESTION_COUNT] = self.question_count as f64;
        cols[FEAT_HYPHEN_COUNT] = self.hyphen_count as f64;
        cols[FEAT_EQUAL_COUNT] = self.equal_count as f64;
        cols[FEAT_URL_LENGTH] = self.url_length as f64;
        cols[FEAT_HOSTNAME_LENGTH] = self.hostname_length as f64;
        cols[FEAT_HAS_SUSPICIOUS_WORD] = self.has_suspicious_word as f64;
        cols[FEAT_FIRST_DIR_LENGTH] = self.first_dir_length as f64;
        cols[FEAT_TLD_LENGTH] = self.tld_length as f64;
        cols[FEAT_DIGIT_COUNT] = self.digit_count as f64;
        cols[FEAT_LETTER_COUNT] = self.letter_count as f64;
        cols
    }

    /// Rebuild a vector from its positional form.
    pub fn from_slice(values: &[f64]) -> Result<Self, SchemaError> {
        if values.len() != FEATURE_DIM {
            return Err(SchemaError::WrongLength(values.len()));
        }

        let mut cols = [0u32; FEATURE_DIM];
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64
            {
                return Err(SchemaError::InvalidValue {
                    index,
                    name: FEATURE_NAMES[index],
                    value,
                });
            }
            cols[index] = value as u32;
        }

        Ok(Self {
            has_ip_literal: cols[FEAT_HAS_IP_LITERAL],
            abnormal_host: cols[FEAT_ABNORMAL_HOST],
            dot_count: cols[FEAT_DOT_COUNT],
            www_count: cols[FEAT_WWW_COUNT],
            at_count: cols[FEAT_AT_COUNT],
            path_dir_count: cols[FEAT_PATH_DIR_COUNT],
            embedded_domain_count: cols[FEAT_EMBEDDED_DOMAIN_COUNT],
            is_shortened: cols[FEAT_IS_SHORTENED],
            https_count: cols[FEAT_HTTPS_COUNT],
            http_count: cols[FEAT_HTTP_COUNT],
            percent_count: cols[FEAT_PERCENT_COUNT],
            question_count: cols[FEAT_QUESTION_COUNT],
            hyphen_count: cols[FEAT_HYPHEN_COUNT],
            equal_count: cols[FEAT_EQUAL_COUNT],
            url_length: cols[FEAT_URL_LENGTH],
            hostname_length: cols[FEAT_HOSTNAME_LENGTH],
            has_suspicious_word: cols[FEAT_HAS_SUSPICIOUS_WORD],
            first_dir_length: cols[FEAT_FIRST_DIR_LENGTH],
            tld_length: cols[FEAT_TLD_LENGTH],
            digit_count: cols[FEAT_DIGIT_COUNT],
            letter_count: cols[FEAT_LETTER_COUNT],
        })
    }

    /// Column names paired with values, in classifier order.
    pub fn named(&self) -> [(&'static str, f64); FEATURE_DIM] {
        let cols = self.to_array();
        let mut out = [("", 0.0f64); FEATURE_DIM];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = (FEATURE_NAMES[i], cols[i]);
        }
        out
    }
}

/// Check a column list (e.g. from model metadata) against `FEATURE_NAMES`.
///
/// Returns the first position where the lists disagree.
pub fn first_mismatch(names: &[String]) -> Option<usize> {
    if let Some(i) = FEATURE_NAMES
        .iter()
        .zip(names.iter())
        .position(|(expected, got)| *expected != got)
    {
        return Some(i);
    }
    if names.len() != FEATURE_DIM {
        return Some(names.len().min(FEATURE_DIM));
    }
    None
}

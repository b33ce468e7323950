//! Request orchestration: validate, extract, classify, decode.

use crate::classifier::{AdapterError, ClassifierAdapter, Label};
use crate::error::PredictionError;
use crate::features::FeatureExtractor;
use serde::Serialize;
use tracing::{debug, error, info};

/// Successful classification of one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    pub url: String,
    #[serde(rename = "prediction")]
    pub label: Label,
}

/// Stateless per-request pipeline over an immutable classifier.
#[derive(Debug, Clone)]
pub struct PredictionService {
    extractor: FeatureExtractor,
    adapter: ClassifierAdapter,
}

impl PredictionService {
    pub fn new(adapter: ClassifierAdapter) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            adapter,
        }
    }

    pub fn adapter(&self) -> &ClassifierAdapter {
        &self.adapter
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Classify one URL.
    pub fn handle(&self, url: &str) -> Result<PredictionResult, PredictionError> {
        if url.is_empty() {
            return Err(PredictionError::InvalidInput);
        }

        let features = self.extractor.extract(url);
        debug!(url, ?features, "extracted features");

        let raw = self.adapter.predict(&features).map_err(|e| fail(url, e))?;
        let label = self.adapter.decode(raw).map_err(|e| fail(url, e))?;

        info!(url, prediction = %label, "classified url");
        Ok(PredictionResult {
            url: url.to_string(),
            label,
        })
    }
}

fn fail(url: &str, err: AdapterError) -> PredictionError {
    match err {
        AdapterError::Unavailable(reason) => {
            debug!(url, %reason, "prediction rejected, classifier unavailable");
            PredictionError::ServiceUnavailable
        }
        AdapterError::Classifier(e) => {
            error!(url, error = %e, "prediction failed");
            PredictionError::PredictionFailure
        }
    }
}

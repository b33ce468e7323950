//! Classifier boundary: an opaque trained model plus its label decoder.
//!
//! The model is loaded once at startup. A failed load leaves the adapter
//! permanently `Unavailable`; nothing retries.

pub mod encoder;
pub mod forest;

use crate::schema::FeatureVector;
use encoder::LabelEncoder;
use forest::TreeEnsemble;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// File name of the model artifact inside a model directory.
pub const MODEL_FILE: &str = "model.json";
/// File name of the label encoder artifact inside a model directory.
pub const ENCODER_FILE: &str = "label_encoder.json";

/// Raw class index produced by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawLabel(pub usize);

/// Human-readable class name, e.g. `"phishing"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Label(pub String);

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors from loading or running a classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact: {0}")]
    InvalidModel(String),
    #[error("invalid label encoder: {0}")]
    InvalidEncoder(String),
    #[error("feature schema mismatch at column {index}: model expects {found:?}, extractor produces {expected:?}")]
    SchemaMismatch {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("model predicts {model} classes but label encoder knows {encoder}")]
    ClassCountMismatch { model: usize, encoder: usize },
    #[error("label encoder has no class for index {0}")]
    UnknownClass(usize),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// A trained model together with its label decoder.
pub trait Classifier: Send + Sync {
    /// Run the model on one feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<RawLabel, ClassifierError>;

    /// Map a raw model output back to its class name.
    fn decode(&self, raw: RawLabel) -> Result<Label, ClassifierError>;
}

/// Locations of the persisted artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub encoder: PathBuf,
}

impl ArtifactPaths {
    /// The standard file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model: dir.join(MODEL_FILE),
            encoder: dir.join(ENCODER_FILE),
        }
    }
}

/// Tree-ensemble model and label encoder read from JSON artifacts.
#[derive(Debug)]
pub struct ArtifactClassifier {
    model: TreeEnsemble,
    encoder: LabelEncoder,
}

impl ArtifactClassifier {
    /// Read and cross-check both artifacts.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ClassifierError> {
        let model = TreeEnsemble::load(&paths.model)?;
        let encoder = LabelEncoder::load(&paths.encoder)?;
        Self::new(model, encoder)
    }

    pub fn new(model: TreeEnsemble, encoder: LabelEncoder) -> Result<Self, ClassifierError> {
        if model.n_classes() != encoder.len() {
            return Err(ClassifierError::ClassCountMismatch {
                model: model.n_classes(),
                encoder: encoder.len(),
            });
        }
        Ok(Self { model, encoder })
    }

    pub fn classes(&self) -> &[String] {
        self.encoder.classes()
    }

    pub fn tree_count(&self) -> usize {
        self.model.tree_count()
    }
}

impl Classifier for ArtifactClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<RawLabel, ClassifierError> {
        self.model.predict(&features.to_array()).map(RawLabel)
    }

    fn decode(&self, raw: RawLabel) -> Result<Label, ClassifierError> {
        self.encoder.inverse_transform(raw)
    }
}

/// Why an adapter call did not produce a value.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// The loaded classifier, or the reason it could not be loaded.
#[derive(Clone)]
pub enum ClassifierAdapter {
    Ready(Arc<dyn Classifier>),
    Unavailable { reason: String },
}

impl fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("ClassifierAdapter::Ready"),
            Self::Unavailable { reason } => f
                .debug_struct("ClassifierAdapter::Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

impl ClassifierAdapter {
    /// Load artifacts once. Failures are logged and yield `Unavailable`.
    pub fn load(paths: &ArtifactPaths) -> Self {
        match ArtifactClassifier::load(paths) {
            Ok(classifier) => {
                info!(
                    model = %paths.model.display(),
                    trees = classifier.tree_count(),
                    classes = ?classifier.classes(),
                    "classifier loaded"
                );
                Self::Ready(Arc::new(classifier))
            }
            Err(e) => {
                warn!(
                    model = %paths.model.display(),
                    encoder = %paths.encoder.display(),
                    "classifier unavailable: {e}"
                );
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn ready(classifier: impl Classifier + 'static) -> Self {
        Self::Ready(Arc::new(classifier))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<RawLabel, AdapterError> {
        Ok(self.classifier()?.predict(features)?)
    }

    pub fn decode(&self, raw: RawLabel) -> Result<Label, AdapterError> {
        Ok(self.classifier()?.decode(raw)?)
    }

    fn classifier(&self) -> Result<&dyn Classifier, AdapterError> {
        match self {
            Self::Ready(c) => Ok(c.as_ref()),
            Self::Unavailable { reason } => Err(AdapterError::Unavailable(reason.clone())),
        }
    }
}

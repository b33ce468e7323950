//! URLGuard: classify URLs from their lexical and structural features.
//!
//! A URL string is reduced to a fixed 21-column [`FeatureVector`] by the
//! [`FeatureExtractor`], handed to an opaque trained [`Classifier`], and the
//! raw output is decoded into a [`Label`]. [`PredictionService`] ties the
//! steps together for request handlers.

pub mod classifier;
pub mod error;
pub mod features;
pub mod patterns;
pub mod schema;
pub mod service;
mod split;

pub use classifier::{
    AdapterError, ArtifactClassifier, ArtifactPaths, Classifier, ClassifierAdapter,
    ClassifierError, Label, RawLabel,
};
pub use error::PredictionError;
pub use features::{extract_features, FeatureExtractor};
pub use patterns::warm_up;
pub use schema::{FeatureVector, SchemaError, FEATURE_DIM, FEATURE_NAMES, SCHEMA_VERSION};
pub use service::{PredictionResult, PredictionService};

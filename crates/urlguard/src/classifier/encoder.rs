//! Label encoder artifact: class names indexed by raw model output.

use super::{ClassifierError, Label, RawLabel};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let data = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let encoder: Self = serde_json::from_str(&data).map_err(|source| ClassifierError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        encoder.validate()?;
        Ok(encoder)
    }

    pub fn new(classes: Vec<String>) -> Result<Self, ClassifierError> {
        let encoder = Self { classes };
        encoder.validate()?;
        Ok(encoder)
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if self.classes.is_empty() {
            return Err(ClassifierError::InvalidEncoder("no classes".into()));
        }
        let mut seen = HashSet::new();
        for class in &self.classes {
            if !seen.insert(class.as_str()) {
                return Err(ClassifierError::InvalidEncoder(format!(
                    "duplicate class {class:?}"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn inverse_transform(&self, raw: RawLabel) -> Result<Label, ClassifierError> {
        self.classes
            .get(raw.0)
            .map(|c| Label(c.clone()))
            .ok_or(ClassifierError::UnknownClass(raw.0))
    }
}

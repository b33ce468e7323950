//! Tree-ensemble model artifact.
//!
//! The training toolchain exports its forest as JSON: a list of trees, each a
//! flat node array rooted at index 0. Splits send `x[feature] <= threshold`
//! left. Prediction averages each tree's normalised leaf distribution and
//! picks the class with the highest mean (lowest index on ties).

use super::ClassifierError;
use crate::schema::{first_mismatch, FEATURE_DIM, FEATURE_NAMES, SCHEMA_VERSION};
use serde::Deserialize;
use std::path::Path;

/// Value of the `format` field this loader understands.
pub const ENSEMBLE_FORMAT: &str = "tree-ensemble";

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    format: String,
    schema_version: u32,
    feature_names: Vec<String>,
    n_classes: usize,
    trees: Vec<Tree>,
}

impl TreeEnsemble {
    /// Read and validate a model artifact.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let data = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_str(&data).map_err(|source| ClassifierError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Parse and validate a model held in memory.
    pub fn from_json(data: &str) -> Result<Self, ClassifierError> {
        let model: Self = serde_json::from_str(data)
            .map_err(|e| ClassifierError::InvalidModel(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        let invalid = |msg: String| Err(ClassifierError::InvalidModel(msg));

        if self.format != ENSEMBLE_FORMAT {
            return invalid(format!(
                "unsupported format {:?}, expected {ENSEMBLE_FORMAT:?}",
                self.format
            ));
        }
        if self.schema_version != SCHEMA_VERSION {
            return invalid(format!(
                "schema version {} does not match extractor schema version {SCHEMA_VERSION}",
                self.schema_version
            ));
        }
        if let Some(index) = first_mismatch(&self.feature_names) {
            return Err(ClassifierError::SchemaMismatch {
                index,
                expected: FEATURE_NAMES.get(index).copied().unwrap_or("<none>").to_string(),
                found: self
                    .feature_names
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| "<none>".to_string()),
            });
        }
        if self.n_classes == 0 {
            return invalid("n_classes must be at least 1".into());
        }
        if self.trees.is_empty() {
            return invalid("ensemble has no trees".into());
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return invalid(format!("tree {t} has no nodes"));
            }
            let len = tree.nodes.len();
            for (i, node) in tree.nodes.iter().enumerate() {
                match node {
                    Node::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    } => {
                        if *feature >= FEATURE_DIM {
                            return invalid(format!(
                                "tree {t} node {i} splits on column {feature}, only {FEATURE_DIM} exist"
                            ));
                        }
                        if !threshold.is_finite() {
                            return invalid(format!("tree {t} node {i} has a non-finite threshold"));
                        }
                        // Children must come after their parent, which rules out cycles.
                        for child in [*left, *right] {
                            if child <= i || child >= len {
                                return invalid(format!(
                                    "tree {t} node {i} points at invalid child {child}"
                                ));
                            }
                        }
                    }
                    Node::Leaf { value } => {
                        if value.len() != self.n_classes {
                            return invalid(format!(
                                "tree {t} leaf {i} has {} weights, expected {}",
                                value.len(),
                                self.n_classes
                            ));
                        }
                        if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                            return invalid(format!("tree {t} leaf {i} has a negative or non-finite weight"));
                        }
                        if value.iter().sum::<f64>() <= 0.0 {
                            return invalid(format!("tree {t} leaf {i} has zero total weight"));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Class index for one row of features.
    pub fn predict(&self, x: &[f64; FEATURE_DIM]) -> Result<usize, ClassifierError> {
        let mut mean = vec![0.0f64; self.n_classes];
        for tree in &self.trees {
            let leaf = tree.leaf_for(x)?;
            let total: f64 = leaf.iter().sum();
            for (acc, w) in mean.iter_mut().zip(leaf) {
                *acc += w / total;
            }
        }

        let mut best = 0;
        for (i, score) in mean.iter().enumerate() {
            if *score > mean[best] {
                best = i;
            }
        }
        Ok(best)
    }
}

impl Tree {
    fn leaf_for(&self, x: &[f64; FEATURE_DIM]) -> Result<&[f64], ClassifierError> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return Ok(value),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let v = x.get(*feature).copied().ok_or_else(|| {
                        ClassifierError::Inference(format!("feature column {feature} out of range"))
                    })?;
                    let next = if v <= *threshold { *left } else { *right };
                    if next <= idx {
                        return Err(ClassifierError::Inference(format!(
                            "node {idx} does not advance"
                        )));
                    }
                    idx = next;
                }
                None => {
                    return Err(ClassifierError::Inference(format!(
                        "node {idx} does not exist"
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FEAT_HAS_SUSPICIOUS_WORD, FEAT_URL_LENGTH};
    use serde_json::json;

    fn ensemble(trees: serde_json::Value, n_classes: usize) -> serde_json::Value {
        json!({
            "format": ENSEMBLE_FORMAT,
            "schema_version": SCHEMA_VERSION,
            "feature_names": FEATURE_NAMES,
            "n_classes": n_classes,
            "trees": trees,
        })
    }

    fn row(pairs: &[(usize, f64)]) -> [f64; FEATURE_DIM] {
        let mut x = [0.0; FEATURE_DIM];
        for &(i, v) in pairs {
            x[i] = v;
        }
        x
    }

    #[test]
    fn test_threshold_goes_left_when_equal() {
        let model = TreeEnsemble::from_json(
            &ensemble(
                json!([{ "nodes": [
                    { "feature": FEAT_URL_LENGTH, "threshold": 50.0, "left": 1, "right": 2 },
                    { "value": [3.0, 1.0] },
                    { "value": [0.0, 2.0] }
                ]}]),
                2,
            )
            .to_string(),
        )
        .unwrap();

        assert_eq!(model.predict(&row(&[(FEAT_URL_LENGTH, 50.0)])).unwrap(), 0);
        assert_eq!(model.predict(&row(&[(FEAT_URL_LENGTH, 50.5)])).unwrap(), 1);
    }

    #[test]
    fn test_votes_are_averaged_across_trees() {
        // Tree 1 leans benign weakly, trees 2 and 3 vote phishing outright
        // only when a suspicious word is present.
        let trees = json!([
            { "nodes": [ { "value": [6.0, 4.0] } ] },
            { "nodes": [
                { "feature": FEAT_HAS_SUSPICIOUS_WORD, "threshold": 0.5, "left": 1, "right": 2 },
                { "value": [1.0, 0.0] },
                { "value": [0.0, 1.0] }
            ]},
            { "nodes": [
                { "feature": FEAT_HAS_SUSPICIOUS_WORD, "threshold": 0.5, "left": 1, "right": 2 },
                { "value": [5.0, 5.0] },
                { "value": [0.0, 9.0] }
            ]}
        ]);
        let model = TreeEnsemble::from_json(&ensemble(trees, 2).to_string()).unwrap();

        assert_eq!(model.predict(&row(&[])).unwrap(), 0);
        assert_eq!(model.predict(&row(&[(FEAT_HAS_SUSPICIOUS_WORD, 1.0)])).unwrap(), 1);
    }

    #[test]
    fn test_ties_pick_lowest_index() {
        let model = TreeEnsemble::from_json(
            &ensemble(json!([{ "nodes": [ { "value": [1.0, 1.0, 1.0] } ] }]), 3).to_string(),
        )
        .unwrap();
        assert_eq!(model.predict(&row(&[])).unwrap(), 0);
    }

    #[test]
    fn test_rejects_backward_child() {
        let err = TreeEnsemble::from_json(
            &ensemble(
                json!([{ "nodes": [
                    { "value": [1.0, 0.0] },
                    { "feature": 0, "threshold": 0.5, "left": 0, "right": 0 }
                ]}]),
                2,
            )
            .to_string(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid child"));
    }

    #[test]
    fn test_rejects_out_of_range_feature() {
        let err = TreeEnsemble::from_json(
            &ensemble(
                json!([{ "nodes": [
                    { "feature": 21, "threshold": 0.5, "left": 1, "right": 2 },
                    { "value": [1.0, 0.0] },
                    { "value": [0.0, 1.0] }
                ]}]),
                2,
            )
            .to_string(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("column 21"));
    }

    #[test]
    fn test_rejects_leaf_width_mismatch() {
        let err = TreeEnsemble::from_json(
            &ensemble(json!([{ "nodes": [ { "value": [1.0] } ] }]), 2).to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidModel(_)));
    }

    #[test]
    fn test_rejects_wrong_format_and_version() {
        let mut doc = ensemble(json!([{ "nodes": [ { "value": [1.0] } ] }]), 1);
        doc["format"] = json!("pickle");
        assert!(TreeEnsemble::from_json(&doc.to_string()).is_err());

        let mut doc = ensemble(json!([{ "nodes": [ { "value": [1.0] } ] }]), 1);
        doc["schema_version"] = json!(SCHEMA_VERSION + 1);
        let err = TreeEnsemble::from_json(&doc.to_string()).unwrap_err();
        assert!(err.to_string().contains("schema version"));
    }

    #[test]
    fn test_rejects_empty_ensemble() {
        let err = TreeEnsemble::from_json(&ensemble(json!([]), 2).to_string()).unwrap_err();
        assert!(err.to_string().contains("no trees"));
    }
}

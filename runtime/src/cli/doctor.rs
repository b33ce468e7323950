//! Readiness check for the model artifacts.
//!
//! Each check reports ok, warn or fail with a fix hint. A single failure
//! means `serve` would come up with the classifier unavailable.

use crate::cli::output::{self, Styled};
use crate::config::RuntimeConfig;
use crate::logging;
use anyhow::Result;
use serde::Serialize;
use urlguard::classifier::encoder::LabelEncoder;
use urlguard::classifier::forest::TreeEnsemble;
use urlguard::{
    extract_features, ArtifactClassifier, ClassifierAdapter, PredictionService, FEATURE_DIM,
    SCHEMA_VERSION,
};

const SMOKE_URL: &str = "https://www.google.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub name: &'static str,
    pub status: CheckStatus,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

impl Check {
    fn ok(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Ok,
            detail: detail.into(),
            fix: None,
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Fail,
            detail: detail.into(),
            fix: Some(fix.into()),
        }
    }

    fn warn(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Warn,
            detail: detail.into(),
            fix: None,
        }
    }
}

/// Run every check in order. Later checks are skipped once an artifact fails to load.
pub fn collect(config: &RuntimeConfig) -> Vec<Check> {
    let mut checks = Vec::new();
    let paths = config.artifact_paths();

    let sample = extract_features(SMOKE_URL);
    checks.push(if sample.to_array().len() == FEATURE_DIM {
        Check::ok(
            "Extractor:",
            format!("{FEATURE_DIM} features, schema v{SCHEMA_VERSION}"),
        )
    } else {
        Check::fail(
            "Extractor:",
            "feature vector has the wrong width",
            "Rebuild urlguard; the schema constant and extractor disagree.",
        )
    });

    if config.model_dir.is_dir() {
        checks.push(Check::ok(
            "Model dir:",
            config.model_dir.display().to_string(),
        ));
    } else {
        checks.push(Check::fail(
            "Model dir:",
            format!("{} does not exist", config.model_dir.display()),
            "Create it and copy model.json and label_encoder.json from the training run, or pass --model-dir.",
        ));
        return checks;
    }

    let model = match TreeEnsemble::load(&paths.model) {
        Ok(m) => {
            checks.push(Check::ok(
                "Model:",
                format!("{} trees, {} classes", m.tree_count(), m.n_classes()),
            ));
            Some(m)
        }
        Err(e) => {
            checks.push(Check::fail(
                "Model:",
                e.to_string(),
                "Re-export the model from the training toolchain for this schema version.",
            ));
            None
        }
    };

    let encoder = match LabelEncoder::load(&paths.encoder) {
        Ok(enc) => {
            checks.push(Check::ok("Labels:", enc.classes().join(", ")));
            Some(enc)
        }
        Err(e) => {
            checks.push(Check::fail(
                "Labels:",
                e.to_string(),
                "Export label_encoder.json from the same training run as model.json.",
            ));
            None
        }
    };

    let (Some(model), Some(encoder)) = (model, encoder) else {
        return checks;
    };

    let classifier = match ArtifactClassifier::new(model, encoder) {
        Ok(c) => {
            checks.push(Check::ok("Consistency:", "model and labels agree"));
            c
        }
        Err(e) => {
            checks.push(Check::fail(
                "Consistency:",
                e.to_string(),
                "model.json and label_encoder.json come from different training runs.",
            ));
            return checks;
        }
    };

    let service = PredictionService::new(ClassifierAdapter::ready(classifier));
    checks.push(match service.handle(SMOKE_URL) {
        Ok(result) => Check::ok("Smoke test:", format!("{SMOKE_URL} -> {}", result.label)),
        Err(e) => Check::warn("Smoke test:", format!("{SMOKE_URL} failed: {e}")),
    });

    checks
}

/// Print the report. Returns whether the runtime is ready to serve.
pub fn run(config: &RuntimeConfig) -> Result<bool> {
    logging::init(config.log_format, logging::CLI_FILTER)?;
    let checks = collect(config);
    let ready = checks.iter().all(|c| c.status != CheckStatus::Fail);

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "ready": ready,
            "model_dir": config.model_dir.display().to_string(),
            "checks": checks,
        }));
        return Ok(ready);
    }

    let s = Styled::new();
    output::print_header(&s);
    output::print_section(&s, "Model");
    for check in &checks {
        let sym = match check.status {
            CheckStatus::Ok => s.ok_sym(),
            CheckStatus::Warn => s.warn_sym(),
            CheckStatus::Fail => s.fail_sym(),
        };
        output::print_check(sym, check.name, &check.detail);
        if let Some(fix) = &check.fix {
            output::print_detail(fix);
        }
    }

    let failed = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Fail)
        .count();
    if ready {
        output::print_status(&s, &s.green("ready"), "all checks passed");
    } else {
        output::print_status(&s, &s.red("not ready"), &format!("{failed} check(s) failed"));
    }
    Ok(ready)
}

use metrics_exporter_prometheus::PrometheusHandle;
use quote_desk::error::AppError;
use quote_desk::workflows::catalog_import::CatalogImporter;
use quote_desk::workflows::quoting::{CatalogRepository, CatalogSnapshot, RepositoryError};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog loaded once at startup and served read-only to every request.
#[derive(Clone)]
pub(crate) struct StaticCatalogRepository {
    snapshot: Arc<CatalogSnapshot>,
}

impl StaticCatalogRepository {
    pub(crate) fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    pub(crate) fn load(
        document_path: Option<&Path>,
        rules_path: Option<&Path>,
    ) -> Result<Self, AppError> {
        let snapshot = CatalogImporter::load(document_path, rules_path)?;
        Ok(Self::new(snapshot))
    }
}

impl CatalogRepository for StaticCatalogRepository {
    fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, RepositoryError> {
        Ok(self.snapshot.clone())
    }
}

/// Parse `QUESTION=yes|no|unanswered` into a question id and an optional answer.
pub(crate) fn parse_answer(raw: &str) -> Result<(String, Option<bool>), String> {
    let (question, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION=yes|no, got '{raw}'"))?;

    let question = question.trim();
    if question.is_empty() {
        return Err(format!("missing question id in '{raw}'"));
    }

    let answer = match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Some(true),
        "no" | "n" | "false" => Some(false),
        "" | "unanswered" | "skip" => None,
        other => return Err(format!("unrecognized answer '{other}' for question {question}")),
    };

    Ok((question.to_string(), answer))
}

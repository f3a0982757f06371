mod normalizer;
mod parser;

use crate::workflows::quoting::catalog::{CatalogDocument, CatalogError, CatalogSnapshot};
use crate::workflows::quoting::domain::EligibilityRule;
use std::io::Read;
use std::path::Path;
use tracing::info;

const SEED_CATALOG: &str = include_str!("../../../data/seed_catalog.json");

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    Catalog(CatalogError),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Json(err) => write!(f, "invalid catalog JSON: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid rule sheet CSV: {}", err),
            CatalogImportError::Catalog(err) => write!(f, "catalog rejected: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Json(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Catalog(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<CatalogError> for CatalogImportError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

/// Loads catalog exports produced by the admin subsystem.
pub struct CatalogImporter;

impl CatalogImporter {
    /// The reference data set shipped with the crate.
    pub fn seed() -> Result<CatalogSnapshot, CatalogImportError> {
        Self::from_reader(SEED_CATALOG.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CatalogSnapshot, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<CatalogSnapshot, CatalogImportError> {
        let document = Self::document_from_reader(reader)?;
        Self::snapshot(document)
    }

    pub fn document_from_reader<R: Read>(reader: R) -> Result<CatalogDocument, CatalogImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn rules_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<EligibilityRule>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::rules_from_reader(file)
    }

    pub fn rules_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<EligibilityRule>, CatalogImportError> {
        Ok(parser::parse_rule_sheet(reader)?)
    }

    /// Resolve the configured sources: a document (or the seed) optionally overlaid with a
    /// rule sheet that replaces the document's rules.
    pub fn load(
        document_path: Option<&Path>,
        rules_path: Option<&Path>,
    ) -> Result<CatalogSnapshot, CatalogImportError> {
        let document = match document_path {
            Some(path) => Self::document_from_reader(std::fs::File::open(path)?)?,
            None => Self::document_from_reader(SEED_CATALOG.as_bytes())?,
        };

        let document = match rules_path {
            Some(path) => document.with_rules(Self::rules_from_path(path)?),
            None => document,
        };

        Self::snapshot(document)
    }

    fn snapshot(document: CatalogDocument) -> Result<CatalogSnapshot, CatalogImportError> {
        let snapshot = CatalogSnapshot::from_document(document)?;
        let document = snapshot.document();
        info!(
            plans = document.plans.len(),
            rules = document.rules.len(),
            questions = document.questions.len(),
            "catalog snapshot loaded"
        );
        Ok(snapshot)
    }
}

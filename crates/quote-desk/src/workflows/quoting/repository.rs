use std::sync::Arc;

use super::catalog::CatalogSnapshot;

/// Storage abstraction supplying catalog snapshots so the service can be exercised in isolation.
///
/// Implementations must hand out a snapshot that is not mutated while a quote runs; swapping
/// in a fresh `Arc` between quotes is fine.
pub trait CatalogRepository: Send + Sync {
    fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, RepositoryError>;
}

/// Error enumeration for catalog fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

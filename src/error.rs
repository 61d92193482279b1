//! Errors surfaced by a packing run.

use thiserror::Error;

use crate::types::Dimensions;

pub type Result<T> = std::result::Result<T, PackError>;

/// Every variant is terminal for the whole run; no partial result is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PackError {
    #[error("no items requested")]
    EmptyDemand,

    #[error("no containers available")]
    EmptyCatalog,

    #[error("item '{name}' ({dimensions}) does not fit any container in any orientation")]
    ItemExceedsAllContainers { name: String, dimensions: Dimensions },

    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),
}

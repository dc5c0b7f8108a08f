//! Desk errors
use cra_core::{ContentError, ValidationError};
use cra_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("EXPORT/{0}")]
    Export(#[from] serde_json::Error),
}

impl DeskError {
    /// Whether the user can fix this by correcting their input
    pub fn is_validation(&self) -> bool {
        matches!(self, DeskError::Validation(_))
    }
}

//! Identifier assignment for new changes
use cra_core::Change;

use crate::error::StoreError;

/// One more than the largest existing id, or 1 for an empty list.
///
/// Only safe with a single writer, which the store guarantees. Fails with
/// [`StoreError::IdsExhausted`] once some change already holds `u32::MAX`.
pub fn next_id(changes: &[Change]) -> Result<u32, StoreError> {
    let max = changes.iter().map(|c| c.id).max().unwrap_or(0);
    max.checked_add(1).ok_or(StoreError::IdsExhausted { max })
}

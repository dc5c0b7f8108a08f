//! Store errors
use thiserror::Error;

/// Slot I/O, serialization or id assignment failed
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("STORE/io: {0}")]
    Io(#[from] std::io::Error),

    #[error("STORE/serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("STORE/ids exhausted: a change already has id {max}")]
    IdsExhausted { max: u32 },
}

/// The slot held a value that is not a valid state.
///
/// Recovered by reseeding; kept distinct from an empty first-run slot so
/// callers can tell the user their saved data was discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("PERSIST/slot holds unparseable state: {reason}")]
pub struct PersistenceReadError {
    pub reason: String,
}

impl From<serde_json::Error> for PersistenceReadError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            reason: err.to_string(),
        }
    }
}

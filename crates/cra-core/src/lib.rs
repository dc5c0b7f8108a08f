//! CRA Core: Entity Model, Content Configuration, and Clock
//!
//! Shared vocabulary of Change Risk Autopilot: the persisted `AppState`
//! aggregate, the injected `AppContent` configuration, and the error kinds
//! surfaced to callers.

pub mod clock;
pub mod content;
pub mod data_model;
pub mod error;
pub mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use content::{
    AppContent, Brand, DemoData, Lookups, NavItem, RelativeTime, SeedChange, SeedIncident,
    STORAGE_KEY,
};
pub use data_model::{
    AppState, Change, ChangeStatus, CustomerImpact, Incident, RiskRule, System, TourState,
};
pub use error::{ContentError, ValidationError};
pub use timestamp::{hours_between, parse_local, LocalTimestamp, MINUTE_FORMAT};

/// Version of the CRA core model
pub const CRA_VERSION: &str = env!("CARGO_PKG_VERSION");

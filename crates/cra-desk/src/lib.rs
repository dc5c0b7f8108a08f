//! CRA Desk: Core Calls for Presentation Layers
//!
//! [`Desk`] is the one handle a UI holds. It owns the injected content, the
//! state store and the current state, and exposes the operations a view
//! needs: scoring, the risk queue, change creation, reset, export and the
//! optional guided tour.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use cra_core::{AppContent, CustomerImpact, FixedClock};
//! use cra_desk::{ChangeDraft, Desk, DASHBOARD_QUEUE_LEN};
//! use cra_store::MemorySlot;
//!
//! let now = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let mut desk = Desk::open(
//!     AppContent::reference(),
//!     MemorySlot::new(),
//!     Arc::new(FixedClock::new(now)),
//! ).unwrap();
//!
//! let change = desk.create_change(
//!     ChangeDraft::blank(now)
//!         .change_type("patch")
//!         .impact(CustomerImpact::Low)
//!         .systems([4])
//!         .rollback_plan("Restore the previous package from the local cache.")
//!         .test_plan("Mount two shares from a workstation and copy a file."),
//! );
//! assert!(change.is_err()); // title is required
//!
//! for entry in desk.risk_queue(DASHBOARD_QUEUE_LEN) {
//!     println!("{} {}", entry.risk.summary(), entry.change.title);
//! }
//! ```

pub mod desk;
pub mod draft;
pub mod error;
pub mod tour;

pub use desk::{Desk, QueueEntry, DASHBOARD_QUEUE_LEN, NO_SYSTEMS_LABEL};
pub use draft::{default_window, ChangeDraft, FALLBACK_CHANGE_TYPE};
pub use error::DeskError;
pub use tour::{Tour, TourStep};

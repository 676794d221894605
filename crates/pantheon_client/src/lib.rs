//! Pantheon Client - asynchronous client layer for the dashboard backend
//!
//! Owns the remote collaborator seam (`BackendApi`), its HTTP
//! implementation, and the outreach workflow that turns a selection
//! into a deduplicated, partially-failable batch action with a single
//! aggregated report.

pub mod api;
pub mod markers;
pub mod outreach;
pub mod report;

pub use api::{ApiError, BackendApi, HttpBackend};
pub use markers::AppliedMarkers;
pub use outreach::{BatchState, OutreachError, OutreachWorkflow};
pub use report::{BatchOutcome, BatchReport};

//! HTTP API module for the flexible working hours engine.
//!
//! This module exposes the calculations as JSON endpoints for a
//! presentation layer such as a browser extension popup.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ClockInRequest, LeaveStrategyRequest, RemainingTimeRequest, ReportRequest};
pub use response::{ApiError, ReportResponse, RulesResponse};
pub use state::AppState;

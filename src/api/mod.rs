//! HTTP API module for the fleet payroll engine.
//!
//! This module exposes imports, entry listing and export, branch
//! configuration editing, and the financial and operational reports over
//! REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{FilterQuery, ImportFileRequest, ImportRequest};
pub use response::{ApiError, ApiErrorResponse, SummaryResponse};
pub use state::AppState;

//! HTTP/REST API adapter.
//!
//! Inbound adapter exposing the practice records, chat and assistant seams
//! over REST.

mod controller;
mod error;
mod handlers;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use error::{ApiError, ErrorCode};
pub use request::*;
pub use response::*;

//! Request and Response models for the service API
//!
//! DTOs for the HTTP surface. Request shapes are strict: unknown JSON
//! fields are rejected at decode time.

pub mod requests;
pub mod responses;

pub use requests::{ReadRequest, WriteRequest};
pub use responses::{ErrorResponse, ReadResult};

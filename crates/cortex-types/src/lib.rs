//! Core types for the Cortex memory API client.
//!
//! Response DTOs mirror the service's JSON (snake_case fields); request types are
//! plain Rust values that the client turns into either body- or query-scoped calls.

mod dto;
mod error;
mod tenant;
mod traits;

pub use dto::*;
pub use error::*;
pub use tenant::*;
pub use traits::*;

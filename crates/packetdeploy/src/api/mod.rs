//! Client for the Packet bare metal API.
//!
//! Every call is scoped either to the configured project, to the
//! organization (only when no project is set), or to no scope at all for
//! operating systems and per-device operations.

mod client;
mod error;
mod models;

pub use client::{PacketApi, ANY_FACILITY, AUTH_HEADER, USER_AGENT};
pub use error::ApiError;
pub use models::*;

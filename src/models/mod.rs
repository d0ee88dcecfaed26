//! Request and response models shared across the crate.
//!
//! This module contains the data structures used to describe traffic
//! flowing through the offline worker:
//!
//! - `Method`, `Request`: an outgoing request from a controlled page
//! - `Response`: a complete HTTP-like response (status, headers, body)

pub mod request;
pub mod response;

pub use request::{Method, Request};
pub use response::Response;

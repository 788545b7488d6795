//! Shared API types - Response envelopes used across handlers

mod response;

pub use response::{Created, IdResponse};

//! Shared error types and result helpers

pub mod error;
pub mod result;

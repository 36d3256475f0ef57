//! Shared wire model and HTTP client for the SmartWaste backend API.
//!
//! Both clients are leaf consumers of the backend: they deserialize what it
//! returns and forward user actions, never deriving or persisting state of
//! their own.

pub mod api;
pub mod error;
pub mod models;

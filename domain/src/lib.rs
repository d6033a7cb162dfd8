//! Client library for the Rainforest QA test-automation API.
//!
//! [`RainforestClient`] maps each operation onto a single authenticated request:
//! enqueue runs of selected tests, manage tests, and manage generators (CSV-backed
//! template variable sets) and their rows. Responses come back as [`ApiResponse`]
//! values, unmodified, whatever their status.

pub mod error;
pub mod gateway;
pub mod generator;
pub mod response;
pub mod test;

pub use error::Error;
pub use gateway::rainforest::{ClientConfig, RainforestClient};
pub use response::ApiResponse;

//! Configuration module.
//!
//! Handles warehouse connection configuration and environment variables.

mod connection;

pub use connection::{ConnectionConfig, ConnectionError, Driver};

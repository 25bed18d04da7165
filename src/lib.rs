// src/lib.rs

//! newsgate — quota-aware gateway to an external news search API.

pub mod cache;
pub mod error;
pub mod gateway;
pub mod models;
pub mod quota;
pub mod services;
pub mod upstream;

pub use error::{GatewayError, Result};
pub use gateway::NewsGateway;

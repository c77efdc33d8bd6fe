// src/core/mod.rs

pub mod net;
pub mod salary;
pub mod sanitize;

pub use net::{Fetch, HttpFetcher, TransportError};
pub use salary::normalize;

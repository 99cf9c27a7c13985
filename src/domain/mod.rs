//! Domain layer for StarPulse
//!
//! Profile models, configuration types, errors and the ports the search
//! controller talks to.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{CacheError, ControllerError, ProfileError};

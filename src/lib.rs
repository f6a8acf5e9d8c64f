//! Helpers for CompOS on-device tests: job scheduler polling, directory
//! checksums, environment preconditions, and the embedded class
//! redefinition fixture.

pub mod clock;
pub mod compos;
pub mod config;
pub mod device;
pub mod error;
pub mod fixture;

pub use error::{Error, Result};

//! Shared runtime helpers for the date store binaries and server crate.

pub mod env;
pub mod utils;

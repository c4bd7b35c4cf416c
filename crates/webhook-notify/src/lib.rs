//! Post CI build fields to a webhook as a fixed JSON envelope.

pub mod cli;
pub mod config;
pub mod error;
pub mod fields;
pub mod payload;
pub mod sink;

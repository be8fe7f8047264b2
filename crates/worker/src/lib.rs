//! Background maintenance for the lexicon dictionary.
//!
//! The binary in `main.rs` wires [`config::WorkerConfig`] to the jobs in
//! [`jobs`]; both are exposed here so they can be driven from tests.

pub mod config;
pub mod jobs;

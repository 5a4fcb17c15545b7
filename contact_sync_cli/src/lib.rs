//! Command line front end for the contact sync library
//!
//! The binary lives in `main.rs`; the modules here are shared with the
//! integration tests.

pub mod commands;
pub mod config;
pub mod context;
pub mod output;
pub mod paths;
pub mod terminal;

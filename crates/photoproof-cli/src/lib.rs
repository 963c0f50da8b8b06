//! # photoproof-cli — PhotoProof Driver
//!
//! The `photoproof` binary: a thin driver around `photoproof-pcd` that sets
//! up a camera, runs editor chains and reports verifier verdicts. All
//! protocol logic lives in the library crates; this crate only parses
//! arguments, loads configuration and prints JSON.
//!
//! ## Subcommands
//!
//! - `photoproof demo`: run camera → editors → verifier chains.
//! - `photoproof relation`: print the compiled compliance relation.

pub mod config;
pub mod demo;
pub mod relation;

//! Pixelsong CLI library.
//!
//! Image loading, run configuration and the command implementations behind
//! the `pixelsong` binary.

pub mod commands;
pub mod config;
pub mod input;

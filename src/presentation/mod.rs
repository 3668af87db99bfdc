//! Presentation Layer
//!
//! CLI argument parsing (via clap). Rendering lives in the binary's `ui`
//! module; this layer only describes what the user asked for.

pub mod cli;

pub use cli::{Cli, ColorWhen, Commands, SourceArgs};

//! Command-line interface module.

mod args;
pub mod annotate;
pub mod common;
pub mod filter;
pub mod run;

pub use args::{Cli, Commands, IoArgs};

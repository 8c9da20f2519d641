//! Command-line surface: argument parsing and exit-code policy.

pub mod args;
pub mod exit;

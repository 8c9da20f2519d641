//! CSV intake: file reading, header checks, and row partitioning.

pub mod fatal;
pub mod header;
pub mod input;
pub mod partition;

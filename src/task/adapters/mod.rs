//! Adapter implementations for task persistence ports.

pub mod json_file;
pub mod memory;

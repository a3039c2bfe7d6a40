//! Unit tests for the task module.

mod hierarchy_tests;
mod record_tests;

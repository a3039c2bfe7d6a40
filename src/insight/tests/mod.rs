//! Unit tests for the derived views.

mod classify_tests;
mod due_tests;

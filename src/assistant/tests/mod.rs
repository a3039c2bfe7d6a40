//! Unit tests for the assistant.

//! Step definitions for planning scenarios.

#[path = "../test_helpers/clock.rs"]
pub mod clock;
pub mod given;
pub mod then;
pub mod when;
pub mod world;

//! Derived-state maintenance that runs after writes.

pub mod progress;

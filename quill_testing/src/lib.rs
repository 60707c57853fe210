//! Fake backends for manual and automated testing.

pub mod admin;

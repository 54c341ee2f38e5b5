//! Shared test fixtures for SpecForge crates.
//!
//! - [`person`] - the `Person` entity, its canonical rules, and sample data
//! - [`probe`] - an entity that counts field reads, for short-circuit tests
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! specforge-test = { workspace = true }
//! ```
//!
//! Only integration tests (`tests/`) should use it; unit tests inside
//! `specforge` would see a second copy of that crate.

pub mod person;
pub mod probe;

pub use person::{has_consent, has_email, is_adult, sample_people, Person};
pub use probe::Probe;

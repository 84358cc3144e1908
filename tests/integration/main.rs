//! Integration tests for relationship resolution against an in-memory API.
//!
//! Every test builds its own registry over a [`MockConnection`] and asserts on
//! the exact requests a resolution performed.

mod common;
mod config;
mod has_one;
mod registry;

//! Configuration types
//!
//! Board-agnostic tunables. Hosts load them from TOML or postcard binary
//! data; firmware may compile them in.

pub mod tuning;

pub use tuning::*;

//! Deterministic random number generation
//!
//! Uses xorshift64* for fast, reproducible workload generation.

mod xorshift;

pub use xorshift::RngManager;

//! Defines common types that many crates can depend on
pub mod allowance;
pub mod chain;
pub mod registry;
pub mod token;

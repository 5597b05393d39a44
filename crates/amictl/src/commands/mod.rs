//! Command implementations

pub mod get;

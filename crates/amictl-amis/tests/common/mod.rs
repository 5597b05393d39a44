//! Shared test utilities for resolver integration tests

pub mod mock_aws;

pub use mock_aws::*;

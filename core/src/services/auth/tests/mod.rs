//! Tests for authentication service

#[cfg(test)]
mod rate_limiter_tests;

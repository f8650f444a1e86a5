//! Tests for verification service

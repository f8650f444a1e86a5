//! Onboarding route handlers

pub mod complete;
pub mod teams;

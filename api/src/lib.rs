//! HTTP surface of the Scoreboard backend: phone sign-in, session cookie
//! handoff, onboarding and SMS delivery callbacks.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure, AppState, HealthProbe};

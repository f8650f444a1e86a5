//! SMS provider webhook and status routes

pub mod status;

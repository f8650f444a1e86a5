//! Authentication route handlers
//!
//! - Phone verification (sending and verifying codes)
//! - Current session lookup
//! - Sign-out

pub mod me;
pub mod send_code;
pub mod signout;
pub mod verify_code;

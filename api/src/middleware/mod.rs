pub mod cors;
pub mod session;

pub use cors::create_cors;
pub use session::{clear_session_cookie, session_cookie, SessionRejected, SessionUser};

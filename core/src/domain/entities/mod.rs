//! Domain entities representing core business objects.

pub mod favorite_team;
pub mod session;
pub mod user;
pub mod verification_code;

// Re-export commonly used types
pub use favorite_team::{FavoriteTeam, DEFAULT_SPORT, MAX_FAVORITE_TEAMS};
pub use session::{SessionClaims, SessionToken, VerifiedUser};
pub use user::User;
pub use verification_code::{
    CodeState, VerificationCode, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};

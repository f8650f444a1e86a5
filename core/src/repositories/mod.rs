pub mod favorite_team;
pub mod user;
pub mod verification;

pub use favorite_team::{FavoriteTeamRepository, InMemoryFavoriteTeamRepository};
pub use user::{InMemoryUserRepository, UserRepository};
pub use verification::{InMemoryVerificationCodeRepository, VerificationCodeRepository};

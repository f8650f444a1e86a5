//! MySQL repository implementations

mod favorite_team_repository_impl;
mod user_repository_impl;
mod verification_code_repository_impl;

pub use favorite_team_repository_impl::MySqlFavoriteTeamRepository;
pub use user_repository_impl::MySqlUserRepository;
pub use verification_code_repository_impl::MySqlVerificationCodeRepository;

use sb_core::errors::DomainError;

/// Map a driver error to a domain error, turning unique-key violations into `Conflict`
pub(crate) fn map_write_error(resource: &str, err: sqlx::Error) -> DomainError {
    if is_unique_violation(&err) {
        return DomainError::Conflict {
            resource: resource.to_string(),
        };
    }
    DomainError::dependency(format!("Failed to write {}: {}", resource, err))
}

/// Map a driver error on a read path
pub(crate) fn map_read_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::dependency(format!("{}: {}", context, err))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

/// Column decoding failures mean the schema and the entity disagree
pub(crate) fn column_error(column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, err),
    }
}

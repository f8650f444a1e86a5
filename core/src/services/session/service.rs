//! HS256 session token issuer

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use sb_shared::SessionConfig;

use crate::domain::entities::session::{SessionClaims, SessionToken, VerifiedUser};
use crate::errors::{DomainError, TokenError};

/// Signs and validates session tokens for verified users
pub struct SessionService {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionService {
    /// Creates a new session service from the shared session configuration
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Establish a session for a user that just passed phone verification
    pub fn issue(&self, user: &VerifiedUser) -> Result<SessionToken, DomainError> {
        let now = Utc::now();
        let ttl = Duration::seconds(self.config.ttl_seconds);
        let claims = SessionClaims::new(user, now, ttl, &self.config.issuer, &self.config.audience);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        tracing::debug!(user_id = %user.id, jti = %claims.jti, "Issued session token");

        Ok(SessionToken {
            token,
            expires_at: now + ttl,
            max_age_seconds: self.config.ttl_seconds,
        })
    }

    /// Verify a session token and return its claims
    pub fn validate(&self, token: &str) -> Result<SessionClaims, DomainError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                _ => DomainError::Token(TokenError::InvalidToken),
            })?;

        Ok(token_data.claims)
    }
}
